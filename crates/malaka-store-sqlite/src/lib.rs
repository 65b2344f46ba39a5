//! SQLite backend for the operational (source) side of the sync pipeline.
//!
//! Wraps [`tokio_rusqlite`] so extraction queries run on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod queries;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::SCHEMA;
pub use store::SqliteOperationalStore;

#[cfg(test)]
mod tests;
