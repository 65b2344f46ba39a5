//! DuckDB backend for the analytical (destination) side of the sync pipeline.
//!
//! DuckDB's API is synchronous; every call runs on the blocking thread pool
//! against a single shared connection.

mod bind;
mod migration;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::DuckDbAnalyticalStore;
