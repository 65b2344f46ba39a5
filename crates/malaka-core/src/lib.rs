//! Core types and trait definitions for the Malaka analytics sync pipeline.
//!
//! No HTTP or database dependencies live here. The store backends and the
//! sync pipeline build on these types and traits.

// Store traits return `impl Future + Send`; implementors use `async fn`.
#![allow(async_fn_in_trait)]

pub mod coerce;
pub mod error;
pub mod row;
pub mod source;
pub mod store;
pub mod watermark;

pub use error::{Error, Result};
