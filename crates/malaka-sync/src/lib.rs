//! The analytics sync pipeline.
//!
//! Extracts from any [`OperationalStore`], transforms into star-schema rows,
//! and loads into any [`AnalyticalStore`]. [`BatchSyncService`] is the entry
//! point; [`SyncStatusReporter`] is the read-only monitoring surface.
//!
//! [`OperationalStore`]: malaka_core::store::OperationalStore
//! [`AnalyticalStore`]: malaka_core::store::AnalyticalStore

pub mod batch;
pub mod cancel;
mod copy;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod report;
pub mod status;
pub mod transform;

pub use batch::BatchSyncService;
pub use cancel::{CancelHandle, CancelToken, cancel_pair};
pub use dimension::DimensionSync;
pub use error::{Error, Result};
pub use fact::FactSync;
pub use report::{SyncReport, TableOutcome, TableReport};
pub use status::SyncStatusReporter;

#[cfg(test)]
mod fakes;
