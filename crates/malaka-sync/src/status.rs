//! Read-only view of the watermark log for monitoring.

use std::sync::Arc;

use malaka_core::{store::AnalyticalStore, watermark::SyncStatus};

use crate::{Error, Result};

/// A stale `last_synced_at` here means the table has been failing since
/// that instant.
pub struct SyncStatusReporter<A> {
  analytical: Arc<A>,
}

impl<A> Clone for SyncStatusReporter<A> {
  fn clone(&self) -> Self {
    Self { analytical: Arc::clone(&self.analytical) }
  }
}

impl<A: AnalyticalStore> SyncStatusReporter<A> {
  pub fn new(analytical: Arc<A>) -> Self {
    Self { analytical }
  }

  /// The latest checkpoint per table, ordered by table name.
  pub async fn get_sync_status(&self) -> Result<Vec<SyncStatus>> {
    self
      .analytical
      .latest_statuses()
      .await
      .map_err(|e| Error::Status(Box::new(e)))
  }
}
