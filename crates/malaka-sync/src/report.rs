//! The outcome of one sync invocation.

use chrono::{DateTime, Utc};
use malaka_core::watermark::SyncType;
use serde::Serialize;
use uuid::Uuid;

use crate::Error;

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
  pub run_id:      Uuid,
  pub sync_type:   SyncType,
  pub started_at:  DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  pub dimensions:  Vec<TableReport>,
  pub facts:       Vec<TableReport>,
}

impl SyncReport {
  pub fn tables(&self) -> impl Iterator<Item = &TableReport> {
    self.dimensions.iter().chain(&self.facts)
  }

  /// Tables that did not finish this run.
  pub fn failures(&self) -> impl Iterator<Item = &TableReport> {
    self.tables().filter(|t| t.outcome.is_failed())
  }

  pub fn is_clean(&self) -> bool {
    self.failures().next().is_none()
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
  pub table:      &'static str,
  pub elapsed_ms: u64,
  #[serde(flatten)]
  pub outcome:    TableOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TableOutcome {
  Synced {
    rows:      u64,
    /// The checkpoint appended for this table, if any. Always `None` for
    /// dimensions.
    watermark: Option<DateTime<Utc>>,
  },
  Failed {
    rows_landed: u64,
    error:       String,
  },
}

impl TableOutcome {
  pub fn failed(error: &Error) -> Self {
    Self::Failed { rows_landed: error.rows_landed(), error: error.to_string() }
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, Self::Failed { .. })
  }
}
