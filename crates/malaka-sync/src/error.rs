//! Error type for `malaka-sync`.

use malaka_core::watermark::SyncType;
use thiserror::Error;

/// A store error with its concrete type erased.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("extract for {table}: {source}")]
  Extract {
    table:  &'static str,
    #[source]
    source: BoxError,
  },

  #[error("load {table}: {source}")]
  Load {
    table:  &'static str,
    #[source]
    source: BoxError,
  },

  #[error("watermark for {table}: {source}")]
  Watermark {
    table:  &'static str,
    #[source]
    source: BoxError,
  },

  #[error("sync status: {0}")]
  Status(#[source] BoxError),

  /// Some rows were committed before `source` stopped the table.
  #[error("{rows} rows committed before failure: {source}")]
  Partial {
    rows:   u64,
    #[source]
    source: Box<Error>,
  },

  #[error("cancelled")]
  Cancelled,

  #[error("{0} sync already running")]
  AlreadyRunning(SyncType),
}

impl Error {
  /// Rows that reached the analytical store despite the failure.
  pub fn rows_landed(&self) -> u64 {
    match self {
      Self::Partial { rows, .. } => *rows,
      _ => 0,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
