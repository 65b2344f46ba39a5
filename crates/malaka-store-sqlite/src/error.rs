//! Error type for `malaka-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An extraction query failed; `table` is the driving source table.
  #[error("fetch {table}: {source}")]
  Fetch {
    table:  &'static str,
    #[source]
    source: tokio_rusqlite::Error,
  },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
