//! Error type for `malaka-store-duckdb`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("open analytical store: {0}")]
  Open(#[source] duckdb::Error),

  #[error("migration v{version:03} failed: {source}")]
  Migration {
    version: i32,
    #[source]
    source:  duckdb::Error,
  },

  /// A row was rejected; the whole batch was rolled back.
  #[error("insert into {table} (id {id}): {source}")]
  Insert {
    table:  &'static str,
    id:     String,
    #[source]
    source: duckdb::Error,
  },

  #[error("{context}: {source}")]
  Query {
    context: &'static str,
    #[source]
    source:  duckdb::Error,
  },

  #[error("timestamp out of range: {0}us")]
  TimestampRange(i64),

  #[error("analytical store connection poisoned")]
  MutexPoisoned,

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
