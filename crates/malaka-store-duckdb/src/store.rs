//! [`DuckDbAnalyticalStore`], the DuckDB implementation of
//! [`AnalyticalStore`].

use std::{
  path::Path,
  sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use duckdb::Connection;
use malaka_core::{
  row::{AnalyticalRow, MergePolicy, Value},
  store::AnalyticalStore,
  watermark::{FactTable, SyncStatus, SyncType, Watermark},
};

use crate::{Error, Result, bind::Bind, migration::run_migrations};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The star schema in a DuckDB file.
///
/// Cloning is cheap; clones share one connection, so writes are serialised.
#[derive(Clone)]
pub struct DuckDbAnalyticalStore {
  conn: Arc<Mutex<Connection>>,
}

impl DuckDbAnalyticalStore {
  /// Open (or create) the database at `path` and apply pending migrations.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio::task::spawn_blocking(move || {
      let conn = Connection::open(&path).map_err(Error::Open)?;
      run_migrations(&conn)?;
      Ok::<_, Error>(conn)
    })
    .await??;
    Ok(Self { conn: Arc::new(Mutex::new(conn)) })
  }

  /// Open an in-memory database with all migrations applied.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio::task::spawn_blocking(|| {
      let conn = Connection::open_in_memory().map_err(Error::Open)?;
      run_migrations(&conn)?;
      Ok::<_, Error>(conn)
    })
    .await??;
    Ok(Self { conn: Arc::new(Mutex::new(conn)) })
  }

  /// Run `f` against the connection on the blocking pool.
  pub(crate) async fn with_conn<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
  {
    let conn = Arc::clone(&self.conn);
    tokio::task::spawn_blocking(move || {
      let conn = conn.lock().map_err(|_| Error::MutexPoisoned)?;
      f(&conn)
    })
    .await?
  }
}

/// Run `body` inside `BEGIN` / `COMMIT`, rolling back on error.
fn transaction<T>(conn: &Connection, body: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
  conn
    .execute_batch("BEGIN TRANSACTION")
    .map_err(|source| Error::Query { context: "begin", source })?;

  match body(conn) {
    Ok(value) => {
      if let Err(source) = conn.execute_batch("COMMIT") {
        rollback(conn);
        return Err(Error::Query { context: "commit", source });
      }
      Ok(value)
    }
    Err(e) => {
      rollback(conn);
      Err(e)
    }
  }
}

/// The caller's error wins; a failed rollback is only logged.
fn rollback(conn: &Connection) {
  if let Err(e) = conn.execute_batch("ROLLBACK") {
    tracing::warn!(error = %e, "rollback failed");
  }
}

// ─── SQL ─────────────────────────────────────────────────────────────────────

/// The single prepared statement used to load every row of `R`.
pub(crate) fn upsert_sql<R: AnalyticalRow>() -> String {
  let columns = R::COLUMNS.join(", ");
  let placeholders = vec!["?"; R::COLUMNS.len()].join(", ");
  let assignments = R::COLUMNS
    .iter()
    .filter(|c| !R::KEY.contains(c))
    .map(|c| format!("{c} = EXCLUDED.{c}"))
    .collect::<Vec<_>>()
    .join(", ");

  let mut sql = format!(
    "INSERT INTO {table} ({columns}) VALUES ({placeholders}) \
     ON CONFLICT ({key}) DO UPDATE SET {assignments}",
    table = R::TABLE,
    key = R::KEY.join(", "),
  );
  if R::MERGE == MergePolicy::Versioned {
    sql.push_str(&format!(" WHERE EXCLUDED._version >= {}._version", R::TABLE));
  }
  sql
}

const CURRENT_WATERMARK: &str = "
SELECT epoch_us(MAX(last_synced_at))
FROM sync_watermarks
WHERE table_name = ? AND sync_type IN (?, ?)";

const LATEST_STATUSES: &str = "
SELECT table_name, epoch_us(last_synced_at), rows_synced, sync_type
FROM sync_watermarks
QUALIFY row_number() OVER (
    PARTITION BY table_name ORDER BY last_synced_at DESC, recorded_at DESC
) = 1
ORDER BY table_name";

fn from_micros(us: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_micros(us).ok_or(Error::TimestampRange(us))
}

// ─── AnalyticalStore impl ────────────────────────────────────────────────────

impl AnalyticalStore for DuckDbAnalyticalStore {
  type Error = Error;

  async fn load<R: AnalyticalRow>(&self, rows: Vec<R>) -> Result<u64> {
    if rows.is_empty() {
      return Ok(0);
    }
    let sql = upsert_sql::<R>();

    self
      .with_conn(move |conn| {
        transaction(conn, |conn| {
          let mut stmt = conn
            .prepare(&sql)
            .map_err(|source| Error::Query { context: R::TABLE, source })?;
          for row in &rows {
            let values = row.values();
            stmt
              .execute(duckdb::params_from_iter(values.iter().map(Bind)))
              .map_err(|source| Error::Insert {
                table: R::TABLE,
                id: row.id().to_owned(),
                source,
              })?;
          }
          Ok(rows.len() as u64)
        })
      })
      .await
  }

  async fn append_watermark(&self, watermark: Watermark) -> Result<()> {
    let values: [Value; 5] = [
      watermark.table_name.into(),
      watermark.last_synced_at.into(),
      watermark.rows_synced.into(),
      watermark.sync_type.to_string().into(),
      watermark.recorded_at.into(),
    ];
    self
      .with_conn(move |conn| {
        conn
          .execute(
            "INSERT INTO sync_watermarks
               (table_name, last_synced_at, rows_synced, sync_type, recorded_at)
             VALUES (?, ?, ?, ?, ?)",
            duckdb::params_from_iter(values.iter().map(Bind)),
          )
          .map_err(|source| Error::Query { context: "append watermark", source })?;
        Ok(())
      })
      .await
  }

  async fn current_watermark(&self, table: FactTable) -> Result<Option<DateTime<Utc>>> {
    let [first, second] = SyncType::RECOGNISED.map(|t| t.to_string());
    let micros: Option<i64> = self
      .with_conn(move |conn| {
        conn
          .query_row(
            CURRENT_WATERMARK,
            duckdb::params![table.name(), first, second],
            |row| row.get(0),
          )
          .map_err(|source| Error::Query { context: "current watermark", source })
      })
      .await?;
    micros.map(from_micros).transpose()
  }

  async fn latest_statuses(&self) -> Result<Vec<SyncStatus>> {
    let raw: Vec<(String, i64, u64, String)> = self
      .with_conn(|conn| {
        let query = || -> duckdb::Result<Vec<(String, i64, u64, String)>> {
          let mut stmt = conn.prepare(LATEST_STATUSES)?;
          let rows = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
          })?;
          rows.collect()
        };
        query().map_err(|source| Error::Query { context: "latest statuses", source })
      })
      .await?;

    raw
      .into_iter()
      .map(|(table_name, us, rows_synced, sync_type)| {
        Ok(SyncStatus {
          table_name,
          last_synced_at: from_micros(us)?,
          rows_synced,
          sync_type,
        })
      })
      .collect()
  }
}
