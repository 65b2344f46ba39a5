//! Encoding and decoding between chrono types and the text columns SQLite
//! stores timestamps in.
//!
//! Instants are accepted as RFC 3339 (`2024-03-15T08:30:00Z`), as naive
//! `YYYY-MM-DD HH:MM:SS[.fff]` (either separator, read as UTC), or as a bare
//! date (midnight UTC). Dates accept any value whose first ten characters
//! are `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Watermark parameter format. Millisecond precision matches what SQLite's
/// date functions resolve.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(naive.and_utc());
    }
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

pub fn decode_date(s: &str) -> Option<NaiveDate> {
  s.get(..10)
    .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

// ─── Column adapters ─────────────────────────────────────────────────────────

/// A text column read as an instant.
pub struct SqlTime(pub DateTime<Utc>);

impl FromSql for SqlTime {
  fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
    let s = value.as_str()?;
    decode_dt(s)
      .map(SqlTime)
      .ok_or_else(|| FromSqlError::Other(format!("invalid timestamp: {s:?}").into()))
  }
}

/// A text column read as a calendar date.
pub struct SqlDate(pub NaiveDate);

impl FromSql for SqlDate {
  fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
    let s = value.as_str()?;
    decode_date(s)
      .map(SqlDate)
      .ok_or_else(|| FromSqlError::Other(format!("invalid date: {s:?}").into()))
  }
}

/// Read a required instant column.
pub fn time_at(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
  Ok(row.get::<_, SqlTime>(idx)?.0)
}

/// Read a nullable instant column.
pub fn opt_time_at(
  row: &rusqlite::Row<'_>,
  idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
  Ok(row.get::<_, Option<SqlTime>>(idx)?.map(|t| t.0))
}
