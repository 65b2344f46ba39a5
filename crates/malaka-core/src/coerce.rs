//! Total conversions from nullable operational columns to the scalar types
//! the analytical store expects.
//!
//! The analytical schema has no nullable columns: absent text becomes `""`,
//! absent instants and dates become the Unix epoch.

use chrono::{DateTime, NaiveDate, Utc};

/// 1970-01-01T00:00:00Z, written wherever an optional instant is absent.
pub const EPOCH: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// The date component of [`EPOCH`].
pub fn epoch_date() -> NaiveDate { EPOCH.date_naive() }

/// The underlying string, or `""` when absent.
pub fn null_str(value: Option<String>) -> String { value.unwrap_or_default() }

/// The underlying instant, or [`EPOCH`] when absent.
pub fn null_time(value: Option<DateTime<Utc>>) -> DateTime<Utc> {
  value.unwrap_or(EPOCH)
}

/// The underlying date, or 1970-01-01 when absent.
pub fn null_date(value: Option<NaiveDate>) -> NaiveDate {
  value.unwrap_or_else(epoch_date)
}

/// Active unless a status is present and differs from `active_literal`.
///
/// The comparison is exact; source systems disagree on casing (`"active"`
/// vs `"ACTIVE"`) and callers pass the literal their source uses.
pub fn is_active(status: Option<&str>, active_literal: &str) -> bool {
  status.is_none_or(|s| s == active_literal)
}

/// Merge version for last-write-wins dimension tables: the source update
/// time in milliseconds since the epoch. Pre-epoch instants clamp to 0.
pub fn version_of(updated_at: DateTime<Utc>) -> u64 {
  u64::try_from(updated_at.timestamp_millis()).unwrap_or(0)
}
