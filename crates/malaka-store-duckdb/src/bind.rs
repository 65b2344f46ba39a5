//! Binding [`Value`]s to DuckDB parameters.
//!
//! Instants and dates are bound as text and cast by the target column, so
//! the bundled driver's chrono support is not needed.

use duckdb::{
  ToSql,
  types::{ToSqlOutput, Value as DbValue},
};
use malaka_core::row::Value;

/// Timestamp text DuckDB casts to `TIMESTAMP` without loss.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub struct Bind<'a>(pub &'a Value);

impl ToSql for Bind<'_> {
  fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
    let value = match self.0 {
      Value::Text(s) => DbValue::Text(s.clone()),
      Value::Int(n) => DbValue::BigInt(*n),
      Value::UInt(n) => DbValue::UBigInt(*n),
      Value::Float(f) => DbValue::Double(*f),
      Value::Bool(b) => DbValue::Boolean(*b),
      Value::Timestamp(t) => {
        DbValue::Text(t.naive_utc().format(TIMESTAMP_FORMAT).to_string())
      }
      Value::Date(d) => DbValue::Text(d.format("%Y-%m-%d").to_string()),
    };
    Ok(ToSqlOutput::Owned(value))
  }
}
