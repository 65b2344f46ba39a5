//! The `OperationalStore` and `AnalyticalStore` traits.
//!
//! The operational store is the transactional ERP database the pipeline
//! reads from; the analytical store is the columnar star schema it writes
//! to. Backends live in `malaka-store-sqlite` and `malaka-store-duckdb`; the
//! sync pipeline depends on these abstractions, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  row::AnalyticalRow,
  source::{
    SourceArticle, SourceAttendance, SourceCustomer, SourceEmployee,
    SourceJournalLine, SourcePosItem, SourcePurchaseOrderItem,
    SourceSalesOrder, SourceStockMovement, SourceSupplier, SourceWarehouse,
  },
  watermark::{FactTable, SyncStatus, Watermark},
};

/// Rows changed strictly after this instant; `None` means the whole table.
pub type Since = Option<DateTime<Utc>>;

// ─── Operational (read side) ─────────────────────────────────────────────────

/// Read-only extraction queries against the transactional store.
///
/// Reference entities are always read in full. Transactional sources accept
/// a [`Since`] watermark; when several source tables feed one record, a row
/// qualifies if any of them changed after the watermark. Every method
/// returns rows ordered by id.
pub trait OperationalStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reference entities ────────────────────────────────────────────────

  fn customers(
    &self,
  ) -> impl Future<Output = Result<Vec<SourceCustomer>, Self::Error>> + Send + '_;

  fn suppliers(
    &self,
  ) -> impl Future<Output = Result<Vec<SourceSupplier>, Self::Error>> + Send + '_;

  /// Articles with classification, color, and model names resolved.
  fn articles(
    &self,
  ) -> impl Future<Output = Result<Vec<SourceArticle>, Self::Error>> + Send + '_;

  fn warehouses(
    &self,
  ) -> impl Future<Output = Result<Vec<SourceWarehouse>, Self::Error>> + Send + '_;

  fn employees(
    &self,
  ) -> impl Future<Output = Result<Vec<SourceEmployee>, Self::Error>> + Send + '_;

  // ── Transactions ──────────────────────────────────────────────────────

  fn sales_orders(
    &self,
    since: Since,
  ) -> impl Future<Output = Result<Vec<SourceSalesOrder>, Self::Error>> + Send + '_;

  fn pos_items(
    &self,
    since: Since,
  ) -> impl Future<Output = Result<Vec<SourcePosItem>, Self::Error>> + Send + '_;

  fn purchase_order_items(
    &self,
    since: Since,
  ) -> impl Future<Output = Result<Vec<SourcePurchaseOrderItem>, Self::Error>>
  + Send
  + '_;

  fn stock_movements(
    &self,
    since: Since,
  ) -> impl Future<Output = Result<Vec<SourceStockMovement>, Self::Error>> + Send + '_;

  fn journal_lines(
    &self,
    since: Since,
  ) -> impl Future<Output = Result<Vec<SourceJournalLine>, Self::Error>> + Send + '_;

  fn attendance(
    &self,
    since: Since,
  ) -> impl Future<Output = Result<Vec<SourceAttendance>, Self::Error>> + Send + '_;
}

// ─── Analytical (write side) ─────────────────────────────────────────────────

/// The columnar destination. Only this pipeline writes to it.
pub trait AnalyticalStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Write `rows` into `R::TABLE` inside a single transaction using one
  /// prepared statement. Either every row lands or none does; on failure the
  /// error identifies the row that broke the batch. An empty batch returns
  /// `Ok(0)` without opening a transaction.
  fn load<R: AnalyticalRow>(
    &self,
    rows: Vec<R>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Append a checkpoint row. Existing rows are never modified.
  fn append_watermark(
    &self,
    watermark: Watermark,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The most recent `last_synced_at` for `table` among `full` and
  /// `incremental` rows, or `None` if the table was never synced.
  fn current_watermark(
    &self,
    table: FactTable,
  ) -> impl Future<Output = Result<Option<DateTime<Utc>>, Self::Error>> + Send + '_;

  /// The latest checkpoint row per table, ordered by table name.
  fn latest_statuses(
    &self,
  ) -> impl Future<Output = Result<Vec<SyncStatus>, Self::Error>> + Send + '_;
}
