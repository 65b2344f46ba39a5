//! Sync checkpoints and the tables they describe.
//!
//! Watermarks form an append-only log: each successful fact-table sync adds
//! a row, and the current watermark for a table is always derived as the
//! most recent `last_synced_at` among rows with a recognised sync type.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Sync type ───────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncType {
  Full,
  Incremental,
}

impl SyncType {
  /// Sync types whose rows count when resolving a table's watermark.
  pub const RECOGNISED: [SyncType; 2] = [SyncType::Full, SyncType::Incremental];
}

impl FromStr for SyncType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "full" => Ok(Self::Full),
      "incremental" => Ok(Self::Incremental),
      other => Err(Error::UnknownSyncType(other.to_owned())),
    }
  }
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Dimension tables, in sync order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DimensionTable {
  DimCustomer,
  DimSupplier,
  DimArticle,
  DimWarehouse,
  DimEmployee,
}

impl DimensionTable {
  pub const ALL: [DimensionTable; 5] = [
    Self::DimCustomer,
    Self::DimSupplier,
    Self::DimArticle,
    Self::DimWarehouse,
    Self::DimEmployee,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Self::DimCustomer => "dim_customer",
      Self::DimSupplier => "dim_supplier",
      Self::DimArticle => "dim_article",
      Self::DimWarehouse => "dim_warehouse",
      Self::DimEmployee => "dim_employee",
    }
  }
}

/// Fact tables, in sync order. The order only affects log readability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FactTable {
  SalesFact,
  ProcurementFact,
  InventoryMovementFact,
  FinancialTransactionFact,
  AttendanceFact,
}

impl FactTable {
  pub const ALL: [FactTable; 5] = [
    Self::SalesFact,
    Self::ProcurementFact,
    Self::InventoryMovementFact,
    Self::FinancialTransactionFact,
    Self::AttendanceFact,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Self::SalesFact => "sales_fact",
      Self::ProcurementFact => "procurement_fact",
      Self::InventoryMovementFact => "inventory_movement_fact",
      Self::FinancialTransactionFact => "financial_transaction_fact",
      Self::AttendanceFact => "attendance_fact",
    }
  }
}

impl FromStr for FactTable {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|t| t.name() == s)
      .ok_or_else(|| Error::UnknownTable(s.to_owned()))
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// One appended checkpoint. Never updated after it is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
  pub table_name:     String,
  /// Source changes strictly after this instant are not yet synced.
  pub last_synced_at: DateTime<Utc>,
  pub rows_synced:    u64,
  pub sync_type:      SyncType,
  /// When the checkpoint row itself was written.
  pub recorded_at:    DateTime<Utc>,
}

impl Watermark {
  pub fn new(
    table: FactTable,
    last_synced_at: DateTime<Utc>,
    rows_synced: u64,
    sync_type: SyncType,
  ) -> Self {
    Self {
      table_name: table.name().to_owned(),
      last_synced_at,
      rows_synced,
      sync_type,
      recorded_at: Utc::now(),
    }
  }
}

/// The latest checkpoint for one table, as reported to monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
  pub table_name:     String,
  pub last_synced_at: DateTime<Utc>,
  pub rows_synced:    u64,
  /// Kept as text: the log may contain types this build does not know.
  pub sync_type:      String,
}
