//! Destination rows for the analytical star schema.
//!
//! Every dimension and fact row implements [`AnalyticalRow`], which gives a
//! backend everything it needs to build one prepared `INSERT` per table and
//! bind each row to it: the table, the ordered column list, the key, the
//! merge policy, and the ordered values.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ─── Bind values ─────────────────────────────────────────────────────────────

/// A single scalar bound to a destination column. There is no `Null`: the
/// analytical schema is non-nullable and [`crate::coerce`] removes absence
/// before a row is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Text(String),
  Int(i64),
  UInt(u64),
  Float(f64),
  Bool(bool),
  Timestamp(DateTime<Utc>),
  /// A calendar date with no time component.
  Date(NaiveDate),
}

impl From<String> for Value {
  fn from(v: String) -> Self { Self::Text(v) }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self { Self::Text(v.to_owned()) }
}

impl From<&String> for Value {
  fn from(v: &String) -> Self { Self::Text(v.clone()) }
}

impl From<i64> for Value {
  fn from(v: i64) -> Self { Self::Int(v) }
}

impl From<u64> for Value {
  fn from(v: u64) -> Self { Self::UInt(v) }
}

impl From<f64> for Value {
  fn from(v: f64) -> Self { Self::Float(v) }
}

impl From<bool> for Value {
  fn from(v: bool) -> Self { Self::Bool(v) }
}

impl From<DateTime<Utc>> for Value {
  fn from(v: DateTime<Utc>) -> Self { Self::Timestamp(v) }
}

impl From<NaiveDate> for Value {
  fn from(v: NaiveDate) -> Self { Self::Date(v) }
}

// ─── Row contract ────────────────────────────────────────────────────────────

/// How a backend reconciles a row whose key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
  /// Last write wins by the `_version` column; an equal version overwrites
  /// with identical data, a lower version is ignored.
  Versioned,
  /// A replayed key replaces the stored row.
  Replace,
}

pub trait AnalyticalRow: Send + Sync + 'static {
  const TABLE: &'static str;
  /// Destination columns, in bind order.
  const COLUMNS: &'static [&'static str];
  /// Columns forming the row's identity; a subset of [`Self::COLUMNS`].
  const KEY: &'static [&'static str];
  const MERGE: MergePolicy;

  /// The operational-store identifier this row was built from.
  fn id(&self) -> &str;

  /// Values in [`Self::COLUMNS`] order.
  fn values(&self) -> Vec<Value>;
}

// ─── Dimensions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DimCustomer {
  pub id:            String,
  pub name:          String,
  pub phone:         String,
  pub email:         String,
  pub address:       String,
  pub city:          String,
  pub customer_type: String,
  pub is_active:     bool,
  pub updated_at:    DateTime<Utc>,
  pub version:       u64,
}

impl AnalyticalRow for DimCustomer {
  const TABLE: &'static str = "dim_customer";
  const COLUMNS: &'static [&'static str] = &[
    "id", "name", "phone", "email", "address", "city", "customer_type",
    "is_active", "updated_at", "_version",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Versioned;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      (&self.name).into(),
      (&self.phone).into(),
      (&self.email).into(),
      (&self.address).into(),
      (&self.city).into(),
      (&self.customer_type).into(),
      self.is_active.into(),
      self.updated_at.into(),
      self.version.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimSupplier {
  pub id:             String,
  pub name:           String,
  pub contact_person: String,
  pub phone:          String,
  pub email:          String,
  pub address:        String,
  pub city:           String,
  pub supplier_type:  String,
  pub is_active:      bool,
  pub updated_at:     DateTime<Utc>,
  pub version:        u64,
}

impl AnalyticalRow for DimSupplier {
  const TABLE: &'static str = "dim_supplier";
  const COLUMNS: &'static [&'static str] = &[
    "id", "name", "contact_person", "phone", "email", "address", "city",
    "supplier_type", "is_active", "updated_at", "_version",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Versioned;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      (&self.name).into(),
      (&self.contact_person).into(),
      (&self.phone).into(),
      (&self.email).into(),
      (&self.address).into(),
      (&self.city).into(),
      (&self.supplier_type).into(),
      self.is_active.into(),
      self.updated_at.into(),
      self.version.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimArticle {
  pub id:                  String,
  pub code:                String,
  pub name:                String,
  pub description:         String,
  pub classification_id:   String,
  pub classification_name: String,
  pub color_id:            String,
  pub color_name:          String,
  pub model_id:            String,
  pub model_name:          String,
  pub price:               f64,
  pub cost:                f64,
  pub category:            String,
  pub is_active:           bool,
  pub updated_at:          DateTime<Utc>,
  pub version:             u64,
}

impl AnalyticalRow for DimArticle {
  const TABLE: &'static str = "dim_article";
  const COLUMNS: &'static [&'static str] = &[
    "id", "code", "name", "description", "classification_id",
    "classification_name", "color_id", "color_name", "model_id", "model_name",
    "price", "cost", "category", "is_active", "updated_at", "_version",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Versioned;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      (&self.code).into(),
      (&self.name).into(),
      (&self.description).into(),
      (&self.classification_id).into(),
      (&self.classification_name).into(),
      (&self.color_id).into(),
      (&self.color_name).into(),
      (&self.model_id).into(),
      (&self.model_name).into(),
      self.price.into(),
      self.cost.into(),
      (&self.category).into(),
      self.is_active.into(),
      self.updated_at.into(),
      self.version.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimWarehouse {
  pub id:             String,
  pub code:           String,
  pub name:           String,
  pub location:       String,
  pub warehouse_type: String,
  pub is_active:      bool,
  pub updated_at:     DateTime<Utc>,
  pub version:        u64,
}

impl AnalyticalRow for DimWarehouse {
  const TABLE: &'static str = "dim_warehouse";
  const COLUMNS: &'static [&'static str] = &[
    "id", "code", "name", "location", "warehouse_type", "is_active",
    "updated_at", "_version",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Versioned;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      (&self.code).into(),
      (&self.name).into(),
      (&self.location).into(),
      (&self.warehouse_type).into(),
      self.is_active.into(),
      self.updated_at.into(),
      self.version.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimEmployee {
  pub id:            String,
  pub employee_code: String,
  pub full_name:     String,
  pub department:    String,
  pub position:      String,
  pub hire_date:     NaiveDate,
  pub is_active:     bool,
  pub updated_at:    DateTime<Utc>,
  pub version:       u64,
}

impl AnalyticalRow for DimEmployee {
  const TABLE: &'static str = "dim_employee";
  const COLUMNS: &'static [&'static str] = &[
    "id", "employee_code", "full_name", "department", "position", "hire_date",
    "is_active", "updated_at", "_version",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Versioned;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      (&self.employee_code).into(),
      (&self.full_name).into(),
      (&self.department).into(),
      (&self.position).into(),
      self.hire_date.into(),
      self.is_active.into(),
      self.updated_at.into(),
      self.version.into(),
    ]
  }
}

// ─── Facts ───────────────────────────────────────────────────────────────────

/// Discriminates the two sources feeding `sales_fact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SalesSource {
  SalesOrder,
  Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesFact {
  pub id:               String,
  pub source_type:      SalesSource,
  pub transaction_date: DateTime<Utc>,
  pub customer_id:      String,
  pub customer_name:    String,
  pub article_id:       String,
  pub article_code:     String,
  pub article_name:     String,
  pub warehouse_id:     String,
  pub warehouse_name:   String,
  pub cashier_id:       String,
  pub quantity:         i64,
  pub unit_price:       f64,
  pub discount_amount:  f64,
  pub tax_amount:       f64,
  pub line_total:       f64,
  pub order_total:      f64,
  pub status:           String,
  pub payment_method:   String,
  pub payment_status:   String,
  pub channel:          String,
  pub created_at:       DateTime<Utc>,
}

impl AnalyticalRow for SalesFact {
  const TABLE: &'static str = "sales_fact";
  const COLUMNS: &'static [&'static str] = &[
    "id", "source_type", "transaction_date", "customer_id", "customer_name",
    "article_id", "article_code", "article_name", "warehouse_id",
    "warehouse_name", "cashier_id", "quantity", "unit_price",
    "discount_amount", "tax_amount", "line_total", "order_total", "status",
    "payment_method", "payment_status", "channel", "created_at",
  ];
  const KEY: &'static [&'static str] = &["source_type", "id"];
  const MERGE: MergePolicy = MergePolicy::Replace;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      Value::Text(self.source_type.to_string()),
      self.transaction_date.into(),
      (&self.customer_id).into(),
      (&self.customer_name).into(),
      (&self.article_id).into(),
      (&self.article_code).into(),
      (&self.article_name).into(),
      (&self.warehouse_id).into(),
      (&self.warehouse_name).into(),
      (&self.cashier_id).into(),
      self.quantity.into(),
      self.unit_price.into(),
      self.discount_amount.into(),
      self.tax_amount.into(),
      self.line_total.into(),
      self.order_total.into(),
      (&self.status).into(),
      (&self.payment_method).into(),
      (&self.payment_status).into(),
      (&self.channel).into(),
      self.created_at.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementFact {
  pub id:                  String,
  pub po_number:           String,
  pub transaction_date:    DateTime<Utc>,
  pub supplier_id:         String,
  pub supplier_name:       String,
  pub article_id:          String,
  pub article_name:        String,
  pub created_by_id:       String,
  pub quantity:            i64,
  pub unit_price:          f64,
  pub line_total:          f64,
  pub received_quantity:   i64,
  pub order_subtotal:      f64,
  pub order_discount:      f64,
  pub order_tax:           f64,
  pub order_total:         f64,
  pub status:              String,
  pub payment_status:      String,
  pub currency:            String,
  pub payment_terms:       String,
  pub purchase_request_id: String,
  pub created_at:          DateTime<Utc>,
}

impl AnalyticalRow for ProcurementFact {
  const TABLE: &'static str = "procurement_fact";
  const COLUMNS: &'static [&'static str] = &[
    "id", "po_number", "transaction_date", "supplier_id", "supplier_name",
    "article_id", "article_name", "created_by_id", "quantity", "unit_price",
    "line_total", "received_quantity", "order_subtotal", "order_discount",
    "order_tax", "order_total", "status", "payment_status", "currency",
    "payment_terms", "purchase_request_id", "created_at",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Replace;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      (&self.po_number).into(),
      self.transaction_date.into(),
      (&self.supplier_id).into(),
      (&self.supplier_name).into(),
      (&self.article_id).into(),
      (&self.article_name).into(),
      (&self.created_by_id).into(),
      self.quantity.into(),
      self.unit_price.into(),
      self.line_total.into(),
      self.received_quantity.into(),
      self.order_subtotal.into(),
      self.order_discount.into(),
      self.order_tax.into(),
      self.order_total.into(),
      (&self.status).into(),
      (&self.payment_status).into(),
      (&self.currency).into(),
      (&self.payment_terms).into(),
      (&self.purchase_request_id).into(),
      self.created_at.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryMovementFact {
  pub id:             String,
  pub movement_date:  DateTime<Utc>,
  pub article_id:     String,
  pub article_code:   String,
  pub article_name:   String,
  pub warehouse_id:   String,
  pub warehouse_name: String,
  pub quantity:       i64,
  pub unit_cost:      f64,
  pub total_value:    f64,
  pub movement_type:  String,
  pub reference_id:   String,
  pub reference_type: String,
  pub created_at:     DateTime<Utc>,
}

impl AnalyticalRow for InventoryMovementFact {
  const TABLE: &'static str = "inventory_movement_fact";
  const COLUMNS: &'static [&'static str] = &[
    "id", "movement_date", "article_id", "article_code", "article_name",
    "warehouse_id", "warehouse_name", "quantity", "unit_cost", "total_value",
    "movement_type", "reference_id", "reference_type", "created_at",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Replace;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      self.movement_date.into(),
      (&self.article_id).into(),
      (&self.article_code).into(),
      (&self.article_name).into(),
      (&self.warehouse_id).into(),
      (&self.warehouse_name).into(),
      self.quantity.into(),
      self.unit_cost.into(),
      self.total_value.into(),
      (&self.movement_type).into(),
      (&self.reference_id).into(),
      (&self.reference_type).into(),
      self.created_at.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialTransactionFact {
  pub id:               String,
  pub journal_entry_id: String,
  pub entry_number:     String,
  /// Financial periods are keyed by day, so the time component is dropped.
  pub entry_date:       NaiveDate,
  pub account_id:       String,
  pub account_code:     String,
  pub account_name:     String,
  pub company_id:       String,
  pub debit_amount:     f64,
  pub credit_amount:    f64,
  pub status:           String,
  pub source_module:    String,
  pub source_id:        String,
  pub description:      String,
  pub currency_code:    String,
  pub exchange_rate:    f64,
  pub created_at:       DateTime<Utc>,
}

impl AnalyticalRow for FinancialTransactionFact {
  const TABLE: &'static str = "financial_transaction_fact";
  const COLUMNS: &'static [&'static str] = &[
    "id", "journal_entry_id", "entry_number", "entry_date", "account_id",
    "account_code", "account_name", "company_id", "debit_amount",
    "credit_amount", "status", "source_module", "source_id", "description",
    "currency_code", "exchange_rate", "created_at",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Replace;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      (&self.journal_entry_id).into(),
      (&self.entry_number).into(),
      self.entry_date.into(),
      (&self.account_id).into(),
      (&self.account_code).into(),
      (&self.account_name).into(),
      (&self.company_id).into(),
      self.debit_amount.into(),
      self.credit_amount.into(),
      (&self.status).into(),
      (&self.source_module).into(),
      (&self.source_id).into(),
      (&self.description).into(),
      (&self.currency_code).into(),
      self.exchange_rate.into(),
      self.created_at.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceFact {
  pub id:                String,
  pub attendance_date:   NaiveDate,
  pub employee_id:       String,
  pub employee_name:     String,
  pub department:        String,
  pub clock_in:          DateTime<Utc>,
  pub clock_out:         DateTime<Utc>,
  pub work_hours:        f64,
  pub overtime_hours:    f64,
  pub late_minutes:      i64,
  pub early_out_minutes: i64,
  pub status:            String,
  pub source:            String,
  pub location:          String,
  pub created_at:        DateTime<Utc>,
}

impl AnalyticalRow for AttendanceFact {
  const TABLE: &'static str = "attendance_fact";
  const COLUMNS: &'static [&'static str] = &[
    "id", "attendance_date", "employee_id", "employee_name", "department",
    "clock_in", "clock_out", "work_hours", "overtime_hours", "late_minutes",
    "early_out_minutes", "status", "source", "location", "created_at",
  ];
  const KEY: &'static [&'static str] = &["id"];
  const MERGE: MergePolicy = MergePolicy::Replace;

  fn id(&self) -> &str { &self.id }

  fn values(&self) -> Vec<Value> {
    vec![
      (&self.id).into(),
      self.attendance_date.into(),
      (&self.employee_id).into(),
      (&self.employee_name).into(),
      (&self.department).into(),
      self.clock_in.into(),
      self.clock_out.into(),
      self.work_hours.into(),
      self.overtime_hours.into(),
      self.late_minutes.into(),
      self.early_out_minutes.into(),
      (&self.status).into(),
      (&self.source).into(),
      (&self.location).into(),
      self.created_at.into(),
    ]
  }
}
