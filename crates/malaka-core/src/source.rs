//! Extraction records read from the operational store.
//!
//! One struct per extraction query. Display names are already resolved by
//! the query's joins; columns the query defaults with `COALESCE` are plain
//! values, everything else that may be NULL is an `Option`.

use chrono::{DateTime, NaiveDate, Utc};

// ─── Reference entities ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SourceCustomer {
  pub id:         String,
  pub name:       String,
  pub phone:      Option<String>,
  pub email:      Option<String>,
  pub address:    Option<String>,
  pub status:     Option<String>,
  /// `COALESCE(updated_at, created_at)`.
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceSupplier {
  pub id:             String,
  pub name:           String,
  pub contact_person: Option<String>,
  pub phone:          Option<String>,
  pub email:          Option<String>,
  pub address:        Option<String>,
  pub status:         Option<String>,
  pub updated_at:     DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceArticle {
  pub id:                  String,
  pub barcode:             Option<String>,
  pub name:                String,
  pub description:         Option<String>,
  pub classification_id:   Option<String>,
  pub classification_name: Option<String>,
  pub color_id:            Option<String>,
  pub color_name:          Option<String>,
  pub model_id:            Option<String>,
  pub model_name:          Option<String>,
  pub price:               f64,
  pub updated_at:          DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceWarehouse {
  pub id:             String,
  pub code:           Option<String>,
  pub name:           String,
  pub city:           Option<String>,
  pub warehouse_type: Option<String>,
  pub status:         Option<String>,
  pub updated_at:     DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceEmployee {
  pub id:                String,
  pub employee_code:     Option<String>,
  pub employee_name:     String,
  pub department:        Option<String>,
  pub position:          Option<String>,
  pub hire_date:         Option<NaiveDate>,
  pub employment_status: Option<String>,
  pub updated_at:        DateTime<Utc>,
}

// ─── Transactions ────────────────────────────────────────────────────────────

/// A sales order; the order itself is the line (no item table).
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSalesOrder {
  pub id:               String,
  pub transaction_date: DateTime<Utc>,
  pub customer_id:      Option<String>,
  pub customer_name:    Option<String>,
  pub total_amount:     f64,
  pub status:           String,
  pub created_at:       DateTime<Utc>,
}

/// A point-of-sale line item joined to its transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePosItem {
  pub id:               String,
  pub transaction_date: DateTime<Utc>,
  pub customer_name:    String,
  pub article_id:       Option<String>,
  pub product_code:     Option<String>,
  pub product_name:     Option<String>,
  pub cashier_id:       Option<String>,
  pub quantity:         i64,
  pub unit_price:       f64,
  pub discount_pct:     f64,
  pub tax_amount:       f64,
  pub line_total:       f64,
  pub order_total:      f64,
  pub payment_method:   String,
  pub payment_status:   String,
  pub created_at:       DateTime<Utc>,
}

/// A purchase-order line with its order's aggregates alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePurchaseOrderItem {
  pub id:                  String,
  pub po_number:           String,
  pub transaction_date:    DateTime<Utc>,
  pub supplier_id:         Option<String>,
  pub supplier_name:       Option<String>,
  pub item_name:           String,
  pub created_by_id:       Option<String>,
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
  pub purchase_request_id: Option<String>,
  pub created_at:          DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceStockMovement {
  pub id:             String,
  pub movement_date:  DateTime<Utc>,
  pub article_id:     Option<String>,
  pub article_name:   Option<String>,
  pub warehouse_id:   Option<String>,
  pub warehouse_name: Option<String>,
  pub movement_type:  String,
  pub quantity:       i64,
  pub reference_id:   String,
  pub created_at:     DateTime<Utc>,
}

/// A journal entry line joined to its entry and account.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceJournalLine {
  pub id:               String,
  pub journal_entry_id: String,
  pub entry_number:     String,
  /// The calendar day as written in the source, offset ignored.
  pub entry_date:       NaiveDate,
  pub account_id:       Option<String>,
  pub account_code:     String,
  pub account_name:     String,
  pub company_id:       String,
  pub description:      String,
  pub debit_amount:     f64,
  pub credit_amount:    f64,
  pub currency_code:    String,
  pub exchange_rate:    f64,
  pub source_module:    String,
  pub source_id:        String,
  pub status:           String,
  pub created_at:       DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceAttendance {
  pub id:                String,
  pub attendance_date:   NaiveDate,
  pub employee_id:       Option<String>,
  pub employee_name:     Option<String>,
  pub department:        String,
  pub clock_in:          Option<DateTime<Utc>>,
  pub clock_out:         Option<DateTime<Utc>>,
  pub work_hours:        f64,
  pub overtime_hours:    f64,
  pub late_minutes:      i64,
  pub early_out_minutes: i64,
  pub status:            String,
  pub created_at:        DateTime<Utc>,
}
