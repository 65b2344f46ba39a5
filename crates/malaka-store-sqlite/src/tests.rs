//! Extraction tests for `SqliteOperationalStore` against an in-memory
//! database.

use chrono::{DateTime, NaiveDate, Utc};
use malaka_core::store::OperationalStore;

use crate::{Error, SqliteOperationalStore};

async fn store() -> SqliteOperationalStore {
  SqliteOperationalStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn seeded(sql: &str) -> SqliteOperationalStore {
  let s = store().await;
  s.execute_batch(sql).await.expect("fixtures");
  s
}

fn at(s: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

// ─── Reference entities ──────────────────────────────────────────────────────

#[tokio::test]
async fn customers_fall_back_to_created_at() {
  let s = seeded(
    "INSERT INTO customers (id, name, status, created_at, updated_at) VALUES
       ('c2', 'Budi',  'active',    '2024-01-01T00:00:00Z', '2024-02-01T00:00:00Z'),
       ('c1', NULL,    'suspended', '2024-01-05 08:00:00',  NULL);",
  )
  .await;

  let rows = s.customers().await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].id, "c1", "ordered by id");
  assert_eq!(rows[0].name, "");
  assert_eq!(rows[0].updated_at, at("2024-01-05T08:00:00Z"));
  assert_eq!(rows[0].phone, None);
  assert_eq!(rows[1].updated_at, at("2024-02-01T00:00:00Z"));
  assert_eq!(rows[1].status.as_deref(), Some("active"));
}

#[tokio::test]
async fn articles_resolve_lookup_names() {
  let s = seeded(
    "INSERT INTO classifications VALUES ('cl1', 'Shoes');
     INSERT INTO colors VALUES ('co1', 'Red');
     INSERT INTO articles (id, barcode, name, classification_id, color_id, price, created_at)
       VALUES ('a1', '899001', 'Runner', 'cl1', 'co1', 250000, '2024-01-01T00:00:00Z');",
  )
  .await;

  let rows = s.articles().await.unwrap();
  assert_eq!(rows.len(), 1);
  let a = &rows[0];
  assert_eq!(a.classification_name.as_deref(), Some("Shoes"));
  assert_eq!(a.color_name.as_deref(), Some("Red"));
  assert_eq!(a.model_name.as_deref(), Some(""));
  assert_eq!(a.price, 250000.0);
}

#[tokio::test]
async fn employee_hire_date_is_optional() {
  let s = seeded(
    "INSERT INTO employees (id, employee_name, hire_date, employment_status, created_at) VALUES
       ('e1', 'Sari', '2021-06-01', 'ACTIVE', '2024-01-01T00:00:00Z'),
       ('e2', 'Tono', NULL,         NULL,     '2024-01-01T00:00:00Z');",
  )
  .await;

  let rows = s.employees().await.unwrap();
  assert_eq!(rows[0].hire_date, NaiveDate::from_ymd_opt(2021, 6, 1));
  assert_eq!(rows[1].hire_date, None);
  assert_eq!(rows[1].employment_status, None);
}

// ─── Transactions ────────────────────────────────────────────────────────────

const SALES: &str = "
  INSERT INTO customers (id, name, created_at) VALUES ('c1', 'Budi', '2024-01-01T00:00:00Z');
  INSERT INTO sales_orders (id, order_date, customer_id, total_amount, status, created_at, updated_at) VALUES
    ('so1', '2024-03-01T10:00:00Z', 'c1', 100, 'confirmed', '2024-03-01T10:00:00Z', '2024-03-01T10:00:00Z'),
    ('so2', '2024-03-02T10:00:00Z', 'c1', 200, 'confirmed', '2024-03-02T10:00:00Z', '2024-03-02T10:00:00Z'),
    ('so3', NULL,                   NULL, NULL, NULL,       '2024-03-03T10:00:00Z', '2024-03-03T10:00:00Z');
";

#[tokio::test]
async fn sales_orders_full_extraction() {
  let s = seeded(SALES).await;
  let rows = s.sales_orders(None).await.unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0].customer_name.as_deref(), Some("Budi"));
  assert_eq!(rows[2].transaction_date, at("2024-03-03T10:00:00Z"));
  assert_eq!(rows[2].customer_name.as_deref(), Some(""));
  assert_eq!(rows[2].total_amount, 0.0);
}

#[tokio::test]
async fn sales_orders_since_is_strict() {
  let s = seeded(SALES).await;
  let rows = s
    .sales_orders(Some(at("2024-03-02T10:00:00Z")))
    .await
    .unwrap();
  let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
  assert_eq!(ids, ["so3"]);
}

#[tokio::test]
async fn since_compares_instants_not_text() {
  let s = seeded(SALES).await;
  s.execute_batch("UPDATE sales_orders SET updated_at = '2024-03-05 09:00:00' WHERE id = 'so1'")
    .await
    .unwrap();
  let rows = s
    .sales_orders(Some(at("2024-03-04T00:00:00Z")))
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].id, "so1");
}

#[tokio::test]
async fn pos_items_match_on_either_table_change() {
  let s = seeded(
    "INSERT INTO pos_transactions (id, transaction_date, total_amount, created_at, updated_at) VALUES
       ('pt1', '2024-03-01T09:00:00Z', 50, '2024-03-01T09:00:00Z', '2024-03-10T00:00:00Z'),
       ('pt2', '2024-03-01T09:00:00Z', 80, '2024-03-01T09:00:00Z', '2024-03-01T09:00:00Z');
     INSERT INTO pos_items (id, pos_transaction_id, quantity, unit_price, discount_percentage, line_total, created_at, updated_at) VALUES
       ('pi1', 'pt1', 2, 25, 0,  50, '2024-03-01T09:00:00Z', '2024-03-01T09:00:00Z'),
       ('pi2', 'pt2', 1, 80, 10, 72, '2024-03-01T09:00:00Z', '2024-03-09T00:00:00Z'),
       ('pi3', 'pt2', 1, 8,  0,  8,  '2024-03-01T09:00:00Z', '2024-03-01T09:00:00Z');",
  )
  .await;

  let rows = s.pos_items(Some(at("2024-03-05T00:00:00Z"))).await.unwrap();
  let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
  assert_eq!(ids, ["pi1", "pi2"]);
  assert_eq!(rows[1].discount_pct, 10.0);
  assert_eq!(rows[1].order_total, 80.0);
  assert_eq!(rows[0].payment_method, "");
}

#[tokio::test]
async fn purchase_order_items_default_currency() {
  let s = seeded(
    "INSERT INTO procurement_purchase_orders (id, po_number, supplier_id, created_at) VALUES
       ('po1', 'PO-001', NULL, '2024-03-01T00:00:00Z');
     INSERT INTO procurement_purchase_order_items (id, purchase_order_id, item_name, quantity, unit_price, line_total) VALUES
       ('poi1', 'po1', 'Bolts', 10, 1.5, 15);",
  )
  .await;

  let rows = s.purchase_order_items(None).await.unwrap();
  assert_eq!(rows.len(), 1);
  let r = &rows[0];
  assert_eq!(r.currency, "IDR");
  assert_eq!(r.quantity, 10);
  assert_eq!(r.received_quantity, 0);
  assert_eq!(r.transaction_date, at("2024-03-01T00:00:00Z"));
  assert_eq!(r.created_at, at("2024-03-01T00:00:00Z"), "inherits order creation");
}

#[tokio::test]
async fn journal_line_description_falls_back_to_entry() {
  let s = seeded(
    "INSERT INTO journal_entries (id, entry_number, entry_date, description, created_at) VALUES
       ('je1', 'JE-1', '2024-03-15T00:00:00Z', 'Monthly accrual', '2024-03-15T00:00:00Z');
     INSERT INTO journal_entry_lines (id, journal_entry_id, description, debit_amount) VALUES
       ('l1', 'je1', NULL,   100),
       ('l2', 'je1', 'Rent', NULL);",
  )
  .await;

  let rows = s.journal_lines(None).await.unwrap();
  assert_eq!(rows[0].description, "Monthly accrual");
  assert_eq!(rows[1].description, "Rent");
  assert_eq!(rows[1].debit_amount, 0.0);
  assert_eq!(rows[0].exchange_rate, 1.0);
  assert_eq!(rows[0].currency_code, "IDR");
}

#[tokio::test]
async fn journal_entry_date_keeps_local_day() {
  let s = seeded(
    "INSERT INTO journal_entries (id, entry_number, entry_date, created_at) VALUES
       ('je1', 'JE-1', '2024-03-15T02:00:00+07:00', '2024-03-15T02:00:00+07:00'),
       ('je2', 'JE-2', '2024-03-16',                '2024-03-16T00:00:00Z');
     INSERT INTO journal_entry_lines (id, journal_entry_id, debit_amount) VALUES
       ('l1', 'je1', 100),
       ('l2', 'je2', 50);",
  )
  .await;

  let rows = s.journal_lines(None).await.unwrap();
  assert_eq!(rows[0].entry_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
  assert_eq!(rows[0].created_at, at("2024-03-14T19:00:00Z"));
  assert_eq!(rows[1].entry_date, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
}

#[tokio::test]
async fn attendance_clock_times_are_optional() {
  let s = seeded(
    "INSERT INTO employees (id, employee_name, department, created_at) VALUES
       ('e1', 'Sari', 'Ops', '2024-01-01T00:00:00Z');
     INSERT INTO daily_attendance_tracking (id, employee_id, attendance_date, actual_in, late_minutes, status, created_at) VALUES
       ('d1', 'e1', '2024-03-15', '2024-03-15T08:05:00Z', 5, 'present', '2024-03-15T08:05:00Z');",
  )
  .await;

  let rows = s.attendance(None).await.unwrap();
  let r = &rows[0];
  assert_eq!(r.attendance_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
  assert_eq!(r.clock_in, Some(at("2024-03-15T08:05:00Z")));
  assert_eq!(r.clock_out, None);
  assert_eq!(r.late_minutes, 5);
  assert_eq!(r.department, "Ops");
}

#[tokio::test]
async fn fetch_error_names_table() {
  let s = store().await;
  s.execute_batch("DROP TABLE stock_movements").await.unwrap();
  let err = s.stock_movements(None).await.unwrap_err();
  assert!(matches!(err, Error::Fetch { table: "stock_movements", .. }));
}
