//! In-memory stores for exercising the pipeline without a database.

use std::{
  collections::{BTreeMap, HashMap, HashSet},
  sync::{Arc, Mutex},
};

use chrono::{DateTime, TimeZone as _, Utc};
use malaka_core::{
  row::{AnalyticalRow, Value},
  source::*,
  store::{AnalyticalStore, OperationalStore, Since},
  watermark::{FactTable, SyncStatus, Watermark},
};
use tokio::sync::Notify;

#[derive(Debug, thiserror::Error)]
#[error("{0} unavailable")]
pub struct FakeError(pub &'static str);

pub fn at(hour: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap()
}

// ─── Operational ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Fixture {
  pub customers:            Vec<SourceCustomer>,
  pub employees:            Vec<SourceEmployee>,
  pub sales_orders:         Vec<SourceSalesOrder>,
  pub pos_items:            Vec<SourcePosItem>,
  pub purchase_order_items: Vec<SourcePurchaseOrderItem>,
  pub stock_movements:      Vec<SourceStockMovement>,
  pub journal_lines:        Vec<SourceJournalLine>,
  pub attendance:           Vec<SourceAttendance>,
}

/// Serves a [`Fixture`]. Extractions named in `failing` error; an extraction
/// named by `hold` waits on its [`Notify`] the first time it is called.
#[derive(Default)]
pub struct FakeOperational {
  pub fixture: Mutex<Fixture>,
  failing:     Mutex<HashSet<&'static str>>,
  hold:        Mutex<Option<(&'static str, Arc<Notify>)>>,
  calls:       Mutex<Vec<(&'static str, Since)>>,
}

impl FakeOperational {
  pub fn new(fixture: Fixture) -> Self {
    Self { fixture: Mutex::new(fixture), ..Default::default() }
  }

  pub fn fail(&self, source: &'static str) {
    self.failing.lock().unwrap().insert(source);
  }

  pub fn hold(&self, source: &'static str) -> Arc<Notify> {
    let notify = Arc::new(Notify::new());
    *self.hold.lock().unwrap() = Some((source, Arc::clone(&notify)));
    notify
  }

  /// The `since` argument of every call to `source`, in call order.
  pub fn since_for(&self, source: &str) -> Vec<Since> {
    self
      .calls
      .lock()
      .unwrap()
      .iter()
      .filter(|(s, _)| *s == source)
      .map(|(_, since)| *since)
      .collect()
  }

  async fn extract<T>(
    &self,
    source: &'static str,
    since: Since,
    read: impl FnOnce(&Fixture) -> Vec<T> + Send,
  ) -> Result<Vec<T>, FakeError> {
    self.calls.lock().unwrap().push((source, since));
    let hold = {
      let mut slot = self.hold.lock().unwrap();
      if slot.as_ref().is_some_and(|(s, _)| *s == source) { slot.take() } else { None }
    };
    if let Some((_, notify)) = hold {
      notify.notified().await;
    }
    if self.failing.lock().unwrap().contains(source) {
      return Err(FakeError(source));
    }
    Ok(read(&self.fixture.lock().unwrap()))
  }
}

fn changed_after<T: Clone>(
  rows: &[T],
  since: Since,
  changed_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
  rows
    .iter()
    .filter(|r| since.is_none_or(|s| changed_at(r) > s))
    .cloned()
    .collect()
}

impl OperationalStore for FakeOperational {
  type Error = FakeError;

  async fn customers(&self) -> Result<Vec<SourceCustomer>, FakeError> {
    self.extract("customers", None, |f| f.customers.clone()).await
  }

  async fn suppliers(&self) -> Result<Vec<SourceSupplier>, FakeError> {
    self.extract("suppliers", None, |_| Vec::new()).await
  }

  async fn articles(&self) -> Result<Vec<SourceArticle>, FakeError> {
    self.extract("articles", None, |_| Vec::new()).await
  }

  async fn warehouses(&self) -> Result<Vec<SourceWarehouse>, FakeError> {
    self.extract("warehouses", None, |_| Vec::new()).await
  }

  async fn employees(&self) -> Result<Vec<SourceEmployee>, FakeError> {
    self.extract("employees", None, |f| f.employees.clone()).await
  }

  async fn sales_orders(&self, since: Since) -> Result<Vec<SourceSalesOrder>, FakeError> {
    self
      .extract("sales_orders", since, |f| {
        changed_after(&f.sales_orders, since, |r| r.created_at)
      })
      .await
  }

  async fn pos_items(&self, since: Since) -> Result<Vec<SourcePosItem>, FakeError> {
    self
      .extract("pos_items", since, |f| changed_after(&f.pos_items, since, |r| r.created_at))
      .await
  }

  async fn purchase_order_items(
    &self,
    since: Since,
  ) -> Result<Vec<SourcePurchaseOrderItem>, FakeError> {
    self
      .extract("purchase_order_items", since, |f| {
        changed_after(&f.purchase_order_items, since, |r| r.created_at)
      })
      .await
  }

  async fn stock_movements(&self, since: Since) -> Result<Vec<SourceStockMovement>, FakeError> {
    self
      .extract("stock_movements", since, |f| {
        changed_after(&f.stock_movements, since, |r| r.created_at)
      })
      .await
  }

  async fn journal_lines(&self, since: Since) -> Result<Vec<SourceJournalLine>, FakeError> {
    self
      .extract("journal_lines", since, |f| {
        changed_after(&f.journal_lines, since, |r| r.created_at)
      })
      .await
  }

  async fn attendance(&self, since: Since) -> Result<Vec<SourceAttendance>, FakeError> {
    self
      .extract("attendance", since, |f| changed_after(&f.attendance, since, |r| r.created_at))
      .await
  }
}

// ─── Analytical ──────────────────────────────────────────────────────────────

type Key = Vec<String>;

/// Keeps rows per table keyed by the row's key columns, so replays replace.
#[derive(Default)]
pub struct FakeAnalytical {
  tables:          Mutex<HashMap<&'static str, BTreeMap<Key, Vec<Value>>>>,
  watermarks:      Mutex<Vec<Watermark>>,
  failing_loads:   Mutex<HashSet<&'static str>>,
  fail_watermarks: Mutex<bool>,
}

impl FakeAnalytical {
  pub fn fail_load(&self, table: &'static str) {
    self.failing_loads.lock().unwrap().insert(table);
  }

  pub fn fail_watermarks(&self) {
    *self.fail_watermarks.lock().unwrap() = true;
  }

  pub fn count(&self, table: &str) -> usize {
    self.tables.lock().unwrap().get(table).map_or(0, BTreeMap::len)
  }

  pub fn row(&self, table: &str, key: &[&str]) -> Option<Vec<Value>> {
    let key: Key = key.iter().map(|k| (*k).to_owned()).collect();
    self.tables.lock().unwrap().get(table)?.get(&key).cloned()
  }

  pub fn watermarks(&self) -> Vec<Watermark> {
    self.watermarks.lock().unwrap().clone()
  }

  pub fn watermarks_for(&self, table: FactTable) -> Vec<Watermark> {
    self
      .watermarks()
      .into_iter()
      .filter(|w| w.table_name == table.name())
      .collect()
  }
}

fn key_of<R: AnalyticalRow>(values: &[Value]) -> Key {
  R::KEY
    .iter()
    .filter_map(|k| R::COLUMNS.iter().position(|c| c == k))
    .map(|i| match &values[i] {
      Value::Text(s) => s.clone(),
      other => format!("{other:?}"),
    })
    .collect()
}

impl AnalyticalStore for FakeAnalytical {
  type Error = FakeError;

  async fn load<R: AnalyticalRow>(&self, rows: Vec<R>) -> Result<u64, FakeError> {
    if rows.is_empty() {
      return Ok(0);
    }
    if self.failing_loads.lock().unwrap().contains(R::TABLE) {
      return Err(FakeError(R::TABLE));
    }
    let mut tables = self.tables.lock().unwrap();
    let table = tables.entry(R::TABLE).or_default();
    for row in &rows {
      let values = row.values();
      table.insert(key_of::<R>(&values), values);
    }
    Ok(rows.len() as u64)
  }

  async fn append_watermark(&self, watermark: Watermark) -> Result<(), FakeError> {
    if *self.fail_watermarks.lock().unwrap() {
      return Err(FakeError("sync_watermarks"));
    }
    self.watermarks.lock().unwrap().push(watermark);
    Ok(())
  }

  async fn current_watermark(
    &self,
    table: FactTable,
  ) -> Result<Option<DateTime<Utc>>, FakeError> {
    Ok(self.watermarks_for(table).iter().map(|w| w.last_synced_at).max())
  }

  async fn latest_statuses(&self) -> Result<Vec<SyncStatus>, FakeError> {
    let mut latest: BTreeMap<String, Watermark> = BTreeMap::new();
    for w in self.watermarks() {
      latest.insert(w.table_name.clone(), w);
    }
    Ok(
      latest
        .into_values()
        .map(|w| SyncStatus {
          table_name:     w.table_name,
          last_synced_at: w.last_synced_at,
          rows_synced:    w.rows_synced,
          sync_type:      w.sync_type.to_string(),
        })
        .collect(),
    )
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

pub fn customer(id: &str, status: Option<&str>) -> SourceCustomer {
  SourceCustomer {
    id:         id.into(),
    name:       format!("Customer {id}"),
    phone:      None,
    email:      None,
    address:    None,
    status:     status.map(str::to_owned),
    updated_at: at(1),
  }
}

pub fn employee(id: &str) -> SourceEmployee {
  SourceEmployee {
    id:                id.into(),
    employee_code:     Some(format!("EMP-{id}")),
    employee_name:     format!("Employee {id}"),
    department:        None,
    position:          None,
    hire_date:         None,
    employment_status: Some("ACTIVE".into()),
    updated_at:        at(1),
  }
}

pub fn sales_order(id: &str, created_at: DateTime<Utc>) -> SourceSalesOrder {
  SourceSalesOrder {
    id: id.into(),
    transaction_date: created_at,
    customer_id: Some("c1".into()),
    customer_name: Some("Customer c1".into()),
    total_amount: 100_000.0,
    status: "confirmed".into(),
    created_at,
  }
}

pub fn pos_item(id: &str, created_at: DateTime<Utc>) -> SourcePosItem {
  SourcePosItem {
    id: id.into(),
    transaction_date: created_at,
    customer_name: "Walk-in Customer".into(),
    article_id: Some("a1".into()),
    product_code: Some("SKU-1".into()),
    product_name: Some("Batik Shirt".into()),
    cashier_id: None,
    quantity: 2,
    unit_price: 50_000.0,
    discount_pct: 0.0,
    tax_amount: 0.0,
    line_total: 100_000.0,
    order_total: 100_000.0,
    payment_method: "cash".into(),
    payment_status: "paid".into(),
    created_at,
  }
}

pub fn purchase_order_item(id: &str, created_at: DateTime<Utc>) -> SourcePurchaseOrderItem {
  SourcePurchaseOrderItem {
    id: id.into(),
    po_number: format!("PO-{id}"),
    transaction_date: created_at,
    supplier_id: Some("s1".into()),
    supplier_name: None,
    item_name: "Cotton roll".into(),
    created_by_id: None,
    quantity: 10,
    unit_price: 20_000.0,
    line_total: 200_000.0,
    received_quantity: 0,
    order_subtotal: 200_000.0,
    order_discount: 0.0,
    order_tax: 0.0,
    order_total: 200_000.0,
    status: "draft".into(),
    payment_status: "unpaid".into(),
    currency: "IDR".into(),
    payment_terms: "net30".into(),
    purchase_request_id: None,
    created_at,
  }
}

pub fn stock_movement(id: &str, created_at: DateTime<Utc>) -> SourceStockMovement {
  SourceStockMovement {
    id: id.into(),
    movement_date: created_at,
    article_id: Some("a1".into()),
    article_name: None,
    warehouse_id: Some("w1".into()),
    warehouse_name: None,
    movement_type: "in".into(),
    quantity: 5,
    reference_id: "PO-1".into(),
    created_at,
  }
}

pub fn journal_line(id: &str, created_at: DateTime<Utc>) -> SourceJournalLine {
  SourceJournalLine {
    id: id.into(),
    journal_entry_id: "je1".into(),
    entry_number: "JE-0001".into(),
    entry_date: created_at.date_naive(),
    account_id: Some("acc1".into()),
    account_code: "1100".into(),
    account_name: "Cash".into(),
    company_id: "co1".into(),
    description: "Opening balance".into(),
    debit_amount: 1_000.0,
    credit_amount: 0.0,
    currency_code: "IDR".into(),
    exchange_rate: 1.0,
    source_module: "manual".into(),
    source_id: String::new(),
    status: "posted".into(),
    created_at,
  }
}

pub fn attendance(id: &str, created_at: DateTime<Utc>) -> SourceAttendance {
  SourceAttendance {
    id: id.into(),
    attendance_date: created_at.date_naive(),
    employee_id: Some("e1".into()),
    employee_name: Some("Employee e1".into()),
    department: "Production".into(),
    clock_in: Some(created_at),
    clock_out: None,
    work_hours: 8.0,
    overtime_hours: 0.0,
    late_minutes: 0,
    early_out_minutes: 0,
    status: "present".into(),
    created_at,
  }
}

/// Rows in every fact source, with three sales orders and no POS lines.
pub fn busy_day() -> Fixture {
  Fixture {
    customers: vec![customer("c1", Some("active")), customer("c2", Some("suspended"))],
    employees: vec![employee("e1")],
    sales_orders: vec![
      sales_order("so1", at(9)),
      sales_order("so2", at(10)),
      sales_order("so3", at(11)),
    ],
    pos_items: Vec::new(),
    purchase_order_items: vec![purchase_order_item("poi1", at(9))],
    stock_movements: vec![stock_movement("sm1", at(9)), stock_movement("sm2", at(12))],
    journal_lines: vec![journal_line("jl1", at(9))],
    attendance: vec![attendance("at1", at(8))],
  }
}
