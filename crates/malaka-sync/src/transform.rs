//! Pure mappings from extraction records to star-schema rows.
//!
//! Every function is total: nullable text becomes `""`, nullable instants
//! become the epoch, and nothing here can fail.

use malaka_core::{
  coerce::{is_active, null_date, null_str, null_time, version_of},
  row::{
    AttendanceFact, DimArticle, DimCustomer, DimEmployee, DimSupplier,
    DimWarehouse, FinancialTransactionFact, InventoryMovementFact,
    ProcurementFact, SalesFact, SalesSource,
  },
  source::{
    SourceArticle, SourceAttendance, SourceCustomer, SourceEmployee,
    SourceJournalLine, SourcePosItem, SourcePurchaseOrderItem,
    SourceSalesOrder, SourceStockMovement, SourceSupplier, SourceWarehouse,
  },
};

/// Status literal meaning "active" for customers, suppliers and warehouses.
pub const ACTIVE: &str = "active";
/// Employees use an upper-case employment status.
pub const EMPLOYEE_ACTIVE: &str = "ACTIVE";

/// POS lines are recorded once the sale is rung up.
const POS_STATUS: &str = "completed";
const ATTENDANCE_SOURCE: &str = "system";

// ─── Dimensions ──────────────────────────────────────────────────────────────

pub fn customer(c: SourceCustomer) -> DimCustomer {
  DimCustomer {
    is_active:     is_active(c.status.as_deref(), ACTIVE),
    version:       version_of(c.updated_at),
    id:            c.id,
    name:          c.name,
    phone:         null_str(c.phone),
    email:         null_str(c.email),
    address:       null_str(c.address),
    city:          String::new(),
    customer_type: String::new(),
    updated_at:    c.updated_at,
  }
}

pub fn supplier(s: SourceSupplier) -> DimSupplier {
  DimSupplier {
    is_active:      is_active(s.status.as_deref(), ACTIVE),
    version:        version_of(s.updated_at),
    id:             s.id,
    name:           s.name,
    contact_person: null_str(s.contact_person),
    phone:          null_str(s.phone),
    email:          null_str(s.email),
    address:        null_str(s.address),
    city:           String::new(),
    supplier_type:  String::new(),
    updated_at:     s.updated_at,
  }
}

/// Articles carry no status column and are always active. The
/// classification doubles as the category.
pub fn article(a: SourceArticle) -> DimArticle {
  let classification_name = null_str(a.classification_name);
  DimArticle {
    version: version_of(a.updated_at),
    id: a.id,
    code: null_str(a.barcode),
    name: a.name,
    description: null_str(a.description),
    classification_id: null_str(a.classification_id),
    category: classification_name.clone(),
    classification_name,
    color_id: null_str(a.color_id),
    color_name: null_str(a.color_name),
    model_id: null_str(a.model_id),
    model_name: null_str(a.model_name),
    price: a.price,
    cost: 0.0,
    is_active: true,
    updated_at: a.updated_at,
  }
}

pub fn warehouse(w: SourceWarehouse) -> DimWarehouse {
  DimWarehouse {
    is_active:      is_active(w.status.as_deref(), ACTIVE),
    version:        version_of(w.updated_at),
    id:             w.id,
    code:           null_str(w.code),
    name:           w.name,
    location:       null_str(w.city),
    warehouse_type: null_str(w.warehouse_type),
    updated_at:     w.updated_at,
  }
}

pub fn employee(e: SourceEmployee) -> DimEmployee {
  DimEmployee {
    is_active:     is_active(e.employment_status.as_deref(), EMPLOYEE_ACTIVE),
    version:       version_of(e.updated_at),
    id:            e.id,
    employee_code: null_str(e.employee_code),
    full_name:     e.employee_name,
    department:    null_str(e.department),
    position:      null_str(e.position),
    hire_date:     null_date(e.hire_date),
    updated_at:    e.updated_at,
  }
}

// ─── Facts ───────────────────────────────────────────────────────────────────

/// A sales order is a single line: quantity one at the order total.
pub fn sales_order(o: SourceSalesOrder) -> SalesFact {
  SalesFact {
    id:               o.id,
    source_type:      SalesSource::SalesOrder,
    transaction_date: o.transaction_date,
    customer_id:      null_str(o.customer_id),
    customer_name:    null_str(o.customer_name),
    article_id:       String::new(),
    article_code:     String::new(),
    article_name:     String::new(),
    warehouse_id:     String::new(),
    warehouse_name:   String::new(),
    cashier_id:       String::new(),
    quantity:         1,
    unit_price:       o.total_amount,
    discount_amount:  0.0,
    tax_amount:       0.0,
    line_total:       o.total_amount,
    order_total:      o.total_amount,
    status:           o.status,
    payment_method:   String::new(),
    payment_status:   String::new(),
    channel:          SalesSource::SalesOrder.to_string(),
    created_at:       o.created_at,
  }
}

/// `discount_amount` carries the line's discount percentage.
pub fn pos_item(p: SourcePosItem) -> SalesFact {
  SalesFact {
    id:               p.id,
    source_type:      SalesSource::Pos,
    transaction_date: p.transaction_date,
    customer_id:      String::new(),
    customer_name:    p.customer_name,
    article_id:       null_str(p.article_id),
    article_code:     null_str(p.product_code),
    article_name:     null_str(p.product_name),
    warehouse_id:     String::new(),
    warehouse_name:   String::new(),
    cashier_id:       null_str(p.cashier_id),
    quantity:         p.quantity,
    unit_price:       p.unit_price,
    discount_amount:  p.discount_pct,
    tax_amount:       p.tax_amount,
    line_total:       p.line_total,
    order_total:      p.order_total,
    status:           POS_STATUS.to_owned(),
    payment_method:   p.payment_method,
    payment_status:   p.payment_status,
    channel:          SalesSource::Pos.to_string(),
    created_at:       p.created_at,
  }
}

pub fn purchase_order_item(i: SourcePurchaseOrderItem) -> ProcurementFact {
  ProcurementFact {
    id:                  i.id,
    po_number:           i.po_number,
    transaction_date:    i.transaction_date,
    supplier_id:         null_str(i.supplier_id),
    supplier_name:       null_str(i.supplier_name),
    article_id:          String::new(),
    article_name:        i.item_name,
    created_by_id:       null_str(i.created_by_id),
    quantity:            i.quantity,
    unit_price:          i.unit_price,
    line_total:          i.line_total,
    received_quantity:   i.received_quantity,
    order_subtotal:      i.order_subtotal,
    order_discount:      i.order_discount,
    order_tax:           i.order_tax,
    order_total:         i.order_total,
    status:              i.status,
    payment_status:      i.payment_status,
    currency:            i.currency,
    payment_terms:       i.payment_terms,
    purchase_request_id: null_str(i.purchase_request_id),
    created_at:          i.created_at,
  }
}

/// Stock movements have no valuation or separate reference type.
pub fn stock_movement(m: SourceStockMovement) -> InventoryMovementFact {
  InventoryMovementFact {
    id:             m.id,
    movement_date:  m.movement_date,
    article_id:     null_str(m.article_id),
    article_code:   String::new(),
    article_name:   null_str(m.article_name),
    warehouse_id:   null_str(m.warehouse_id),
    warehouse_name: null_str(m.warehouse_name),
    quantity:       m.quantity,
    unit_cost:      0.0,
    total_value:    0.0,
    reference_type: m.movement_type.clone(),
    movement_type:  m.movement_type,
    reference_id:   m.reference_id,
    created_at:     m.created_at,
  }
}

pub fn journal_line(l: SourceJournalLine) -> FinancialTransactionFact {
  FinancialTransactionFact {
    id:               l.id,
    journal_entry_id: l.journal_entry_id,
    entry_number:     l.entry_number,
    entry_date:       l.entry_date,
    account_id:       null_str(l.account_id),
    account_code:     l.account_code,
    account_name:     l.account_name,
    company_id:       l.company_id,
    debit_amount:     l.debit_amount,
    credit_amount:    l.credit_amount,
    status:           l.status,
    source_module:    l.source_module,
    source_id:        l.source_id,
    description:      l.description,
    currency_code:    l.currency_code,
    exchange_rate:    l.exchange_rate,
    created_at:       l.created_at,
  }
}

pub fn attendance(a: SourceAttendance) -> AttendanceFact {
  AttendanceFact {
    id:                a.id,
    attendance_date:   a.attendance_date,
    employee_id:       null_str(a.employee_id),
    employee_name:     null_str(a.employee_name),
    department:        a.department,
    clock_in:          null_time(a.clock_in),
    clock_out:         null_time(a.clock_out),
    work_hours:        a.work_hours,
    overtime_hours:    a.overtime_hours,
    late_minutes:      a.late_minutes,
    early_out_minutes: a.early_out_minutes,
    status:            a.status,
    source:            ATTENDANCE_SOURCE.to_owned(),
    location:          String::new(),
    created_at:        a.created_at,
  }
}

#[cfg(test)]
mod tests {
  use chrono::{DateTime, NaiveDate, Utc};
  use malaka_core::coerce::EPOCH;

  use super::*;

  fn t(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
  }

  fn source_customer(id: &str, status: Option<&str>) -> SourceCustomer {
    SourceCustomer {
      id:         id.into(),
      name:       "Budi".into(),
      phone:      None,
      email:      Some("budi@example.com".into()),
      address:    None,
      status:     status.map(Into::into),
      updated_at: t("2024-03-15T08:00:00.250Z"),
    }
  }

  #[test]
  fn customer_status_drives_is_active() {
    assert!(customer(source_customer("c1", Some("active"))).is_active);
    assert!(!customer(source_customer("c2", Some("suspended"))).is_active);
    assert!(customer(source_customer("c3", None)).is_active);
    assert!(!customer(source_customer("c4", Some("ACTIVE"))).is_active, "case is exact");
  }

  #[test]
  fn customer_coerces_absent_text() {
    let row = customer(source_customer("c1", None));
    assert_eq!(row.phone, "");
    assert_eq!(row.address, "");
    assert_eq!(row.email, "budi@example.com");
    assert_eq!(row.city, "");
    assert_eq!(row.version, 1_710_489_600_250);
  }

  #[test]
  fn employee_uses_upper_case_literal_and_epoch_hire_date() {
    let src = SourceEmployee {
      id:                "e1".into(),
      employee_code:     None,
      employee_name:     "Sari".into(),
      department:        Some("Ops".into()),
      position:          None,
      hire_date:         None,
      employment_status: Some("ACTIVE".into()),
      updated_at:        EPOCH,
    };
    let row = employee(src.clone());
    assert!(row.is_active);
    assert_eq!(row.full_name, "Sari");
    assert_eq!(row.hire_date, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    assert_eq!(row.version, 0);

    let terminated = employee(SourceEmployee {
      employment_status: Some("active".into()),
      ..src
    });
    assert!(!terminated.is_active);
  }

  #[test]
  fn article_category_is_classification() {
    let row = article(SourceArticle {
      id:                  "a1".into(),
      barcode:             Some("899001".into()),
      name:                "Runner".into(),
      description:         None,
      classification_id:   Some("cl1".into()),
      classification_name: Some("Shoes".into()),
      color_id:            None,
      color_name:          None,
      model_id:            None,
      model_name:          None,
      price:               250_000.0,
      updated_at:          EPOCH,
    });
    assert_eq!(row.code, "899001");
    assert_eq!(row.category, "Shoes");
    assert_eq!(row.classification_name, "Shoes");
    assert_eq!(row.cost, 0.0);
    assert!(row.is_active);
  }

  #[test]
  fn sales_order_is_single_unit_line() {
    let row = sales_order(SourceSalesOrder {
      id:               "so1".into(),
      transaction_date: t("2024-03-01T10:00:00Z"),
      customer_id:      None,
      customer_name:    Some("Budi".into()),
      total_amount:     125.5,
      status:           "confirmed".into(),
      created_at:       t("2024-03-01T10:00:00Z"),
    });
    assert_eq!(row.source_type, SalesSource::SalesOrder);
    assert_eq!(row.channel, "sales_order");
    assert_eq!(row.quantity, 1);
    assert_eq!(row.unit_price, 125.5);
    assert_eq!(row.line_total, 125.5);
    assert_eq!(row.order_total, 125.5);
    assert_eq!(row.customer_id, "");
  }

  #[test]
  fn pos_item_is_completed_with_discount_pct() {
    let row = pos_item(SourcePosItem {
      id:               "pi1".into(),
      transaction_date: t("2024-03-01T10:00:00Z"),
      customer_name:    "Walk-in".into(),
      article_id:       Some("a1".into()),
      product_code:     Some("SKU-1".into()),
      product_name:     None,
      cashier_id:       None,
      quantity:         2,
      unit_price:       50.0,
      discount_pct:     10.0,
      tax_amount:       9.0,
      line_total:       90.0,
      order_total:      99.0,
      payment_method:   "cash".into(),
      payment_status:   "paid".into(),
      created_at:       t("2024-03-01T10:00:00Z"),
    });
    assert_eq!(row.status, "completed");
    assert_eq!(row.channel, "pos");
    assert_eq!(row.discount_amount, 10.0);
    assert_eq!(row.article_code, "SKU-1");
    assert_eq!(row.article_name, "");
    assert_eq!(row.customer_id, "");
  }

  #[test]
  fn journal_line_keeps_entry_day() {
    let row = journal_line(SourceJournalLine {
      id:               "l1".into(),
      journal_entry_id: "je1".into(),
      entry_number:     "JE-1".into(),
      entry_date:       NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
      account_id:       None,
      account_code:     "1100".into(),
      account_name:     "Cash".into(),
      company_id:       String::new(),
      description:      "Rent".into(),
      debit_amount:     100.0,
      credit_amount:    0.0,
      currency_code:    "IDR".into(),
      exchange_rate:    1.0,
      source_module:    String::new(),
      source_id:        String::new(),
      status:           "posted".into(),
      created_at:       t("2024-03-15T14:27:31Z"),
    });
    assert_eq!(row.entry_date.to_string(), "2024-03-15");
    assert_eq!(row.account_id, "");
  }

  #[test]
  fn stock_movement_reference_type_mirrors_movement_type() {
    let row = stock_movement(SourceStockMovement {
      id:             "m1".into(),
      movement_date:  EPOCH,
      article_id:     None,
      article_name:   None,
      warehouse_id:   Some("w1".into()),
      warehouse_name: Some("Main".into()),
      movement_type:  "transfer_in".into(),
      quantity:       -4,
      reference_id:   "TR-9".into(),
      created_at:     EPOCH,
    });
    assert_eq!(row.reference_type, "transfer_in");
    assert_eq!(row.movement_type, "transfer_in");
    assert_eq!(row.total_value, 0.0);
    assert_eq!(row.article_id, "");
  }

  #[test]
  fn attendance_missing_clock_times_are_epoch() {
    let row = attendance(SourceAttendance {
      id:                "d1".into(),
      attendance_date:   NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
      employee_id:       Some("e1".into()),
      employee_name:     None,
      department:        "Ops".into(),
      clock_in:          Some(t("2024-03-15T08:05:00Z")),
      clock_out:         None,
      work_hours:        0.0,
      overtime_hours:    0.0,
      late_minutes:      5,
      early_out_minutes: 0,
      status:            "present".into(),
      created_at:        t("2024-03-15T08:05:00Z"),
    });
    assert_eq!(row.clock_in, t("2024-03-15T08:05:00Z"));
    assert_eq!(row.clock_out.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    assert_eq!(row.source, "system");
    assert_eq!(row.location, "");
    assert_eq!(row.employee_name, "");
  }
}
