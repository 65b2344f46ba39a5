//! Extraction SQL for every source the pipeline reads.
//!
//! Nullable text with no downstream null representation is defaulted with
//! `COALESCE` here; the rest comes back as `NULL` and is coerced after
//! extraction. `?1` in a change filter is the watermark.

/// One extraction query, optionally narrowed to rows changed since a
/// watermark.
pub struct Extraction {
  /// Driving source table, used in error context.
  pub table:         &'static str,
  pub select:        &'static str,
  /// `None` for reference entities, which are always read in full.
  pub changed_since: Option<&'static str>,
  pub order_by:      &'static str,
}

impl Extraction {
  pub fn sql(&self, incremental: bool) -> String {
    match self.changed_since.filter(|_| incremental) {
      Some(filter) => format!("{}\nWHERE {}\nORDER BY {}", self.select, filter, self.order_by),
      None => format!("{}\nORDER BY {}", self.select, self.order_by),
    }
  }
}

// ─── Reference entities ──────────────────────────────────────────────────────

pub const CUSTOMERS: Extraction = Extraction {
  table:         "customers",
  select:        "SELECT id, COALESCE(name, '') AS name, phone, email, address, status,
         COALESCE(updated_at, created_at) AS updated_at
  FROM customers",
  changed_since: None,
  order_by:      "id",
};

pub const SUPPLIERS: Extraction = Extraction {
  table:         "suppliers",
  select:        "SELECT id, COALESCE(name, '') AS name, contact_person, phone, email,
         address, status, COALESCE(updated_at, created_at) AS updated_at
  FROM suppliers",
  changed_since: None,
  order_by:      "id",
};

pub const ARTICLES: Extraction = Extraction {
  table:         "articles",
  select:        "SELECT a.id, a.barcode, COALESCE(a.name, '') AS name, a.description,
         a.classification_id, COALESCE(cl.name, '') AS classification_name,
         a.color_id, COALESCE(co.name, '') AS color_name,
         a.model_id, COALESCE(m.name, '') AS model_name,
         COALESCE(a.price, 0) AS price,
         COALESCE(a.updated_at, a.created_at) AS updated_at
  FROM articles a
  LEFT JOIN classifications cl ON a.classification_id = cl.id
  LEFT JOIN colors co          ON a.color_id = co.id
  LEFT JOIN models m           ON a.model_id = m.id",
  changed_since: None,
  order_by:      "a.id",
};

pub const WAREHOUSES: Extraction = Extraction {
  table:         "warehouses",
  select:        "SELECT id, code, COALESCE(name, '') AS name, city, type, status,
         COALESCE(updated_at, created_at) AS updated_at
  FROM warehouses",
  changed_since: None,
  order_by:      "id",
};

pub const EMPLOYEES: Extraction = Extraction {
  table:         "employees",
  select:        "SELECT id, employee_code, COALESCE(employee_name, '') AS employee_name,
         department, position, hire_date, employment_status,
         COALESCE(updated_at, created_at) AS updated_at
  FROM employees",
  changed_since: None,
  order_by:      "id",
};

// ─── Transactions ────────────────────────────────────────────────────────────

pub const SALES_ORDERS: Extraction = Extraction {
  table:         "sales_orders",
  select:        "SELECT so.id,
         COALESCE(so.order_date, so.created_at) AS transaction_date,
         so.customer_id,
         COALESCE(c.name, '') AS customer_name,
         COALESCE(so.total_amount, 0) AS total_amount,
         COALESCE(so.status, '') AS status,
         so.created_at
  FROM sales_orders so
  LEFT JOIN customers c ON so.customer_id = c.id",
  changed_since: Some("julianday(so.updated_at) > julianday(?1)"),
  order_by:      "so.id",
};

pub const POS_ITEMS: Extraction = Extraction {
  table:         "pos_items",
  select:        "SELECT pi.id,
         COALESCE(pt.transaction_date, pt.created_at) AS transaction_date,
         COALESCE(pt.customer_name, '') AS customer_name,
         pi.article_id, pi.product_code, pi.product_name,
         pt.cashier_id,
         CAST(COALESCE(pi.quantity, 0) AS INTEGER) AS quantity,
         COALESCE(pi.unit_price, 0) AS unit_price,
         COALESCE(pi.discount_percentage, 0) AS discount_pct,
         COALESCE(pt.tax_amount, 0) AS tax_amount,
         COALESCE(pi.line_total, 0) AS line_total,
         COALESCE(pt.total_amount, 0) AS order_total,
         COALESCE(pt.payment_method, '') AS payment_method,
         COALESCE(pt.payment_status, '') AS payment_status,
         COALESCE(pi.created_at, pt.created_at) AS created_at
  FROM pos_items pi
  JOIN pos_transactions pt ON pi.pos_transaction_id = pt.id",
  changed_since: Some(
    "julianday(pi.updated_at) > julianday(?1) OR julianday(pt.updated_at) > julianday(?1)",
  ),
  order_by:      "pi.id",
};

pub const PURCHASE_ORDER_ITEMS: Extraction = Extraction {
  table:         "procurement_purchase_order_items",
  select:        "SELECT ppoi.id,
         COALESCE(ppo.po_number, '') AS po_number,
         COALESCE(ppo.order_date, ppo.created_at) AS transaction_date,
         ppo.supplier_id,
         COALESCE(s.name, '') AS supplier_name,
         COALESCE(ppoi.item_name, '') AS item_name,
         ppo.created_by AS created_by_id,
         CAST(COALESCE(ppoi.quantity, 0) AS INTEGER) AS quantity,
         COALESCE(ppoi.unit_price, 0) AS unit_price,
         COALESCE(ppoi.line_total, 0) AS line_total,
         CAST(COALESCE(ppoi.received_quantity, 0) AS INTEGER) AS received_quantity,
         COALESCE(ppo.subtotal, 0) AS order_subtotal,
         COALESCE(ppo.discount_amount, 0) AS order_discount,
         COALESCE(ppo.tax_amount, 0) AS order_tax,
         COALESCE(ppo.total_amount, 0) AS order_total,
         COALESCE(ppo.status, '') AS status,
         COALESCE(ppo.payment_status, '') AS payment_status,
         COALESCE(ppo.currency, 'IDR') AS currency,
         COALESCE(ppo.payment_terms, '') AS payment_terms,
         ppo.purchase_request_id,
         COALESCE(ppoi.created_at, ppo.created_at) AS created_at
  FROM procurement_purchase_order_items ppoi
  JOIN procurement_purchase_orders ppo ON ppoi.purchase_order_id = ppo.id
  LEFT JOIN suppliers s ON ppo.supplier_id = s.id",
  changed_since: Some(
    "julianday(ppoi.updated_at) > julianday(?1) OR julianday(ppo.updated_at) > julianday(?1)",
  ),
  order_by:      "ppoi.id",
};

pub const STOCK_MOVEMENTS: Extraction = Extraction {
  table:         "stock_movements",
  select:        "SELECT sm.id,
         COALESCE(sm.movement_date, sm.created_at) AS movement_date,
         sm.article_id,
         COALESCE(a.name, '') AS article_name,
         sm.warehouse_id,
         COALESCE(w.name, '') AS warehouse_name,
         COALESCE(sm.movement_type, '') AS movement_type,
         CAST(COALESCE(sm.quantity, 0) AS INTEGER) AS quantity,
         COALESCE(sm.reference_id, '') AS reference_id,
         sm.created_at
  FROM stock_movements sm
  LEFT JOIN articles a   ON sm.article_id = a.id
  LEFT JOIN warehouses w ON sm.warehouse_id = w.id",
  changed_since: Some("julianday(sm.updated_at) > julianday(?1)"),
  order_by:      "sm.id",
};

pub const JOURNAL_LINES: Extraction = Extraction {
  table:         "journal_entry_lines",
  select:        "SELECT jel.id, je.id AS journal_entry_id,
         COALESCE(je.entry_number, '') AS entry_number,
         je.entry_date,
         jel.account_id,
         COALESCE(coa.account_code, '') AS account_code,
         COALESCE(coa.account_name, '') AS account_name,
         COALESCE(je.company_id, '') AS company_id,
         COALESCE(jel.description, je.description, '') AS description,
         COALESCE(jel.debit_amount, 0) AS debit_amount,
         COALESCE(jel.credit_amount, 0) AS credit_amount,
         COALESCE(je.currency_code, 'IDR') AS currency_code,
         COALESCE(je.exchange_rate, 1) AS exchange_rate,
         COALESCE(je.source_module, '') AS source_module,
         COALESCE(je.source_id, '') AS source_id,
         COALESCE(je.status, '') AS status,
         COALESCE(jel.created_at, je.created_at) AS created_at
  FROM journal_entry_lines jel
  JOIN journal_entries je ON jel.journal_entry_id = je.id
  LEFT JOIN chart_of_accounts coa ON jel.account_id = coa.id",
  changed_since: Some(
    "julianday(jel.updated_at) > julianday(?1) OR julianday(je.updated_at) > julianday(?1)",
  ),
  order_by:      "jel.id",
};

pub const ATTENDANCE: Extraction = Extraction {
  table:         "daily_attendance_tracking",
  select:        "SELECT dat.id,
         dat.attendance_date,
         dat.employee_id,
         COALESCE(e.employee_name, '') AS employee_name,
         COALESCE(e.department, '') AS department,
         dat.actual_in AS clock_in,
         dat.actual_out AS clock_out,
         COALESCE(dat.work_hours, 0) AS work_hours,
         COALESCE(dat.overtime_hours, 0) AS overtime_hours,
         CAST(COALESCE(dat.late_minutes, 0) AS INTEGER) AS late_minutes,
         CAST(COALESCE(dat.early_out_minutes, 0) AS INTEGER) AS early_out_minutes,
         COALESCE(dat.status, '') AS status,
         COALESCE(dat.created_at, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')) AS created_at
  FROM daily_attendance_tracking dat
  LEFT JOIN employees e ON dat.employee_id = e.id",
  changed_since: Some("julianday(dat.updated_at) > julianday(?1)"),
  order_by:      "dat.id",
};
