//! Reference DDL for the operational tables the pipeline reads.
//!
//! The ERP owns its schema; this is the subset of columns the extraction
//! queries touch, used to stand up fixtures and local development databases.
//! Timestamps are ISO 8601 text in UTC.

/// Full reference DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS customers (
    id          TEXT PRIMARY KEY,
    name        TEXT,
    phone       TEXT,
    email       TEXT,
    address     TEXT,
    status      TEXT,            -- 'active' | 'suspended' | ...
    created_at  TEXT NOT NULL,
    updated_at  TEXT
);

CREATE TABLE IF NOT EXISTS suppliers (
    id              TEXT PRIMARY KEY,
    name            TEXT,
    contact_person  TEXT,
    phone           TEXT,
    email           TEXT,
    address         TEXT,
    status          TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT
);

CREATE TABLE IF NOT EXISTS classifications (
    id    TEXT PRIMARY KEY,
    name  TEXT
);

CREATE TABLE IF NOT EXISTS colors (
    id    TEXT PRIMARY KEY,
    name  TEXT
);

CREATE TABLE IF NOT EXISTS models (
    id    TEXT PRIMARY KEY,
    name  TEXT
);

CREATE TABLE IF NOT EXISTS articles (
    id                 TEXT PRIMARY KEY,
    barcode            TEXT,
    name               TEXT,
    description        TEXT,
    classification_id  TEXT REFERENCES classifications(id),
    color_id           TEXT REFERENCES colors(id),
    model_id           TEXT REFERENCES models(id),
    price              REAL,
    created_at         TEXT NOT NULL,
    updated_at         TEXT
);

CREATE TABLE IF NOT EXISTS warehouses (
    id          TEXT PRIMARY KEY,
    code        TEXT,
    name        TEXT,
    city        TEXT,
    type        TEXT,
    status      TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT
);

CREATE TABLE IF NOT EXISTS employees (
    id                 TEXT PRIMARY KEY,
    employee_code      TEXT,
    employee_name      TEXT,
    department         TEXT,
    position           TEXT,
    hire_date          TEXT,     -- YYYY-MM-DD
    employment_status  TEXT,     -- 'ACTIVE' | 'TERMINATED' | ...
    created_at         TEXT NOT NULL,
    updated_at         TEXT
);

CREATE TABLE IF NOT EXISTS sales_orders (
    id            TEXT PRIMARY KEY,
    order_date    TEXT,
    customer_id   TEXT REFERENCES customers(id),
    total_amount  REAL,
    status        TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT
);

CREATE TABLE IF NOT EXISTS pos_transactions (
    id                TEXT PRIMARY KEY,
    transaction_date  TEXT,
    customer_name     TEXT,
    cashier_id        TEXT,
    tax_amount        REAL,
    total_amount      REAL,
    payment_method    TEXT,
    payment_status    TEXT,
    created_at        TEXT NOT NULL,
    updated_at        TEXT
);

CREATE TABLE IF NOT EXISTS pos_items (
    id                   TEXT PRIMARY KEY,
    pos_transaction_id   TEXT NOT NULL REFERENCES pos_transactions(id),
    article_id           TEXT REFERENCES articles(id),
    product_code         TEXT,
    product_name         TEXT,
    quantity             INTEGER,
    unit_price           REAL,
    discount_percentage  REAL,
    line_total           REAL,
    created_at           TEXT,
    updated_at           TEXT
);

CREATE TABLE IF NOT EXISTS procurement_purchase_orders (
    id                   TEXT PRIMARY KEY,
    po_number            TEXT,
    order_date           TEXT,
    supplier_id          TEXT REFERENCES suppliers(id),
    created_by           TEXT,
    subtotal             REAL,
    discount_amount      REAL,
    tax_amount           REAL,
    total_amount         REAL,
    status               TEXT,
    payment_status       TEXT,
    currency             TEXT,
    payment_terms        TEXT,
    purchase_request_id  TEXT,
    created_at           TEXT NOT NULL,
    updated_at           TEXT
);

CREATE TABLE IF NOT EXISTS procurement_purchase_order_items (
    id                 TEXT PRIMARY KEY,
    purchase_order_id  TEXT NOT NULL REFERENCES procurement_purchase_orders(id),
    item_name          TEXT,
    quantity           INTEGER,
    unit_price         REAL,
    line_total         REAL,
    received_quantity  INTEGER,
    created_at         TEXT,
    updated_at         TEXT
);

CREATE TABLE IF NOT EXISTS stock_movements (
    id             TEXT PRIMARY KEY,
    movement_date  TEXT,
    article_id     TEXT REFERENCES articles(id),
    warehouse_id   TEXT REFERENCES warehouses(id),
    movement_type  TEXT,
    quantity       INTEGER,
    reference_id   TEXT,
    created_at     TEXT NOT NULL,
    updated_at     TEXT
);

CREATE TABLE IF NOT EXISTS chart_of_accounts (
    id            TEXT PRIMARY KEY,
    account_code  TEXT,
    account_name  TEXT
);

CREATE TABLE IF NOT EXISTS journal_entries (
    id             TEXT PRIMARY KEY,
    entry_number   TEXT,
    entry_date     TEXT NOT NULL,
    company_id     TEXT,
    description    TEXT,
    currency_code  TEXT,
    exchange_rate  REAL,
    source_module  TEXT,
    source_id      TEXT,
    status         TEXT,
    created_at     TEXT NOT NULL,
    updated_at     TEXT
);

CREATE TABLE IF NOT EXISTS journal_entry_lines (
    id                TEXT PRIMARY KEY,
    journal_entry_id  TEXT NOT NULL REFERENCES journal_entries(id),
    account_id        TEXT REFERENCES chart_of_accounts(id),
    description       TEXT,
    debit_amount      REAL,
    credit_amount     REAL,
    created_at        TEXT,
    updated_at        TEXT
);

CREATE TABLE IF NOT EXISTS daily_attendance_tracking (
    id                 TEXT PRIMARY KEY,
    employee_id        TEXT REFERENCES employees(id),
    attendance_date    TEXT NOT NULL,   -- YYYY-MM-DD
    actual_in          TEXT,
    actual_out         TEXT,
    work_hours         REAL,
    overtime_hours     REAL,
    late_minutes       INTEGER,
    early_out_minutes  INTEGER,
    status             TEXT,
    created_at         TEXT,
    updated_at         TEXT
);
";
