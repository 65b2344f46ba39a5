//! Star-schema DDL and the migration runner.
//!
//! Applied versions are tracked in `schema_version`; every open runs the
//! migrations that are missing.

use duckdb::Connection;

use crate::{Error, Result};

pub struct Migration {
  pub version: i32,
  pub sql:     &'static str,
}

pub const MIGRATIONS: &[Migration] = &[Migration { version: 1, sql: V001_STAR_SCHEMA }];

const V001_STAR_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS dim_customer (
    id             VARCHAR PRIMARY KEY,
    name           VARCHAR   NOT NULL,
    phone          VARCHAR   NOT NULL,
    email          VARCHAR   NOT NULL,
    address        VARCHAR   NOT NULL,
    city           VARCHAR   NOT NULL,
    customer_type  VARCHAR   NOT NULL,
    is_active      BOOLEAN   NOT NULL,
    updated_at     TIMESTAMP NOT NULL,
    _version       UBIGINT   NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_supplier (
    id              VARCHAR PRIMARY KEY,
    name            VARCHAR   NOT NULL,
    contact_person  VARCHAR   NOT NULL,
    phone           VARCHAR   NOT NULL,
    email           VARCHAR   NOT NULL,
    address         VARCHAR   NOT NULL,
    city            VARCHAR   NOT NULL,
    supplier_type   VARCHAR   NOT NULL,
    is_active       BOOLEAN   NOT NULL,
    updated_at      TIMESTAMP NOT NULL,
    _version        UBIGINT   NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_article (
    id                   VARCHAR PRIMARY KEY,
    code                 VARCHAR   NOT NULL,
    name                 VARCHAR   NOT NULL,
    description          VARCHAR   NOT NULL,
    classification_id    VARCHAR   NOT NULL,
    classification_name  VARCHAR   NOT NULL,
    color_id             VARCHAR   NOT NULL,
    color_name           VARCHAR   NOT NULL,
    model_id             VARCHAR   NOT NULL,
    model_name           VARCHAR   NOT NULL,
    price                DOUBLE    NOT NULL,
    cost                 DOUBLE    NOT NULL,
    category             VARCHAR   NOT NULL,
    is_active            BOOLEAN   NOT NULL,
    updated_at           TIMESTAMP NOT NULL,
    _version             UBIGINT   NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_warehouse (
    id              VARCHAR PRIMARY KEY,
    code            VARCHAR   NOT NULL,
    name            VARCHAR   NOT NULL,
    location        VARCHAR   NOT NULL,
    warehouse_type  VARCHAR   NOT NULL,
    is_active       BOOLEAN   NOT NULL,
    updated_at      TIMESTAMP NOT NULL,
    _version        UBIGINT   NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_employee (
    id             VARCHAR PRIMARY KEY,
    employee_code  VARCHAR   NOT NULL,
    full_name      VARCHAR   NOT NULL,
    department     VARCHAR   NOT NULL,
    position       VARCHAR   NOT NULL,
    hire_date      DATE      NOT NULL,
    is_active      BOOLEAN   NOT NULL,
    updated_at     TIMESTAMP NOT NULL,
    _version       UBIGINT   NOT NULL
);

CREATE TABLE IF NOT EXISTS sales_fact (
    id                VARCHAR   NOT NULL,
    source_type       VARCHAR   NOT NULL,   -- 'sales_order' | 'pos'
    transaction_date  TIMESTAMP NOT NULL,
    customer_id       VARCHAR   NOT NULL,
    customer_name     VARCHAR   NOT NULL,
    article_id        VARCHAR   NOT NULL,
    article_code      VARCHAR   NOT NULL,
    article_name      VARCHAR   NOT NULL,
    warehouse_id      VARCHAR   NOT NULL,
    warehouse_name    VARCHAR   NOT NULL,
    cashier_id        VARCHAR   NOT NULL,
    quantity          BIGINT    NOT NULL,
    unit_price        DOUBLE    NOT NULL,
    discount_amount   DOUBLE    NOT NULL,
    tax_amount        DOUBLE    NOT NULL,
    line_total        DOUBLE    NOT NULL,
    order_total       DOUBLE    NOT NULL,
    status            VARCHAR   NOT NULL,
    payment_method    VARCHAR   NOT NULL,
    payment_status    VARCHAR   NOT NULL,
    channel           VARCHAR   NOT NULL,
    created_at        TIMESTAMP NOT NULL,
    PRIMARY KEY (source_type, id)
);

CREATE TABLE IF NOT EXISTS procurement_fact (
    id                   VARCHAR PRIMARY KEY,
    po_number            VARCHAR   NOT NULL,
    transaction_date     TIMESTAMP NOT NULL,
    supplier_id          VARCHAR   NOT NULL,
    supplier_name        VARCHAR   NOT NULL,
    article_id           VARCHAR   NOT NULL,
    article_name         VARCHAR   NOT NULL,
    created_by_id        VARCHAR   NOT NULL,
    quantity             BIGINT    NOT NULL,
    unit_price           DOUBLE    NOT NULL,
    line_total           DOUBLE    NOT NULL,
    received_quantity    BIGINT    NOT NULL,
    order_subtotal       DOUBLE    NOT NULL,
    order_discount       DOUBLE    NOT NULL,
    order_tax            DOUBLE    NOT NULL,
    order_total          DOUBLE    NOT NULL,
    status               VARCHAR   NOT NULL,
    payment_status       VARCHAR   NOT NULL,
    currency             VARCHAR   NOT NULL,
    payment_terms        VARCHAR   NOT NULL,
    purchase_request_id  VARCHAR   NOT NULL,
    created_at           TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS inventory_movement_fact (
    id              VARCHAR PRIMARY KEY,
    movement_date   TIMESTAMP NOT NULL,
    article_id      VARCHAR   NOT NULL,
    article_code    VARCHAR   NOT NULL,
    article_name    VARCHAR   NOT NULL,
    warehouse_id    VARCHAR   NOT NULL,
    warehouse_name  VARCHAR   NOT NULL,
    quantity        BIGINT    NOT NULL,
    unit_cost       DOUBLE    NOT NULL,
    total_value     DOUBLE    NOT NULL,
    movement_type   VARCHAR   NOT NULL,
    reference_id    VARCHAR   NOT NULL,
    reference_type  VARCHAR   NOT NULL,
    created_at      TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS financial_transaction_fact (
    id                VARCHAR PRIMARY KEY,
    journal_entry_id  VARCHAR   NOT NULL,
    entry_number      VARCHAR   NOT NULL,
    entry_date        DATE      NOT NULL,
    account_id        VARCHAR   NOT NULL,
    account_code      VARCHAR   NOT NULL,
    account_name      VARCHAR   NOT NULL,
    company_id        VARCHAR   NOT NULL,
    debit_amount      DOUBLE    NOT NULL,
    credit_amount     DOUBLE    NOT NULL,
    status            VARCHAR   NOT NULL,
    source_module     VARCHAR   NOT NULL,
    source_id         VARCHAR   NOT NULL,
    description       VARCHAR   NOT NULL,
    currency_code     VARCHAR   NOT NULL,
    exchange_rate     DOUBLE    NOT NULL,
    created_at        TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS attendance_fact (
    id                 VARCHAR PRIMARY KEY,
    attendance_date    DATE      NOT NULL,
    employee_id        VARCHAR   NOT NULL,
    employee_name      VARCHAR   NOT NULL,
    department         VARCHAR   NOT NULL,
    clock_in           TIMESTAMP NOT NULL,
    clock_out          TIMESTAMP NOT NULL,
    work_hours         DOUBLE    NOT NULL,
    overtime_hours     DOUBLE    NOT NULL,
    late_minutes       BIGINT    NOT NULL,
    early_out_minutes  BIGINT    NOT NULL,
    status             VARCHAR   NOT NULL,
    source             VARCHAR   NOT NULL,
    location           VARCHAR   NOT NULL,
    created_at         TIMESTAMP NOT NULL
);

-- Append-only; the current watermark is derived, never stored.
CREATE TABLE IF NOT EXISTS sync_watermarks (
    table_name      VARCHAR   NOT NULL,
    last_synced_at  TIMESTAMP NOT NULL,
    rows_synced     UBIGINT   NOT NULL,
    sync_type       VARCHAR   NOT NULL,
    recorded_at     TIMESTAMP NOT NULL
);
";

fn ensure_version_table(conn: &Connection) -> Result<()> {
  conn
    .execute_batch(
      "CREATE TABLE IF NOT EXISTS schema_version (
           version     INTEGER   NOT NULL,
           applied_at  TIMESTAMP NOT NULL DEFAULT now()
       );",
    )
    .map_err(|source| Error::Query { context: "create schema_version", source })
}

fn current_version(conn: &Connection) -> Result<i32> {
  conn
    .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
      row.get(0)
    })
    .map_err(|source| Error::Query { context: "read schema version", source })
}

/// Apply every migration newer than the recorded version.
pub fn run_migrations(conn: &Connection) -> Result<()> {
  ensure_version_table(conn)?;
  let current = current_version(conn)?;

  for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
    tracing::debug!(version = migration.version, "applying analytical migration");
    let version = migration.version;
    conn
      .execute_batch(migration.sql)
      .and_then(|()| {
        conn.execute("INSERT INTO schema_version (version) VALUES (?)", duckdb::params![version])
      })
      .map_err(|source| Error::Migration { version, source })?;
  }
  Ok(())
}
