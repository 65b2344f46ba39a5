//! [`SqliteOperationalStore`], the SQLite implementation of
//! [`OperationalStore`].

use std::path::Path;

use malaka_core::{
  source::{
    SourceArticle, SourceAttendance, SourceCustomer, SourceEmployee,
    SourceJournalLine, SourcePosItem, SourcePurchaseOrderItem,
    SourceSalesOrder, SourceStockMovement, SourceSupplier, SourceWarehouse,
  },
  store::{OperationalStore, Since},
};

use crate::{
  Error, Result,
  encode::{SqlDate, encode_dt, opt_time_at, time_at},
  queries::{self, Extraction},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Read-only extraction over an ERP database file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteOperationalStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteOperationalStore {
  /// Open an existing database at `path`. The schema is owned by the ERP and
  /// is not touched.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self { conn })
  }

  /// Open an in-memory database with the reference schema applied.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Create any missing reference tables. Used for local development
  /// databases.
  pub async fn ensure_schema(&self) -> Result<()> {
    self.execute_batch(SCHEMA).await
  }

  /// Run arbitrary statements, e.g. to seed fixtures.
  pub async fn execute_batch(&self, sql: impl Into<String>) -> Result<()> {
    let sql = sql.into();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `query`, narrowed to `since` when given, mapping each row with
  /// `map`.
  async fn fetch<T, F>(
    &self,
    query: &Extraction,
    since: Since,
    map: F,
  ) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let table = query.table;
    let sql = query.sql(since.is_some());
    let param = since.map(encode_dt);

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(param.iter()), |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(|source| Error::Fetch { table, source })
  }
}

// ─── OperationalStore impl ───────────────────────────────────────────────────

impl OperationalStore for SqliteOperationalStore {
  type Error = Error;

  async fn customers(&self) -> Result<Vec<SourceCustomer>> {
    self
      .fetch(&queries::CUSTOMERS, None, |r| {
        Ok(SourceCustomer {
          id:         r.get(0)?,
          name:       r.get(1)?,
          phone:      r.get(2)?,
          email:      r.get(3)?,
          address:    r.get(4)?,
          status:     r.get(5)?,
          updated_at: time_at(r, 6)?,
        })
      })
      .await
  }

  async fn suppliers(&self) -> Result<Vec<SourceSupplier>> {
    self
      .fetch(&queries::SUPPLIERS, None, |r| {
        Ok(SourceSupplier {
          id:             r.get(0)?,
          name:           r.get(1)?,
          contact_person: r.get(2)?,
          phone:          r.get(3)?,
          email:          r.get(4)?,
          address:        r.get(5)?,
          status:         r.get(6)?,
          updated_at:     time_at(r, 7)?,
        })
      })
      .await
  }

  async fn articles(&self) -> Result<Vec<SourceArticle>> {
    self
      .fetch(&queries::ARTICLES, None, |r| {
        Ok(SourceArticle {
          id:                  r.get(0)?,
          barcode:             r.get(1)?,
          name:                r.get(2)?,
          description:         r.get(3)?,
          classification_id:   r.get(4)?,
          classification_name: r.get(5)?,
          color_id:            r.get(6)?,
          color_name:          r.get(7)?,
          model_id:            r.get(8)?,
          model_name:          r.get(9)?,
          price:               r.get(10)?,
          updated_at:          time_at(r, 11)?,
        })
      })
      .await
  }

  async fn warehouses(&self) -> Result<Vec<SourceWarehouse>> {
    self
      .fetch(&queries::WAREHOUSES, None, |r| {
        Ok(SourceWarehouse {
          id:             r.get(0)?,
          code:           r.get(1)?,
          name:           r.get(2)?,
          city:           r.get(3)?,
          warehouse_type: r.get(4)?,
          status:         r.get(5)?,
          updated_at:     time_at(r, 6)?,
        })
      })
      .await
  }

  async fn employees(&self) -> Result<Vec<SourceEmployee>> {
    self
      .fetch(&queries::EMPLOYEES, None, |r| {
        Ok(SourceEmployee {
          id:                r.get(0)?,
          employee_code:     r.get(1)?,
          employee_name:     r.get(2)?,
          department:        r.get(3)?,
          position:          r.get(4)?,
          hire_date:         r.get::<_, Option<SqlDate>>(5)?.map(|d| d.0),
          employment_status: r.get(6)?,
          updated_at:        time_at(r, 7)?,
        })
      })
      .await
  }

  async fn sales_orders(&self, since: Since) -> Result<Vec<SourceSalesOrder>> {
    self
      .fetch(&queries::SALES_ORDERS, since, |r| {
        Ok(SourceSalesOrder {
          id:               r.get(0)?,
          transaction_date: time_at(r, 1)?,
          customer_id:      r.get(2)?,
          customer_name:    r.get(3)?,
          total_amount:     r.get(4)?,
          status:           r.get(5)?,
          created_at:       time_at(r, 6)?,
        })
      })
      .await
  }

  async fn pos_items(&self, since: Since) -> Result<Vec<SourcePosItem>> {
    self
      .fetch(&queries::POS_ITEMS, since, |r| {
        Ok(SourcePosItem {
          id:               r.get(0)?,
          transaction_date: time_at(r, 1)?,
          customer_name:    r.get(2)?,
          article_id:       r.get(3)?,
          product_code:     r.get(4)?,
          product_name:     r.get(5)?,
          cashier_id:       r.get(6)?,
          quantity:         r.get(7)?,
          unit_price:       r.get(8)?,
          discount_pct:     r.get(9)?,
          tax_amount:       r.get(10)?,
          line_total:       r.get(11)?,
          order_total:      r.get(12)?,
          payment_method:   r.get(13)?,
          payment_status:   r.get(14)?,
          created_at:       time_at(r, 15)?,
        })
      })
      .await
  }

  async fn purchase_order_items(
    &self,
    since: Since,
  ) -> Result<Vec<SourcePurchaseOrderItem>> {
    self
      .fetch(&queries::PURCHASE_ORDER_ITEMS, since, |r| {
        Ok(SourcePurchaseOrderItem {
          id:                  r.get(0)?,
          po_number:           r.get(1)?,
          transaction_date:    time_at(r, 2)?,
          supplier_id:         r.get(3)?,
          supplier_name:       r.get(4)?,
          item_name:           r.get(5)?,
          created_by_id:       r.get(6)?,
          quantity:            r.get(7)?,
          unit_price:          r.get(8)?,
          line_total:          r.get(9)?,
          received_quantity:   r.get(10)?,
          order_subtotal:      r.get(11)?,
          order_discount:      r.get(12)?,
          order_tax:           r.get(13)?,
          order_total:         r.get(14)?,
          status:              r.get(15)?,
          payment_status:      r.get(16)?,
          currency:            r.get(17)?,
          payment_terms:       r.get(18)?,
          purchase_request_id: r.get(19)?,
          created_at:          time_at(r, 20)?,
        })
      })
      .await
  }

  async fn stock_movements(&self, since: Since) -> Result<Vec<SourceStockMovement>> {
    self
      .fetch(&queries::STOCK_MOVEMENTS, since, |r| {
        Ok(SourceStockMovement {
          id:             r.get(0)?,
          movement_date:  time_at(r, 1)?,
          article_id:     r.get(2)?,
          article_name:   r.get(3)?,
          warehouse_id:   r.get(4)?,
          warehouse_name: r.get(5)?,
          movement_type:  r.get(6)?,
          quantity:       r.get(7)?,
          reference_id:   r.get(8)?,
          created_at:     time_at(r, 9)?,
        })
      })
      .await
  }

  async fn journal_lines(&self, since: Since) -> Result<Vec<SourceJournalLine>> {
    self
      .fetch(&queries::JOURNAL_LINES, since, |r| {
        Ok(SourceJournalLine {
          id:               r.get(0)?,
          journal_entry_id: r.get(1)?,
          entry_number:     r.get(2)?,
          entry_date:       r.get::<_, SqlDate>(3)?.0,
          account_id:       r.get(4)?,
          account_code:     r.get(5)?,
          account_name:     r.get(6)?,
          company_id:       r.get(7)?,
          description:      r.get(8)?,
          debit_amount:     r.get(9)?,
          credit_amount:    r.get(10)?,
          currency_code:    r.get(11)?,
          exchange_rate:    r.get(12)?,
          source_module:    r.get(13)?,
          source_id:        r.get(14)?,
          status:           r.get(15)?,
          created_at:       time_at(r, 16)?,
        })
      })
      .await
  }

  async fn attendance(&self, since: Since) -> Result<Vec<SourceAttendance>> {
    self
      .fetch(&queries::ATTENDANCE, since, |r| {
        Ok(SourceAttendance {
          id:                r.get(0)?,
          attendance_date:   r.get::<_, SqlDate>(1)?.0,
          employee_id:       r.get(2)?,
          employee_name:     r.get(3)?,
          department:        r.get(4)?,
          clock_in:          opt_time_at(r, 5)?,
          clock_out:         opt_time_at(r, 6)?,
          work_hours:        r.get(7)?,
          overtime_hours:    r.get(8)?,
          late_minutes:      r.get(9)?,
          early_out_minutes: r.get(10)?,
          status:            r.get(11)?,
          created_at:        time_at(r, 12)?,
        })
      })
      .await
  }
}
