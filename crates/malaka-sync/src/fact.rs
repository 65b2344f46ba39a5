//! Full or incremental sync of the five fact tables.

use std::{future::Future, sync::Arc};

use malaka_core::{
  row::AnalyticalRow,
  store::{AnalyticalStore, OperationalStore, Since},
  watermark::FactTable,
};

use crate::{Error, Result, copy::copy, transform};

/// Extracts transactional rows, optionally only those changed after a
/// watermark, and loads them into their fact table. Each load is one
/// transaction; `sales_fact` is fed by two loads.
pub struct FactSync<O, A> {
  operational: Arc<O>,
  analytical:  Arc<A>,
}

impl<O, A> FactSync<O, A>
where
  O: OperationalStore,
  A: AnalyticalStore,
{
  pub fn new(operational: Arc<O>, analytical: Arc<A>) -> Self {
    Self { operational, analytical }
  }

  /// Sync one fact table, returning rows written.
  pub async fn sync(&self, table: FactTable, since: Since) -> Result<u64> {
    match table {
      FactTable::SalesFact => self.sync_sales(since).await,
      FactTable::ProcurementFact => self.sync_procurement(since).await,
      FactTable::InventoryMovementFact => self.sync_inventory_movements(since).await,
      FactTable::FinancialTransactionFact => self.sync_financial_transactions(since).await,
      FactTable::AttendanceFact => self.sync_attendance(since).await,
    }
  }

  /// Sales orders, then POS lines. If the POS load fails after orders were
  /// committed, the error is [`Error::Partial`] carrying the order count.
  pub async fn sync_sales(&self, since: Since) -> Result<u64> {
    let table = FactTable::SalesFact;
    let orders = self
      .copy(table, self.operational.sales_orders(since), transform::sales_order)
      .await?;
    match self
      .copy(table, self.operational.pos_items(since), transform::pos_item)
      .await
    {
      Ok(lines) => Ok(orders + lines),
      Err(e) if orders > 0 => Err(Error::Partial { rows: orders, source: Box::new(e) }),
      Err(e) => Err(e),
    }
  }

  pub async fn sync_procurement(&self, since: Since) -> Result<u64> {
    self
      .copy(
        FactTable::ProcurementFact,
        self.operational.purchase_order_items(since),
        transform::purchase_order_item,
      )
      .await
  }

  pub async fn sync_inventory_movements(&self, since: Since) -> Result<u64> {
    self
      .copy(
        FactTable::InventoryMovementFact,
        self.operational.stock_movements(since),
        transform::stock_movement,
      )
      .await
  }

  pub async fn sync_financial_transactions(&self, since: Since) -> Result<u64> {
    self
      .copy(
        FactTable::FinancialTransactionFact,
        self.operational.journal_lines(since),
        transform::journal_line,
      )
      .await
  }

  pub async fn sync_attendance(&self, since: Since) -> Result<u64> {
    self
      .copy(
        FactTable::AttendanceFact,
        self.operational.attendance(since),
        transform::attendance,
      )
      .await
  }

  async fn copy<S, R: AnalyticalRow>(
    &self,
    table: FactTable,
    extract: impl Future<Output = Result<Vec<S>, O::Error>>,
    map: fn(S) -> R,
  ) -> Result<u64> {
    copy(&*self.analytical, table.name(), extract, map).await
  }
}
