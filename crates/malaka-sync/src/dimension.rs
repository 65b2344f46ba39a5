//! Full re-sync of the five dimension tables.

use std::{future::Future, sync::Arc, time::Instant};

use malaka_core::{
  row::AnalyticalRow,
  store::{AnalyticalStore, OperationalStore},
  watermark::DimensionTable,
};

use crate::{
  CancelToken, Result,
  copy::copy,
  report::{TableOutcome, TableReport},
  transform,
};

/// Pulls every reference entity and upserts it by `_version`. Dimensions
/// carry no watermark; every run reads the whole source table.
pub struct DimensionSync<O, A> {
  operational: Arc<O>,
  analytical:  Arc<A>,
}

impl<O, A> DimensionSync<O, A>
where
  O: OperationalStore,
  A: AnalyticalStore,
{
  pub fn new(operational: Arc<O>, analytical: Arc<A>) -> Self {
    Self { operational, analytical }
  }

  /// Sync one dimension, returning rows written.
  pub async fn sync(&self, table: DimensionTable) -> Result<u64> {
    let op = &*self.operational;
    match table {
      DimensionTable::DimCustomer => self.copy(table, op.customers(), transform::customer).await,
      DimensionTable::DimSupplier => self.copy(table, op.suppliers(), transform::supplier).await,
      DimensionTable::DimArticle => self.copy(table, op.articles(), transform::article).await,
      DimensionTable::DimWarehouse => self.copy(table, op.warehouses(), transform::warehouse).await,
      DimensionTable::DimEmployee => self.copy(table, op.employees(), transform::employee).await,
    }
  }

  /// Sync every dimension in order. A failed dimension is logged and the
  /// rest still run.
  pub async fn sync_all(&self, cancel: &CancelToken) -> Vec<TableReport> {
    let mut reports = Vec::with_capacity(DimensionTable::ALL.len());

    for table in DimensionTable::ALL {
      let started = Instant::now();
      let result = cancel.run(self.sync(table)).await;
      let elapsed_ms = started.elapsed().as_millis() as u64;

      let outcome = match result {
        Ok(rows) => {
          tracing::info!(table = %table, rows, elapsed_ms, "dimension synced");
          TableOutcome::Synced { rows, watermark: None }
        }
        Err(e) => {
          tracing::error!(table = %table, error = %e, elapsed_ms, "dimension sync failed");
          TableOutcome::failed(&e)
        }
      };
      reports.push(TableReport { table: table.name(), elapsed_ms, outcome });
    }
    reports
  }

  async fn copy<S, R: AnalyticalRow>(
    &self,
    table: DimensionTable,
    extract: impl Future<Output = Result<Vec<S>, O::Error>>,
    map: fn(S) -> R,
  ) -> Result<u64> {
    copy(&*self.analytical, table.name(), extract, map).await
  }
}
