//! [`BatchSyncService`]: the full and incremental entry points.

use std::{sync::Arc, time::Instant};

use chrono::{DateTime, SubsecRound as _, Utc};
use malaka_core::{
  store::{AnalyticalStore, OperationalStore},
  watermark::{FactTable, SyncType, Watermark},
};
use tokio::sync::Mutex;
use tracing::Instrument as _;
use uuid::Uuid;

use crate::{
  CancelToken, DimensionSync, Error, FactSync, Result, SyncStatusReporter,
  report::{SyncReport, TableOutcome, TableReport},
};

/// Runs dimensions, then facts, strictly in sequence.
///
/// A failing table is logged, reported, and skipped; it never fails the
/// invocation. The only invocation-level error is
/// [`Error::AlreadyRunning`]: each sync type admits one run at a time.
pub struct BatchSyncService<O, A> {
  dimensions:        DimensionSync<O, A>,
  facts:             FactSync<O, A>,
  analytical:        Arc<A>,
  full_guard:        Mutex<()>,
  incremental_guard: Mutex<()>,
}

impl<O, A> BatchSyncService<O, A>
where
  O: OperationalStore,
  A: AnalyticalStore,
{
  pub fn new(operational: Arc<O>, analytical: Arc<A>) -> Self {
    Self {
      dimensions:        DimensionSync::new(Arc::clone(&operational), Arc::clone(&analytical)),
      facts:             FactSync::new(operational, Arc::clone(&analytical)),
      analytical,
      full_guard:        Mutex::new(()),
      incremental_guard: Mutex::new(()),
    }
  }

  /// A status reporter over the same analytical store.
  pub fn reporter(&self) -> SyncStatusReporter<A> {
    SyncStatusReporter::new(Arc::clone(&self.analytical))
  }

  /// Re-extract every fact table in full and checkpoint each one that
  /// succeeds, even when it had no rows.
  pub async fn run_full_sync(&self, cancel: &CancelToken) -> Result<SyncReport> {
    self.run(SyncType::Full, cancel).await
  }

  /// Extract only fact rows changed since each table's watermark. A table
  /// is checkpointed only when it produced rows.
  pub async fn run_incremental_sync(&self, cancel: &CancelToken) -> Result<SyncReport> {
    self.run(SyncType::Incremental, cancel).await
  }

  pub async fn run(&self, sync_type: SyncType, cancel: &CancelToken) -> Result<SyncReport> {
    let guard = match sync_type {
      SyncType::Full => &self.full_guard,
      SyncType::Incremental => &self.incremental_guard,
    };
    let _running = guard
      .try_lock()
      .map_err(|_| Error::AlreadyRunning(sync_type))?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("sync", %run_id, %sync_type);

    async {
      let started_at = Utc::now();
      tracing::info!("sync started");

      let dimensions = self.dimensions.sync_all(cancel).await;

      let mut facts = Vec::with_capacity(FactTable::ALL.len());
      for table in FactTable::ALL {
        facts.push(self.sync_fact(table, sync_type, cancel).await);
      }

      let report = SyncReport {
        run_id,
        sync_type,
        started_at,
        finished_at: Utc::now(),
        dimensions,
        facts,
      };
      let failed = report.failures().count();
      if failed == 0 {
        tracing::info!("sync finished");
      } else {
        tracing::warn!(failed, "sync finished with failed tables");
      }
      Ok(report)
    }
    .instrument(span)
    .await
  }

  async fn sync_fact(
    &self,
    table: FactTable,
    sync_type: SyncType,
    cancel: &CancelToken,
  ) -> TableReport {
    let started = Instant::now();
    let result = cancel.run(self.fact_step(table, sync_type)).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let outcome = match result {
      Ok((rows, watermark)) => {
        tracing::info!(table = %table, rows, elapsed_ms, "fact synced");
        TableOutcome::Synced { rows, watermark }
      }
      Err(e) => {
        tracing::error!(
          table = %table,
          error = %e,
          rows_landed = e.rows_landed(),
          elapsed_ms,
          "fact sync failed"
        );
        TableOutcome::failed(&e)
      }
    };
    TableReport { table: table.name(), elapsed_ms, outcome }
  }

  /// Resolve the watermark, sync, and append a checkpoint. Returns rows
  /// written and the checkpoint appended, if any.
  async fn fact_step(
    &self,
    table: FactTable,
    sync_type: SyncType,
  ) -> Result<(u64, Option<DateTime<Utc>>)> {
    let since = match sync_type {
      SyncType::Full => None,
      SyncType::Incremental => self
        .analytical
        .current_watermark(table)
        .await
        .map_err(|e| Error::Watermark { table: table.name(), source: Box::new(e) })?,
    };

    // Rows changed while extracting are newer than this and get picked up
    // again next run.
    let checkpoint = Utc::now().trunc_subsecs(3);
    let rows = self.facts.sync(table, since).await?;

    let record = match sync_type {
      SyncType::Full => true,
      SyncType::Incremental => rows > 0,
    };
    if !record {
      return Ok((rows, None));
    }

    self
      .analytical
      .append_watermark(Watermark::new(table, checkpoint, rows, sync_type))
      .await
      .map_err(|e| Error::Partial {
        rows,
        source: Box::new(Error::Watermark { table: table.name(), source: Box::new(e) }),
      })?;
    Ok((rows, Some(checkpoint)))
  }
}
