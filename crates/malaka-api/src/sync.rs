//! Handlers for `/sync` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/sync/full` | Runs a full sync; returns the [`SyncReport`] |
//! | `POST` | `/sync/incremental` | Runs an incremental sync; returns the [`SyncReport`] |
//! | `GET`  | `/sync/status` | Latest checkpoint per fact table |
//!
//! A run that is already in progress for the same sync type yields `409`.
//! Table failures do not change the status code; they are in the report.

use axum::{Json, extract::State};
use malaka_core::{
  store::{AnalyticalStore, OperationalStore},
  watermark::{SyncStatus, SyncType},
};
use malaka_sync::SyncReport;

use crate::{AppState, error::ApiError};

/// `POST /sync/full`
pub async fn full<O, A>(
  State(state): State<AppState<O, A>>,
) -> Result<Json<SyncReport>, ApiError>
where
  O: OperationalStore + 'static,
  A: AnalyticalStore + 'static,
{
  run(state, SyncType::Full).await
}

/// `POST /sync/incremental`
pub async fn incremental<O, A>(
  State(state): State<AppState<O, A>>,
) -> Result<Json<SyncReport>, ApiError>
where
  O: OperationalStore + 'static,
  A: AnalyticalStore + 'static,
{
  run(state, SyncType::Incremental).await
}

async fn run<O, A>(
  state: AppState<O, A>,
  sync_type: SyncType,
) -> Result<Json<SyncReport>, ApiError>
where
  O: OperationalStore + 'static,
  A: AnalyticalStore + 'static,
{
  let report = state.service.run(sync_type, &state.cancel).await?;
  Ok(Json(report))
}

/// `GET /sync/status`
pub async fn status<O, A>(
  State(state): State<AppState<O, A>>,
) -> Result<Json<Vec<SyncStatus>>, ApiError>
where
  O: OperationalStore + 'static,
  A: AnalyticalStore + 'static,
{
  let statuses = state.service.reporter().get_sync_status().await?;
  Ok(Json(statuses))
}
