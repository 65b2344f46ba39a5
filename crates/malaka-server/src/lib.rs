//! Configuration, HTTP wiring, and the interval scheduler behind the
//! `malaka` binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::Router;
use malaka_api::AppState;
use malaka_core::store::{AnalyticalStore, OperationalStore};
use malaka_sync::{BatchSyncService, CancelToken, Error, SyncReport};
use serde::Deserialize;
use tokio::time::{Instant, MissedTickBehavior};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` and `MALAKA_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                      String,
  #[serde(default = "default_port")]
  pub port:                      u16,
  /// The ERP's SQLite database.
  pub operational_path:          PathBuf,
  /// The DuckDB star schema; created and migrated on open.
  pub analytical_path:           PathBuf,
  /// Create missing operational tables on open. For local development only.
  #[serde(default)]
  pub create_operational_schema: bool,
  /// Without this section `serve` only syncs on request.
  pub schedule:                  Option<ScheduleConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScheduleConfig {
  pub incremental_interval_secs: u64,
  #[serde(default)]
  pub full_on_startup:           bool,
}

/// `MALAKA_*` overrides. Nested keys are joined with `__`, as in
/// `MALAKA_SCHEDULE__INCREMENTAL_INTERVAL_SECS`.
pub fn env_source() -> config::Environment {
  config::Environment::with_prefix("MALAKA")
    .prefix_separator("_")
    .separator("__")
}

/// Read `path` (which may be absent) with `env` layered on top.
pub fn load_config(
  path: &Path,
  env: config::Environment,
) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(env)
    .build()?
    .try_deserialize()
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with request tracing.
pub fn router<O, A>(state: AppState<O, A>) -> Router
where
  O: OperationalStore + 'static,
  A: AnalyticalStore + 'static,
{
  malaka_api::api_router(state).layer(TraceLayer::new_for_http())
}

// ─── Scheduler ────────────────────────────────────────────────────────────────

/// Run incremental syncs every `incremental_interval_secs` until `cancel`
/// fires, optionally preceded by one full sync. A tick that lands while a
/// run is still going is delayed, not doubled up.
pub async fn schedule<O, A>(
  service: Arc<BatchSyncService<O, A>>,
  config: ScheduleConfig,
  cancel: CancelToken,
) where
  O: OperationalStore + 'static,
  A: AnalyticalStore + 'static,
{
  let period = Duration::from_secs(config.incremental_interval_secs.max(1));
  tracing::info!(interval_secs = period.as_secs(), "scheduler started");

  let mut ticker = if config.full_on_startup {
    log_run(service.run_full_sync(&cancel).await);
    tokio::time::interval_at(Instant::now() + period, period)
  } else {
    tokio::time::interval(period)
  };
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

  loop {
    tokio::select! {
      biased;
      () = cancel.cancelled() => break,
      _ = ticker.tick() => log_run(service.run_incremental_sync(&cancel).await),
    }
  }
  tracing::info!("scheduler stopped");
}

fn log_run(result: Result<SyncReport, Error>) {
  match result {
    Ok(report) if !report.is_clean() => tracing::warn!(
      run_id = %report.run_id,
      sync_type = %report.sync_type,
      failed = report.failures().count(),
      "scheduled sync left tables behind"
    ),
    Ok(_) => {}
    Err(e) => tracing::warn!(error = %e, "scheduled sync skipped"),
  }
}
