//! `malaka`: the analytics sync server.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! operational SQLite database and the analytical DuckDB file, and either
//! serves the sync API or runs a single command.
//!
//! ```
//! malaka serve
//! malaka --config /etc/malaka.toml incremental
//! malaka status
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use malaka_api::AppState;
use malaka_server::{ServerConfig, env_source, expand_tilde, load_config, router, schedule};
use malaka_store_duckdb::DuckDbAnalyticalStore;
use malaka_store_sqlite::SqliteOperationalStore;
use malaka_sync::{BatchSyncService, CancelHandle, CancelToken, cancel_pair};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type Service = BatchSyncService<SqliteOperationalStore, DuckDbAnalyticalStore>;

#[derive(Parser)]
#[command(author, version, about = "Malaka ERP analytics sync")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
  /// Serve the HTTP API and run the configured schedule (default).
  Serve,
  /// Run one full sync and print the report.
  Full,
  /// Run one incremental sync and print the report.
  Incremental,
  /// Print the latest watermark per fact table.
  Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let server_cfg = load_config(&cli.config, env_source())
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let service = Arc::new(open_service(&server_cfg).await?);

  let (handle, cancel) = cancel_pair();
  tokio::spawn(cancel_on_ctrl_c(handle));

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(server_cfg, service, cancel).await,
    Command::Full => print_json(&service.run_full_sync(&cancel).await?),
    Command::Incremental => print_json(&service.run_incremental_sync(&cancel).await?),
    Command::Status => print_json(&service.reporter().get_sync_status().await?),
  }
}

async fn open_service(cfg: &ServerConfig) -> anyhow::Result<Service> {
  let operational_path = expand_tilde(&cfg.operational_path);
  let operational = SqliteOperationalStore::open(&operational_path)
    .await
    .with_context(|| format!("failed to open operational store at {operational_path:?}"))?;
  if cfg.create_operational_schema {
    operational
      .ensure_schema()
      .await
      .context("failed to create operational schema")?;
  }

  let analytical_path = expand_tilde(&cfg.analytical_path);
  let analytical = DuckDbAnalyticalStore::open(&analytical_path)
    .await
    .with_context(|| format!("failed to open analytical store at {analytical_path:?}"))?;

  Ok(BatchSyncService::new(Arc::new(operational), Arc::new(analytical)))
}

async fn serve(
  cfg: ServerConfig,
  service: Arc<Service>,
  cancel: CancelToken,
) -> anyhow::Result<()> {
  let scheduler = cfg
    .schedule
    .clone()
    .map(|schedule_cfg| tokio::spawn(schedule(Arc::clone(&service), schedule_cfg, cancel.clone())));

  let app = router(AppState { service, cancel: cancel.clone() });
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(async move { cancel.cancelled().await })
    .await
    .context("server error")?;

  if let Some(scheduler) = scheduler {
    scheduler.await.context("scheduler task panicked")?;
  }
  Ok(())
}

async fn cancel_on_ctrl_c(handle: CancelHandle) {
  match tokio::signal::ctrl_c().await {
    Ok(()) => {
      tracing::info!("interrupt received, cancelling");
      handle.cancel();
    }
    Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c"),
  }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
