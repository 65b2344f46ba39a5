//! JSON control API for the Malaka sync pipeline.
//!
//! Exposes an axum [`Router`] that triggers full and incremental syncs and
//! reports watermark status. Auth and TLS are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", malaka_api::api_router(state))
//! ```

pub mod error;
pub mod sync;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use malaka_core::store::{AnalyticalStore, OperationalStore};
use malaka_sync::{BatchSyncService, CancelToken};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<O, A> {
  pub service: Arc<BatchSyncService<O, A>>,
  /// Runs started over HTTP stop when this is cancelled.
  pub cancel:  CancelToken,
}

impl<O, A> Clone for AppState<O, A> {
  fn clone(&self) -> Self {
    Self { service: Arc::clone(&self.service), cancel: self.cancel.clone() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<O, A>(state: AppState<O, A>) -> Router<()>
where
  O: OperationalStore + 'static,
  A: AnalyticalStore + 'static,
{
  Router::new()
    .route("/sync/full", post(sync::full::<O, A>))
    .route("/sync/incremental", post(sync::incremental::<O, A>))
    .route("/sync/status", get(sync::status::<O, A>))
    .with_state(state)
}
