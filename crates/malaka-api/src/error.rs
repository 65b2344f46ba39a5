//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A run of the requested sync type is already in progress.
  #[error("{0}")]
  Conflict(String),

  #[error("sync error: {0}")]
  Sync(#[source] malaka_sync::Error),
}

impl From<malaka_sync::Error> for ApiError {
  fn from(e: malaka_sync::Error) -> Self {
    match e {
      malaka_sync::Error::AlreadyRunning(_) => ApiError::Conflict(e.to_string()),
      other => ApiError::Sync(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Sync(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
