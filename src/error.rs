use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::questions::StoreError;

/// Errors surfaced by the HTTP layer. Model failures never appear here.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Invalid interview type")]
  InvalidInterviewType(String),

  #[error("Invalid technology")]
  InvalidTechnology(String),

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidInterviewType(_) | ApiError::InvalidTechnology(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::InvalidInterviewType(v) => warn!(target: "airis_backend", value = %v, "Rejected interview type"),
      ApiError::InvalidTechnology(v) => warn!(target: "airis_backend", value = %v, "Rejected technology"),
      ApiError::Store(e) => error!(target: "questions", error = %e, "Question store error"),
    }
    (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
  }
}
