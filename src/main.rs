//! AIRIS · AI Interview Practice backend
//!
//! - Axum HTTP API serving HR/technical questions and answer feedback
//! - Optional hosted-model integration (via environment variables); mock responses otherwise
//! - Static client fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT / HOST           : listen address (default 0.0.0.0:8001)
//!   NVIDIA_API_KEY        : enables the hosted model if present
//!   NVIDIA_BASE_URL       : default "https://integrate.api.nvidia.com/v1"
//!   NVIDIA_MODEL          : default "google/gemma-7b"
//!   MODEL_TEMPERATURE     : default 0.7
//!   CORS_ORIGINS          : comma-separated origins, "*" for any
//!   QUESTION_SEED         : seed for question selection
//!   INTERVIEW_CONFIG_PATH : TOML file with prompt overrides and extra questions
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod feedback;
mod logic;
mod model;
mod protocol;
mod questions;
mod routes;
mod seeds;
mod state;
mod telemetry;
mod util;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ServiceConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // A missing .env is fine; real env vars still apply.
  dotenvy::dotenv().ok();
  telemetry::init_tracing();

  let cfg = ServiceConfig::from_env();
  let state = Arc::new(AppState::from_config(&cfg));
  let app = build_router(state, &cfg.cors_origins);

  let listener = TcpListener::bind(cfg.addr).await?;
  info!(target: "airis_backend", addr = %cfg.addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(target: "airis_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "airis_backend", "Shutdown signal received");
}
