//! Car Price Prediction API Server
//!
//! Serves resale price predictions for used cars over HTTP.

use anyhow::Context;
use axum::{routing::post, Router};
use inference_engine::{Artifacts, PricePredictor};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::predict::PredictionResponse;

/// Application state shared across handlers
pub struct AppState {
    /// Predictor over the loaded artifacts
    pub predictor: PricePredictor,
}

impl AppState {
    pub fn new(predictor: PricePredictor) -> Self {
        Self { predictor }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser front ends are served from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(routes::predict::predict))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Initialize logging, honouring `RUST_LOG`
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Load the artifacts and run the server until interrupted.
///
/// Fails before binding if either artifact is missing or invalid.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let artifacts = Artifacts::load(config.model_path(), config.scaler_path())
        .context("model and scaler artifacts are required; run the training notebook to produce them")?;
    let state = Arc::new(AppState::new(PricePredictor::from_artifacts(artifacts)));
    let app = create_router(state);

    let addr = config.bind_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
