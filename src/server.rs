//! HTTP API for coefficient predictions.

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::artifacts::ArtifactStore;
use crate::config::ServerConfig;
use crate::error::Error;
use crate::modes::ModeConfig;
use crate::predictor::run_prediction;
use crate::request::PredictionRequest;
use crate::response::PredictionResponse;

/// Prediction API server
pub struct PredictionServer {
    config: ServerConfig,
}

impl PredictionServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Start the API server and serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let addr = self.config.bind_address();
        let store = ArtifactStore::new(&self.config.model_dir);

        info!(
            "Starting prediction server on {} (models: {})",
            addr,
            store.model_dir().display()
        );

        let app = build_router(store);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Shared API state
#[derive(Clone)]
struct ApiState {
    store: Arc<ArtifactStore>,
}

/// Build the API router over an artifact store
pub fn build_router(store: ArtifactStore) -> Router {
    let state = ApiState {
        store: Arc::new(store),
    };

    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health_check))
        .route("/modes", get(list_modes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

async fn list_modes() -> Json<&'static [ModeConfig]> {
    Json(ModeConfig::all())
}

async fn predict(
    State(state): State<ApiState>,
    body: Bytes,
) -> std::result::Result<Json<PredictionResponse>, Error> {
    let request = PredictionRequest::from_body(&body)?;
    debug!(
        "Prediction request for {} with features {:?}",
        request.mode.name, request.features
    );

    let store = Arc::clone(&state.store);
    let response = tokio::task::spawn_blocking(move || run_prediction(&store, &request))
        .await
        .map_err(|e| Error::Internal(e.to_string()))??;

    Ok(Json(response))
}
