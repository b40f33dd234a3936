//! Status Routes
//!
//! Routes:
//! - GET /health - Health check including database reachability

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::{db, AppState};

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Health check.
///
/// GET /health
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match db::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: "connected",
                version: env!("CARGO_PKG_VERSION"),
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: "unreachable",
                    version: env!("CARGO_PKG_VERSION"),
                }),
            )
        }
    }
}
