//! Health check endpoint.
//!
//! Provides a simple health check endpoint for process supervisors and load balancers.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Creates the health check routes.
pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
///
/// Returns a simple JSON response indicating the exporter is serving.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "bme680-exporter",
        version: env!("CARGO_PKG_VERSION"),
    })
}
