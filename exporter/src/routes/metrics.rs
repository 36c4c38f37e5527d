//! Prometheus scrape endpoint.
//!
//! Serves the current value of every registered metric in the text exposition
//! format. Requests only read the registry and can run concurrently with the
//! poll loop.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Creates the scrape routes.
///
/// The exposition is served on `/metrics` and, like the reference Prometheus
/// client, on `/` as well.
pub fn metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(scrape))
        .route("/", get(scrape))
}

/// Scrape handler.
async fn scrape(State(state): State<AppState>) -> Response {
    let registry = state.registry();

    match registry.gather_text() {
        Ok(body) => ([(header::CONTENT_TYPE, registry.content_type())], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
