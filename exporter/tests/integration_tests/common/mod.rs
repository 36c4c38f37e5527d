//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup and HTTP request helpers.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use exporter::metrics::{MetricRegistry, SensorExporter};
use exporter::{create_router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::config::Labels;
use shared::models::SensorReading;

/// The reading used by most scenarios.
pub fn greenhouse_reading() -> SensorReading {
    SensorReading::new(21.3, 45.2, 1012.5, 50000.0, true)
}

/// Creates a test router over a fresh registry with one registered exporter.
///
/// # Returns
///
/// A tuple containing the configured router and the exporter writing into it.
pub fn test_app(labels: &Labels) -> (Router, SensorExporter) {
    let registry = MetricRegistry::new();
    let exporter = SensorExporter::new(&registry, labels).unwrap();
    let router = create_router(AppState::new(registry));
    (router, exporter)
}

/// Helper to make a GET request and return the body as text.
///
/// # Returns
///
/// A tuple containing the response status code and the response body.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Helper to make a GET request and parse the body as JSON.
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_text(app, uri).await;
    let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    (status, json)
}

/// Returns the sample lines (non-comment lines) of a text exposition.
pub fn samples(body: &str) -> Vec<&str> {
    body.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}
