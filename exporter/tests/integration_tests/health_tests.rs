//! Integration tests for the health check endpoint.

use axum::http::StatusCode;
use shared::config::Labels;

use super::common::{get_json, test_app};

#[tokio::test]
async fn test_health_check() {
    let (app, _exporter) = test_app(&Labels::new());

    let (status, response) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "bme680-exporter");
}
