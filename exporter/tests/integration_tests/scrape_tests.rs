//! Integration tests for the scrape endpoint.
//!
//! Tests cover:
//! - Exposition of all six metrics with help and type lines
//! - Static labels on every sample
//! - Concurrent scrapes while readings are exported

use axum::http::StatusCode;
use exporter::metrics::{MetricRegistry, MetricSet, SensorExporter};
use exporter::{create_router, AppState};
use shared::config::Labels;

use super::common::{get_text, greenhouse_reading, samples, test_app};

#[tokio::test]
async fn test_scrape_lists_all_metrics() {
    let (app, exporter) = test_app(&Labels::new());
    exporter.export(&greenhouse_reading());

    let (status, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);

    for def in MetricSet::default().defs() {
        assert!(
            body.contains(&format!("# HELP {} {}", def.name, def.help)),
            "missing help for {}",
            def.name
        );
    }
    assert!(body.contains("# TYPE bme680_humidity_percent gauge"));
    assert!(body.contains("# TYPE bme680_io_errors_total counter"));

    let samples = samples(&body);
    assert_eq!(samples.len(), 6);
    assert!(samples.contains(&"bme680_temperature_celsius 21.3"));
    assert!(samples.contains(&"bme680_humidity_percent 45.2"));
    assert!(samples.contains(&"bme680_pressure_hpa 1012.5"));
    assert!(samples.contains(&"bme680_gas_resistance 50000"));
    assert!(samples.contains(&"bme680_io_reads_total 1"));
    assert!(samples.contains(&"bme680_io_errors_total 0"));
}

#[tokio::test]
async fn test_scrape_applies_static_labels() {
    let labels: Labels = r#"{"location":"greenhouse"}"#.parse().unwrap();
    let (app, exporter) = test_app(&labels);
    exporter.export(&greenhouse_reading());

    let (status, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);

    let samples = samples(&body);
    assert_eq!(samples.len(), 6);
    assert!(samples
        .iter()
        .all(|line| line.contains(r#"{location="greenhouse"}"#)));
    assert!(samples.contains(&r#"bme680_temperature_celsius{location="greenhouse"} 21.3"#));
}

#[tokio::test]
async fn test_scrape_with_multiple_labels() {
    let labels: Labels = r#"{"room":"attic","location":"house"}"#.parse().unwrap();
    let (app, _exporter) = test_app(&labels);

    let (_, body) = get_text(app, "/metrics").await;

    assert!(samples(&body)
        .iter()
        .all(|line| line.contains(r#"location="house""#) && line.contains(r#"room="attic""#)));
}

#[tokio::test]
async fn test_scrape_serves_two_sensors_from_one_registry() {
    let registry = MetricRegistry::new();
    let indoor = SensorExporter::new(&registry, &Labels::new()).unwrap();
    let outdoor =
        SensorExporter::with_metric_set(&registry, &MetricSet::with_prefix("outdoor"), &Labels::new())
            .unwrap();
    indoor.export(&greenhouse_reading());
    outdoor.record_io_error();
    let app = create_router(AppState::new(registry));

    let (_, body) = get_text(app, "/metrics").await;

    let samples = samples(&body);
    assert_eq!(samples.len(), 12);
    assert!(samples.contains(&"bme680_io_reads_total 1"));
    assert!(samples.contains(&"outdoor_io_errors_total 1"));
    assert!(samples.contains(&"outdoor_temperature_celsius 0"));
}

#[tokio::test]
async fn test_concurrent_scrapes_see_latest_values() {
    let (app, exporter) = test_app(&Labels::new());

    let mut handles = Vec::new();
    for i in 1..=10 {
        let exporter = exporter.clone();
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let value = f64::from(i);
            exporter.export(&shared::models::SensorReading::new(
                value, value, value, value, true,
            ));
            get_text(app, "/metrics").await
        }));
    }

    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get_text(app, "/metrics").await;
    assert!(samples(&body).contains(&"bme680_io_reads_total 10"));
}
