//! Integration tests for the poll loop.
//!
//! Tests cover:
//! - A successful read followed by an I/O error
//! - Cycles without fresh data and with an unstable gas heater
//! - The full startup path serving scrapes over TCP

use std::time::Duration;

use axum::http::StatusCode;
use exporter::metrics::PollOutcome;
use exporter::{run, Config, Poller};
use shared::config::Labels;
use shared::models::SensorReading;
use shared::sensor::ScriptedSensor;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::common::{get_text, greenhouse_reading, samples, test_app};

#[tokio::test]
async fn test_read_then_io_error_keeps_first_reading() {
    let (app, exporter) = test_app(&Labels::new());
    let sensor = ScriptedSensor::new()
        .with_reading(greenhouse_reading())
        .with_io_error("remote I/O error");
    let mut poller = Poller::new(sensor, exporter, Duration::from_secs(2));

    assert!(poller.poll_once().is_exported());
    assert!(matches!(poller.poll_once(), PollOutcome::Failed(_)));

    let (status, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);

    let samples = samples(&body);
    assert!(samples.contains(&"bme680_temperature_celsius 21.3"));
    assert!(samples.contains(&"bme680_humidity_percent 45.2"));
    assert!(samples.contains(&"bme680_pressure_hpa 1012.5"));
    assert!(samples.contains(&"bme680_gas_resistance 50000"));
    assert!(samples.contains(&"bme680_io_errors_total 1"));
    assert!(samples.contains(&"bme680_io_reads_total 2"));
}

#[tokio::test]
async fn test_not_ready_and_unstable_cycles_change_nothing() {
    let (app, exporter) = test_app(&Labels::new());
    let sensor = ScriptedSensor::new()
        .with_reading(greenhouse_reading())
        .with_not_ready()
        .with_reading(SensorReading::new(35.0, 10.0, 950.0, 1.0, false));
    let mut poller = Poller::new(sensor, exporter, Duration::from_secs(2));

    poller.poll_once();
    assert_eq!(poller.poll_once(), PollOutcome::NotReady);
    assert!(matches!(poller.poll_once(), PollOutcome::HeatUnstable(_)));

    let (_, body) = get_text(app, "/metrics").await;
    let samples = samples(&body);
    assert!(samples.contains(&"bme680_temperature_celsius 21.3"));
    assert!(samples.contains(&"bme680_gas_resistance 50000"));
    assert!(samples.contains(&"bme680_io_reads_total 1"));
    assert!(samples.contains(&"bme680_io_errors_total 0"));
}

/// Sends a raw HTTP/1.1 GET and returns the full response.
async fn http_get(port: u16, path: &str) -> Option<String> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.ok()?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.ok()?;

    let mut response = String::new();
    stream.read_to_string(&mut response).await.ok()?;
    Some(response)
}

#[tokio::test]
async fn test_run_serves_polled_readings() {
    let port = {
        let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        probe.local_addr().unwrap().port()
    };
    let config = Config {
        host: "127.0.0.1".to_string(),
        port,
        interval: Duration::from_millis(50),
        labels: r#"{"location":"greenhouse"}"#.parse().unwrap(),
        ..Config::default()
    };
    let sensor = ScriptedSensor::new().with_reading(greenhouse_reading());

    let server = tokio::spawn(run(config, sensor));

    let mut body = None;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if let Some(response) = http_get(port, "/metrics").await {
            if response.contains("bme680_io_reads_total{location=\"greenhouse\"} 1") {
                body = Some(response);
                break;
            }
        }
    }
    server.abort();

    let body = body.expect("exporter never served the polled reading");
    assert!(body.starts_with("HTTP/1.1 200 OK"));
    assert!(body.contains("bme680_temperature_celsius{location=\"greenhouse\"} 21.3"));
}
