//! BME680 Exporter Server
//!
//! This crate polls a BME680 environmental sensor and republishes its readings
//! as Prometheus metrics.
//!
//! # Architecture
//!
//! The exporter is built on Axum and Tokio:
//! - A poll loop reads the sensor at a fixed interval and updates gauges and counters
//! - A scrape server renders the metric registry in the text exposition format
//! - A health endpoint for process supervisors
//!
//! # Example
//!
//! ```no_run
//! use exporter::{run, Config};
//! use shared::sensor::ScriptedSensor;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run(Config::default(), ScriptedSensor::new()).await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
pub mod metrics;
mod poller;
mod routes;
mod state;

pub use config::{Config, DEFAULT_PORT};
pub use poller::Poller;
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use metrics::{MetricRegistry, SensorExporter};
use shared::sensor::Sensor;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Runs the exporter.
///
/// Initialization happens once: the sensor is configured, the metrics are
/// registered and the scrape listener is bound. Any failure there is returned
/// as an error. Afterwards the poll loop runs until SIGTERM or SIGINT.
///
/// # Errors
///
/// Returns an error if:
/// - The poll interval is zero
/// - The sensor settings are out of range
/// - The sensor cannot be configured
/// - A metric cannot be registered
/// - The scrape server fails to bind to the configured address
pub async fn run<S>(config: Config, mut sensor: S) -> Result<()>
where
    S: Sensor + 'static,
{
    anyhow::ensure!(
        !config.interval.is_zero(),
        "Poll interval must be greater than zero"
    );
    config
        .sensor
        .validate_settings()
        .context("Invalid sensor settings")?;

    tracing::info!(settings = %config.sensor, "Configuring BME680");
    sensor
        .configure(&config.sensor)
        .context("Failed to configure sensor")?;

    tracing::info!(labels = %config.labels, "Initializing exporter");
    let registry = MetricRegistry::new();
    let exporter =
        SensorExporter::new(&registry, &config.labels).context("Failed to register metrics")?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind scrape server to {addr}"))?;
    tracing::info!(%addr, "Starting exporter");

    let app = create_router(AppState::new(registry));
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            tracing::error!(error = %e, "Scrape server failed");
        }
    });

    tracing::info!(
        interval_secs = config.interval.as_secs_f64(),
        "Starting sampling"
    );
    let poller = Poller::new(sensor, exporter, config.interval);

    tokio::select! {
        () = poller.run() => {}
        () = shutdown_signal() => {}
    }

    server.await.context("Scrape server task panicked")?;
    tracing::info!("Exporter shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::metrics_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
