//! HTTP route definitions.
//!
//! This module organizes the HTTP routes served by the exporter.

mod health;
mod metrics;

pub use health::health_routes;
pub use metrics::metrics_routes;
