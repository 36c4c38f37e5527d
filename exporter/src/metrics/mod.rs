//! Metrics collection module.
//!
//! This module owns the metric registry and the exporter that turns sensor
//! readings into gauge and counter updates.

pub mod exporter;
pub mod registry;

pub use exporter::{ExporterError, MetricDef, MetricSet, PollOutcome, SensorExporter};
pub use registry::MetricRegistry;
