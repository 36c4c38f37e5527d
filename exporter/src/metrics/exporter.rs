//! Sensor metrics exporter.
//!
//! `SensorExporter` owns the gauges and counters for one BME680 and updates
//! them from sensor readings.

use crate::metrics::MetricRegistry;
use prometheus::core::Collector;
use prometheus::{Gauge, IntCounter, Opts};
use shared::config::Labels;
use shared::models::SensorReading;
use shared::sensor::Sensor;
use thiserror::Error;

/// Errors that can occur while setting up the exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// The metric could not be created, usually because of an invalid name or label.
    #[error("Invalid metric '{name}': {source}")]
    InvalidMetric {
        /// The exported metric name.
        name: String,
        /// The underlying metrics library error.
        source: prometheus::Error,
    },

    /// The metric collides with one already registered.
    #[error("Failed to register metric '{name}': {source}")]
    Registration {
        /// The exported metric name.
        name: String,
        /// The underlying metrics library error.
        source: prometheus::Error,
    },
}

/// Exported name and help text of one metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDef {
    /// The exported metric name.
    pub name: String,
    /// The help text shown in the exposition format.
    pub help: String,
}

impl MetricDef {
    /// Creates a new metric definition.
    #[must_use]
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
        }
    }
}

/// The fixed set of metrics exported for one sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSet {
    /// Temperature gauge.
    pub temperature: MetricDef,
    /// Humidity gauge.
    pub humidity: MetricDef,
    /// Pressure gauge.
    pub pressure: MetricDef,
    /// Gas resistance gauge.
    pub gas_resistance: MetricDef,
    /// Read attempts counter.
    pub io_reads: MetricDef,
    /// Read failures counter.
    pub io_errors: MetricDef,
}

impl MetricSet {
    /// Creates the standard metric set with a custom name prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use exporter::metrics::MetricSet;
    ///
    /// let set = MetricSet::with_prefix("attic");
    /// assert_eq!(set.temperature.name, "attic_temperature_celsius");
    /// ```
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            temperature: MetricDef::new(
                format!("{prefix}_temperature_celsius"),
                "Current BME680 temperature",
            ),
            humidity: MetricDef::new(
                format!("{prefix}_humidity_percent"),
                "Current BME680 humidity",
            ),
            pressure: MetricDef::new(
                format!("{prefix}_pressure_hpa"),
                "Current BME680 atmospheric pressure",
            ),
            gas_resistance: MetricDef::new(
                format!("{prefix}_gas_resistance"),
                "Current BME680 gas resistance in Ohms",
            ),
            io_reads: MetricDef::new(
                format!("{prefix}_io_reads_total"),
                "Total number of BME680 I/O reads",
            ),
            io_errors: MetricDef::new(
                format!("{prefix}_io_errors_total"),
                "Total number of BME680 I/O errors",
            ),
        }
    }

    /// Returns every definition in export order.
    #[must_use]
    pub fn defs(&self) -> [&MetricDef; 6] {
        [
            &self.temperature,
            &self.humidity,
            &self.pressure,
            &self.gas_resistance,
            &self.io_reads,
            &self.io_errors,
        ]
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::with_prefix("bme680")
    }
}

/// Result of one `measure` cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// A heat-stable reading was exported.
    Exported(SensorReading),
    /// A reading arrived but the gas heater was not stable, so nothing was exported.
    HeatUnstable(SensorReading),
    /// The sensor had no fresh sample.
    NotReady,
    /// The read failed with this error message.
    Failed(String),
}

impl PollOutcome {
    /// Returns true if the gauges were updated.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        matches!(self, Self::Exported(_))
    }
}

/// Metric instruments for a single BME680 sensor.
///
/// # Example
///
/// ```
/// use exporter::metrics::{MetricRegistry, SensorExporter};
/// use shared::config::Labels;
/// use shared::models::SensorReading;
///
/// let registry = MetricRegistry::new();
/// let exporter = SensorExporter::new(&registry, &Labels::new()).unwrap();
///
/// exporter.export(&SensorReading::new(21.3, 45.2, 1012.5, 50000.0, true));
///
/// assert_eq!(exporter.temperature(), 21.3);
/// assert_eq!(exporter.io_reads(), 1);
/// ```
#[derive(Clone)]
pub struct SensorExporter {
    temperature: Gauge,
    humidity: Gauge,
    pressure: Gauge,
    gas_resistance: Gauge,
    io_reads: IntCounter,
    io_errors: IntCounter,
}

impl SensorExporter {
    /// Registers the standard BME680 metric set, labelled with `labels`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric name is already registered in `registry`
    /// or a label name is rejected by the metrics library.
    pub fn new(registry: &MetricRegistry, labels: &Labels) -> Result<Self, ExporterError> {
        Self::with_metric_set(registry, &MetricSet::default(), labels)
    }

    /// Registers a custom metric set, labelled with `labels`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric name is already registered in `registry`
    /// or a metric or label name is rejected by the metrics library.
    pub fn with_metric_set(
        registry: &MetricRegistry,
        set: &MetricSet,
        labels: &Labels,
    ) -> Result<Self, ExporterError> {
        Ok(Self {
            temperature: register(registry, gauge(&set.temperature, labels)?, &set.temperature)?,
            humidity: register(registry, gauge(&set.humidity, labels)?, &set.humidity)?,
            pressure: register(registry, gauge(&set.pressure, labels)?, &set.pressure)?,
            gas_resistance: register(
                registry,
                gauge(&set.gas_resistance, labels)?,
                &set.gas_resistance,
            )?,
            io_reads: register(registry, counter(&set.io_reads, labels)?, &set.io_reads)?,
            io_errors: register(registry, counter(&set.io_errors, labels)?, &set.io_errors)?,
        })
    }

    /// Sets all four gauges from `reading` and counts one read.
    ///
    /// Values are not range checked.
    pub fn export(&self, reading: &SensorReading) {
        self.io_reads.inc();
        self.temperature.set(reading.temperature);
        self.humidity.set(reading.humidity);
        self.pressure.set(reading.pressure);
        self.gas_resistance.set(reading.gas_resistance);
    }

    /// Counts one failed read. A failed read is still a read attempt.
    pub fn record_io_error(&self) {
        self.io_reads.inc();
        self.io_errors.inc();
    }

    /// Reads the sensor once, logs the result, and exports it if it is heat-stable.
    ///
    /// Read errors are logged and counted, never propagated. Gauges keep their
    /// previous values whenever nothing is exported.
    pub fn measure<S: Sensor + ?Sized>(&self, sensor: &mut S) -> PollOutcome {
        match sensor.get_sensor_data() {
            Ok(Some(reading)) if reading.heat_stable => {
                tracing::info!("{reading}");
                self.export(&reading);
                PollOutcome::Exported(reading)
            }
            Ok(Some(reading)) => {
                tracing::debug!("Gas heater not stable, skipping export: {reading}");
                PollOutcome::HeatUnstable(reading)
            }
            Ok(None) => {
                tracing::debug!("No new BME680 data available");
                PollOutcome::NotReady
            }
            Err(e) => {
                tracing::error!(error = %e, "I/O error when reading BME680 measurements");
                self.record_io_error();
                PollOutcome::Failed(e.to_string())
            }
        }
    }

    /// Returns the current temperature gauge value.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature.get()
    }

    /// Returns the current humidity gauge value.
    #[must_use]
    pub fn humidity(&self) -> f64 {
        self.humidity.get()
    }

    /// Returns the current pressure gauge value.
    #[must_use]
    pub fn pressure(&self) -> f64 {
        self.pressure.get()
    }

    /// Returns the current gas resistance gauge value.
    #[must_use]
    pub fn gas_resistance(&self) -> f64 {
        self.gas_resistance.get()
    }

    /// Returns the total number of read attempts.
    #[must_use]
    pub fn io_reads(&self) -> u64 {
        self.io_reads.get()
    }

    /// Returns the total number of failed reads.
    #[must_use]
    pub fn io_errors(&self) -> u64 {
        self.io_errors.get()
    }
}

impl std::fmt::Debug for SensorExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorExporter")
            .field("temperature", &self.temperature())
            .field("humidity", &self.humidity())
            .field("pressure", &self.pressure())
            .field("gas_resistance", &self.gas_resistance())
            .field("io_reads", &self.io_reads())
            .field("io_errors", &self.io_errors())
            .finish()
    }
}

fn opts(def: &MetricDef, labels: &Labels) -> Opts {
    Opts::new(def.name.clone(), def.help.clone()).const_labels(labels.to_hash_map())
}

fn gauge(def: &MetricDef, labels: &Labels) -> Result<Gauge, ExporterError> {
    Gauge::with_opts(opts(def, labels)).map_err(|source| ExporterError::InvalidMetric {
        name: def.name.clone(),
        source,
    })
}

fn counter(def: &MetricDef, labels: &Labels) -> Result<IntCounter, ExporterError> {
    IntCounter::with_opts(opts(def, labels)).map_err(|source| ExporterError::InvalidMetric {
        name: def.name.clone(),
        source,
    })
}

fn register<M>(registry: &MetricRegistry, metric: M, def: &MetricDef) -> Result<M, ExporterError>
where
    M: Collector + Clone + 'static,
{
    registry
        .registry()
        .register(Box::new(metric.clone()))
        .map_err(|source| ExporterError::Registration {
            name: def.name.clone(),
            source,
        })?;
    Ok(metric)
}
