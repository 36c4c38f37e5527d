//! Sensor abstraction.
//!
//! The `Sensor` trait is the seam between the poll loop and the hardware. It
//! has two implementations:
//!
//! - [`ScriptedSensor`] replays a fixed sequence of outcomes, for development and testing
//! - `Bme680Sensor` drives a real BME680 over Linux I2C (feature `hardware`)

#[cfg(feature = "hardware")]
pub mod hardware;
pub mod scripted;

#[cfg(feature = "hardware")]
pub use hardware::Bme680Sensor;
pub use scripted::{ScriptedOutcome, ScriptedSensor};

use crate::config::SensorSettings;
use crate::models::SensorReading;
use thiserror::Error;

/// Errors that can occur while talking to a sensor.
#[derive(Debug, Error)]
pub enum SensorError {
    /// No sensor answered at the configured address.
    #[error("Sensor not found: {0}")]
    NotFound(String),

    /// The bus transaction failed.
    #[error("Bus error: {0}")]
    Bus(String),

    /// The sensor cannot apply the requested settings.
    #[error("Invalid sensor settings: {0}")]
    InvalidSettings(String),

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An environmental sensor that can be configured once and polled repeatedly.
pub trait Sensor: Send {
    /// Applies the one-time sampling configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the sensor rejects the settings or the bus fails.
    fn configure(&mut self, settings: &SensorSettings) -> Result<(), SensorError>;

    /// Reads the latest measurement.
    ///
    /// Returns `Ok(None)` when no fresh sample is ready yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn get_sensor_data(&mut self) -> Result<Option<SensorReading>, SensorError>;
}

impl<S: Sensor + ?Sized> Sensor for Box<S> {
    fn configure(&mut self, settings: &SensorSettings) -> Result<(), SensorError> {
        (**self).configure(settings)
    }

    fn get_sensor_data(&mut self) -> Result<Option<SensorReading>, SensorError> {
        (**self).get_sensor_data()
    }
}
