//! Scripted in-memory sensor.
//!
//! Replays a queue of outcomes instead of talking to hardware. Useful for
//! development and for testing the poll loop deterministically.

use super::{Sensor, SensorError};
use crate::config::SensorSettings;
use crate::models::SensorReading;
use std::collections::VecDeque;

/// One scripted result of `get_sensor_data`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedOutcome {
    /// A fresh reading is returned.
    Reading(SensorReading),
    /// No new data is ready.
    NotReady,
    /// The read fails with a bus error carrying this message.
    IoError(String),
}

/// A sensor that returns pre-programmed outcomes in order.
///
/// Once the script is exhausted every further read reports `Ok(None)`.
///
/// # Example
///
/// ```
/// use shared::models::SensorReading;
/// use shared::sensor::{ScriptedSensor, Sensor};
///
/// let mut sensor = ScriptedSensor::new()
///     .with_reading(SensorReading::new(20.0, 40.0, 1000.0, 12000.0, true))
///     .with_io_error("remote I/O error");
///
/// assert!(sensor.get_sensor_data().unwrap().is_some());
/// assert!(sensor.get_sensor_data().is_err());
/// assert_eq!(sensor.reads(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    script: VecDeque<ScriptedOutcome>,
    configured: Option<SensorSettings>,
    configure_error: Option<String>,
    reads: usize,
}

impl ScriptedSensor {
    /// Creates a sensor with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sensor from a list of outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ScriptedOutcome>) -> Self {
        Self {
            script: outcomes.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Appends a successful reading to the script.
    #[must_use]
    pub fn with_reading(mut self, reading: SensorReading) -> Self {
        self.script.push_back(ScriptedOutcome::Reading(reading));
        self
    }

    /// Appends a "no new data" result to the script.
    #[must_use]
    pub fn with_not_ready(mut self) -> Self {
        self.script.push_back(ScriptedOutcome::NotReady);
        self
    }

    /// Appends a failing read to the script.
    #[must_use]
    pub fn with_io_error(mut self, message: impl Into<String>) -> Self {
        self.script
            .push_back(ScriptedOutcome::IoError(message.into()));
        self
    }

    /// Makes `configure` fail as if no sensor answered on the bus.
    #[must_use]
    pub fn failing_configure(mut self, message: impl Into<String>) -> Self {
        self.configure_error = Some(message.into());
        self
    }

    /// Returns the settings the sensor was configured with, if any.
    #[must_use]
    pub fn configured(&self) -> Option<&SensorSettings> {
        self.configured.as_ref()
    }

    /// Returns how many times `get_sensor_data` was called.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Returns how many scripted outcomes are left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Sensor for ScriptedSensor {
    fn configure(&mut self, settings: &SensorSettings) -> Result<(), SensorError> {
        if let Some(message) = &self.configure_error {
            return Err(SensorError::NotFound(message.clone()));
        }
        self.configured = Some(settings.clone());
        Ok(())
    }

    fn get_sensor_data(&mut self) -> Result<Option<SensorReading>, SensorError> {
        self.reads += 1;
        match self.script.pop_front() {
            Some(ScriptedOutcome::Reading(reading)) => Ok(Some(reading)),
            Some(ScriptedOutcome::NotReady) | None => Ok(None),
            Some(ScriptedOutcome::IoError(message)) => Err(SensorError::Bus(message)),
        }
    }
}
