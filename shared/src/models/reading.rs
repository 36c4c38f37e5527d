//! Sensor reading data model.
//!
//! Defines the `SensorReading` structure produced by a sensor on each poll cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single measurement taken from a BME680 sensor.
///
/// Readings are not persisted. Each poll cycle produces a fresh reading that
/// replaces the previous one.
///
/// # Example
///
/// ```
/// use shared::models::SensorReading;
///
/// let reading = SensorReading::new(21.3, 45.2, 1012.5, 50000.0, true);
///
/// assert!(reading.heat_stable);
/// assert_eq!(
///     reading.to_string(),
///     "temp: 21.30 C   humidity: 45.20%   pressure: 1012.50 hPa   gas: 50000.00 Ohms"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Atmospheric pressure in hectopascals.
    pub pressure: f64,
    /// Gas sensor resistance in Ohms.
    pub gas_resistance: f64,
    /// Whether the gas heater had reached its target temperature.
    ///
    /// The gas resistance is only meaningful when this is set.
    pub heat_stable: bool,
}

impl SensorReading {
    /// Creates a new sensor reading.
    ///
    /// # Arguments
    ///
    /// * `temperature` - Temperature in °C
    /// * `humidity` - Relative humidity in %
    /// * `pressure` - Pressure in hPa
    /// * `gas_resistance` - Gas resistance in Ω
    /// * `heat_stable` - Whether the gas heater was stable for this sample
    #[must_use]
    pub fn new(
        temperature: f64,
        humidity: f64,
        pressure: f64,
        gas_resistance: f64,
        heat_stable: bool,
    ) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
            gas_resistance,
            heat_stable,
        }
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temp: {:.2} C   humidity: {:.2}%   pressure: {:.2} hPa   gas: {:.2} Ohms",
            self.temperature, self.humidity, self.pressure, self.gas_resistance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_new() {
        let reading = SensorReading::new(21.3, 45.2, 1012.5, 50000.0, false);

        assert_eq!(reading.temperature, 21.3);
        assert_eq!(reading.humidity, 45.2);
        assert_eq!(reading.pressure, 1012.5);
        assert_eq!(reading.gas_resistance, 50000.0);
        assert!(!reading.heat_stable);
    }

    #[test]
    fn test_reading_display_rounds_to_two_places() {
        let reading = SensorReading::new(19.876, 51.0, 998.123, 123_456.789, true);

        assert_eq!(
            reading.to_string(),
            "temp: 19.88 C   humidity: 51.00%   pressure: 998.12 hPa   gas: 123456.79 Ohms"
        );
    }

    #[test]
    fn test_reading_display_passes_nan_through() {
        let reading = SensorReading::new(f64::NAN, -1.0, 0.0, 0.0, true);

        assert!(reading.to_string().starts_with("temp: NaN C   humidity: -1.00%"));
    }

    #[test]
    fn test_reading_serialization() {
        let reading = SensorReading::new(21.3, 45.2, 1012.5, 50000.0, true);

        let json = serde_json::to_string(&reading).unwrap();

        assert!(json.contains("\"temperature\":21.3"));
        assert!(json.contains("\"heat_stable\":true"));

        let deserialized: SensorReading = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, reading);
    }
}
