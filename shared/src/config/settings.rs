//! Sensor sampling settings.
//!
//! `SensorSettings` bundles the one-time configuration applied to the sensor at
//! startup: oversampling per channel, IIR filter width, and the gas heater profile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Errors that can occur while building sensor settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A setting is outside its supported range.
    #[error("Invalid sensor settings: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    /// The I2C address could not be parsed.
    #[error("Unknown I2C address: '{0}'. Expected 'primary', 'secondary', '0x76' or '0x77'")]
    UnknownAddress(String),
}

/// I2C address the sensor answers on, selected by the SDO pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum I2cAddress {
    /// 0x76, SDO tied to ground.
    #[default]
    Primary,
    /// 0x77, SDO tied to VDDIO.
    Secondary,
}

impl I2cAddress {
    /// Returns the 7-bit bus address.
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            Self::Primary => 0x76,
            Self::Secondary => 0x77,
        }
    }
}

impl fmt::Display for I2cAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.value())
    }
}

impl FromStr for I2cAddress {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "0x76" => Ok(Self::Primary),
            "secondary" | "0x77" => Ok(Self::Secondary),
            _ => Err(SettingsError::UnknownAddress(s.to_string())),
        }
    }
}

/// Oversampling rate for one measurement channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Oversampling {
    /// Channel is not measured.
    Skipped,
    /// One sample.
    X1,
    /// Two samples averaged.
    X2,
    /// Four samples averaged.
    X4,
    /// Eight samples averaged.
    X8,
    /// Sixteen samples averaged.
    X16,
}

impl fmt::Display for Oversampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::X1 => write!(f, "1x"),
            Self::X2 => write!(f, "2x"),
            Self::X4 => write!(f, "4x"),
            Self::X8 => write!(f, "8x"),
            Self::X16 => write!(f, "16x"),
        }
    }
}

/// IIR filter coefficient applied to temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterSize {
    /// Filter disabled.
    Size0,
    /// Coefficient 1.
    Size1,
    /// Coefficient 3.
    Size3,
    /// Coefficient 7.
    Size7,
    /// Coefficient 15.
    Size15,
    /// Coefficient 31.
    Size31,
    /// Coefficient 63.
    Size63,
    /// Coefficient 127.
    Size127,
}

impl FilterSize {
    /// Returns the value written to the sensor's filter register.
    #[must_use]
    pub fn register_value(self) -> u8 {
        match self {
            Self::Size0 => 0,
            Self::Size1 => 1,
            Self::Size3 => 2,
            Self::Size7 => 3,
            Self::Size15 => 4,
            Self::Size31 => 5,
            Self::Size63 => 6,
            Self::Size127 => 7,
        }
    }

    /// Returns the filter coefficient.
    #[must_use]
    pub fn coefficient(self) -> u8 {
        match self {
            Self::Size0 => 0,
            Self::Size1 => 1,
            Self::Size3 => 3,
            Self::Size7 => 7,
            Self::Size15 => 15,
            Self::Size31 => 31,
            Self::Size63 => 63,
            Self::Size127 => 127,
        }
    }
}

/// One-time sensor configuration.
///
/// The defaults match the recommended indoor profile: humidity 2x, pressure
/// 4x, temperature 8x, filter size 3, and the gas heater at 320 °C for 150 ms.
///
/// # Example
///
/// ```
/// use shared::config::{FilterSize, SensorSettings};
///
/// let settings = SensorSettings::default().with_heater(300, 100);
///
/// assert_eq!(settings.filter, FilterSize::Size3);
/// assert!(settings.validate_settings().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SensorSettings {
    /// Path of the Linux I2C character device.
    #[validate(length(min = 1, message = "I2C device path cannot be empty"))]
    pub i2c_device: String,

    /// I2C address of the sensor.
    pub address: I2cAddress,

    /// Humidity oversampling.
    pub humidity_oversampling: Oversampling,

    /// Pressure oversampling.
    pub pressure_oversampling: Oversampling,

    /// Temperature oversampling.
    pub temperature_oversampling: Oversampling,

    /// IIR filter size.
    pub filter: FilterSize,

    /// Whether gas resistance is measured.
    pub gas_enabled: bool,

    /// Heater target temperature in °C.
    #[validate(range(min = 200, max = 400))]
    pub heater_temperature: u16,

    /// Heater on-time in milliseconds.
    #[validate(range(min = 1, max = 4032))]
    pub heater_duration_ms: u16,

    /// Heater profile slot.
    #[validate(range(max = 9))]
    pub heater_profile: u8,

    /// Offset added to the temperature reading, in °C.
    pub temperature_offset: f32,
}

impl SensorSettings {
    /// Sets the heater target temperature (°C) and duration (ms).
    #[must_use]
    pub fn with_heater(mut self, temperature: u16, duration_ms: u16) -> Self {
        self.heater_temperature = temperature;
        self.heater_duration_ms = duration_ms;
        self
    }

    /// Sets the I2C device path and address.
    #[must_use]
    pub fn with_bus(mut self, i2c_device: impl Into<String>, address: I2cAddress) -> Self {
        self.i2c_device = i2c_device.into();
        self.address = address;
        self
    }

    /// Sets the temperature offset in °C.
    #[must_use]
    pub fn with_temperature_offset(mut self, offset: f32) -> Self {
        self.temperature_offset = offset;
        self
    }

    /// Returns the heater duration as a `Duration`.
    #[must_use]
    pub fn heater_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.heater_duration_ms))
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The I2C device path is empty
    /// - The heater temperature is outside 200-400 °C
    /// - The heater duration is outside 1-4032 ms
    /// - The heater profile is above 9
    pub fn validate_settings(&self) -> Result<(), SettingsError> {
        self.validate()?;
        Ok(())
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            i2c_device: "/dev/i2c-1".to_string(),
            address: I2cAddress::Primary,
            humidity_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X4,
            temperature_oversampling: Oversampling::X8,
            filter: FilterSize::Size3,
            gas_enabled: true,
            heater_temperature: 320,
            heater_duration_ms: 150,
            heater_profile: 0,
            temperature_offset: 6.0,
        }
    }
}

impl fmt::Display for SensorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} filter: {} oversampling(h: {}, p: {}, t: {}) heater: {} C for {} ms (profile {})",
            self.i2c_device,
            self.address,
            self.filter.coefficient(),
            self.humidity_oversampling,
            self.pressure_oversampling,
            self.temperature_oversampling,
            self.heater_temperature,
            self.heater_duration_ms,
            self.heater_profile,
        )
    }
}
