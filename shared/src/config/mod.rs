//! Configuration module for the BME680 exporter.
//!
//! This module contains the sensor settings and the static label set applied to every metric.

pub mod labels;
pub mod settings;

pub use labels::{Labels, LabelsError};
pub use settings::{FilterSize, I2cAddress, Oversampling, SensorSettings, SettingsError};
