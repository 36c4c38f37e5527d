//! BME680 Exporter Shared Library
//!
//! This crate contains the sensor-facing types used across the BME680
//! exporter workspace.
//!
//! # Modules
//!
//! - [`models`] - The sensor reading data model
//! - [`config`] - Sensor settings and static metric labels
//! - [`sensor`] - The `Sensor` trait, a scripted in-memory sensor, and the BME680 hardware adapter
//!
//! # Example
//!
//! ```
//! use shared::models::SensorReading;
//! use shared::sensor::{ScriptedSensor, Sensor};
//!
//! let reading = SensorReading::new(21.3, 45.2, 1012.5, 50000.0, true);
//! let mut sensor = ScriptedSensor::new().with_reading(reading);
//!
//! assert_eq!(sensor.get_sensor_data().unwrap(), Some(reading));
//! assert_eq!(sensor.get_sensor_data().unwrap(), None);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod models;
pub mod sensor;

/// Re-export common dependencies for convenience.
pub use serde;
pub use serde_json;
pub use validator;
