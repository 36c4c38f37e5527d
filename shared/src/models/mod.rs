//! Data models for the BME680 exporter.
//!
//! This module contains the measurement structure produced by the sensor on each poll.

pub mod reading;

pub use reading::SensorReading;
