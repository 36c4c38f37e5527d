//! Sensor poll loop.
//!
//! Reads the sensor at a fixed interval and hands every result to the exporter.

use crate::metrics::{PollOutcome, SensorExporter};
use shared::sensor::Sensor;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Background poller driving one sensor.
pub struct Poller<S> {
    sensor: S,
    exporter: SensorExporter,
    interval_duration: Duration,
}

impl<S: Sensor> Poller<S> {
    /// Creates a new poller.
    ///
    /// # Arguments
    ///
    /// * `sensor` - An already configured sensor
    /// * `exporter` - The exporter that receives each reading
    /// * `interval_duration` - Time between the start of two poll cycles
    #[must_use]
    pub fn new(sensor: S, exporter: SensorExporter, interval_duration: Duration) -> Self {
        Self {
            sensor,
            exporter,
            interval_duration,
        }
    }

    /// Returns the configured poll interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval_duration
    }

    /// Returns the exporter this poller writes to.
    #[must_use]
    pub fn exporter(&self) -> &SensorExporter {
        &self.exporter
    }

    /// Returns the sensor being polled.
    #[must_use]
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Runs a single poll cycle.
    pub fn poll_once(&mut self) -> PollOutcome {
        self.exporter.measure(&mut self.sensor)
    }

    /// Starts the poll loop.
    ///
    /// The first cycle runs immediately. A slow read delays the following
    /// cycles instead of triggering a burst of catch-up reads.
    ///
    /// # Cancellation
    ///
    /// This function runs until the future is dropped.
    pub async fn run(mut self) {
        let mut tick = interval(self.interval_duration);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tick.tick().await;
            self.poll_once();
        }
    }
}
