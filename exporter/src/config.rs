//! Exporter configuration module.
//!
//! Collects everything `run` needs: where to listen, how often to poll, which
//! static labels to attach, and how to configure the sensor.

use anyhow::{Context, Result};
use shared::config::{FilterSize, Labels, SensorSettings};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Default port of the scrape endpoint.
pub const DEFAULT_PORT: u16 = 9500;

/// Exporter configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Time between two sensor reads.
    pub interval: Duration,
    /// Static labels applied to every metric.
    pub labels: Labels,
    /// One-time sensor configuration.
    pub sensor: SensorSettings,
}

impl Config {
    /// Returns the default poll interval.
    ///
    /// Derived from the default filter size's register value, which gives two seconds.
    #[must_use]
    pub fn default_interval() -> Duration {
        Duration::from_secs(u64::from(FilterSize::Size3.register_value()))
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not a valid IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            interval: Self::default_interval(),
            labels: Labels::new(),
            sensor: SensorSettings::default(),
        }
    }
}
