//! BME680 Exporter
//!
//! Samples a BME680 environmental sensor and serves the readings as Prometheus metrics.
//!
//! # Usage
//!
//! ```bash
//! bme680-exporter --help
//! bme680-exporter --port 9500 --interval 5
//! bme680-exporter --labels '{"location": "greenhouse"}' --verbose
//! ```

#![deny(unsafe_code)]

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use exporter::{Config, DEFAULT_PORT};
use shared::config::{I2cAddress, Labels, SensorSettings};
use shared::sensor::Bme680Sensor;
use tracing_subscriber::EnvFilter;

/// BME680 exporter - serves BME680 sensor readings as Prometheus metrics
#[derive(Parser, Debug)]
#[command(name = "bme680-exporter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase output verbosity
    #[arg(short, long, env = "BME680_EXPORTER_VERBOSE")]
    verbose: bool,

    /// Exporter port
    #[arg(short, long, env = "BME680_EXPORTER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address the scrape server binds to
    #[arg(long, env = "BME680_EXPORTER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// JSON object of Prometheus labels to apply
    #[arg(short, long, env = "BME680_EXPORTER_LABELS")]
    labels: Option<Labels>,

    /// Measurement sample interval in seconds
    #[arg(
        short,
        long,
        env = "BME680_EXPORTER_INTERVAL",
        default_value_t = Config::default_interval().as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval: u64,

    /// I2C character device the sensor is attached to
    #[arg(long, env = "BME680_EXPORTER_I2C_DEVICE", default_value = "/dev/i2c-1")]
    i2c_device: String,

    /// Sensor I2C address: primary (0x76) or secondary (0x77)
    #[arg(long, env = "BME680_EXPORTER_I2C_ADDRESS", default_value = "primary")]
    i2c_address: I2cAddress,

    /// Gas heater target temperature in °C
    #[arg(long, default_value_t = 320)]
    heater_temperature: u16,

    /// Gas heater duration in milliseconds
    #[arg(long, default_value_t = 150)]
    heater_duration: u16,

    /// Offset added to temperature readings in °C
    #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
    temperature_offset: f32,
}

impl Cli {
    fn into_config(self) -> Config {
        let sensor = SensorSettings::default()
            .with_bus(self.i2c_device, self.i2c_address)
            .with_heater(self.heater_temperature, self.heater_duration)
            .with_temperature_offset(self.temperature_offset);

        Config {
            host: self.host,
            port: self.port,
            interval: Duration::from_secs(self.interval),
            labels: self.labels.unwrap_or_default(),
            sensor,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config();
    tracing::info!(
        device = %config.sensor.i2c_device,
        address = %config.sensor.address,
        "Initializing BME680"
    );
    let sensor = Bme680Sensor::open(&config.sensor).context("Failed to open BME680")?;

    exporter::run(config, sensor).await
}
