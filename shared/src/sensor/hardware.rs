//! BME680 hardware adapter.
//!
//! Wraps the `bme680` driver over a Linux I2C character device. Register-level
//! communication is left to the driver; this adapter translates
//! `SensorSettings` into driver settings and driver field data into
//! `SensorReading`s.

use super::{Sensor, SensorError};
use crate::config::{FilterSize, I2cAddress, Oversampling, SensorSettings};
use crate::models::SensorReading;
use ::bme680::{
    Bme680, FieldDataCondition, I2CAddress, IIRFilterSize, OversamplingSetting, PowerMode,
    SettingsBuilder,
};
use linux_embedded_hal::{Delay, I2cdev};
use std::fmt::Debug;
use std::time::Duration;

/// Ambient temperature assumed when computing the heater resistance, in °C.
const AMBIENT_TEMPERATURE: i8 = 25;

/// A BME680 sensor attached to a Linux I2C bus.
pub struct Bme680Sensor {
    device: Bme680<I2cdev, Delay>,
    delay: Delay,
    profile_duration: Duration,
}

impl Bme680Sensor {
    /// Opens the I2C device and initializes the sensor found at the configured address.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The I2C device cannot be opened
    /// - No BME680 answers at the configured address
    pub fn open(settings: &SensorSettings) -> Result<Self, SensorError> {
        let i2c = I2cdev::new(&settings.i2c_device)
            .map_err(|e| SensorError::Bus(format!("{}: {e}", settings.i2c_device)))?;

        let mut delay = Delay;
        let device = Bme680::init(i2c, &mut delay, driver_address(settings.address))
            .map_err(|e| {
                SensorError::NotFound(format!(
                    "no BME680 at {} on {}: {e:?}",
                    settings.address, settings.i2c_device
                ))
            })?;

        tracing::debug!(
            device = %settings.i2c_device,
            address = %settings.address,
            "BME680 initialized"
        );

        Ok(Self {
            device,
            delay,
            profile_duration: Duration::ZERO,
        })
    }
}

impl Sensor for Bme680Sensor {
    fn configure(&mut self, settings: &SensorSettings) -> Result<(), SensorError> {
        if settings.heater_profile != 0 {
            return Err(SensorError::InvalidSettings(format!(
                "heater profile {} is not supported, only profile 0 can be driven",
                settings.heater_profile
            )));
        }

        let driver_settings = SettingsBuilder::new()
            .with_humidity_oversampling(driver_oversampling(settings.humidity_oversampling))
            .with_pressure_oversampling(driver_oversampling(settings.pressure_oversampling))
            .with_temperature_oversampling(driver_oversampling(settings.temperature_oversampling))
            .with_temperature_filter(driver_filter(settings.filter))
            .with_gas_measurement(
                settings.heater_duration(),
                settings.heater_temperature,
                AMBIENT_TEMPERATURE,
            )
            .with_temperature_offset(settings.temperature_offset)
            .with_run_gas(settings.gas_enabled)
            .build();

        self.profile_duration = self
            .device
            .get_profile_dur(&driver_settings.0)
            .map_err(bus_error)?;
        self.device
            .set_sensor_settings(&mut self.delay, driver_settings)
            .map_err(bus_error)?;

        tracing::debug!(
            profile_duration_ms = self.profile_duration.as_millis(),
            "BME680 settings applied"
        );
        Ok(())
    }

    fn get_sensor_data(&mut self) -> Result<Option<SensorReading>, SensorError> {
        self.device
            .set_sensor_mode(&mut self.delay, PowerMode::ForcedMode)
            .map_err(bus_error)?;
        std::thread::sleep(self.profile_duration);

        let (data, condition) = self
            .device
            .get_sensor_data(&mut self.delay)
            .map_err(bus_error)?;

        if matches!(condition, FieldDataCondition::Unchanged) {
            return Ok(None);
        }

        Ok(Some(SensorReading::new(
            f64::from(data.temperature_celsius()),
            f64::from(data.humidity_percent()),
            f64::from(data.pressure_hpa()),
            f64::from(data.gas_resistance_ohm()),
            data.heat_stable(),
        )))
    }
}

fn bus_error<E: Debug>(error: E) -> SensorError {
    SensorError::Bus(format!("{error:?}"))
}

fn driver_address(address: I2cAddress) -> I2CAddress {
    match address {
        I2cAddress::Primary => I2CAddress::Primary,
        I2cAddress::Secondary => I2CAddress::Secondary,
    }
}

fn driver_oversampling(oversampling: Oversampling) -> OversamplingSetting {
    match oversampling {
        Oversampling::Skipped => OversamplingSetting::OSNone,
        Oversampling::X1 => OversamplingSetting::OS1x,
        Oversampling::X2 => OversamplingSetting::OS2x,
        Oversampling::X4 => OversamplingSetting::OS4x,
        Oversampling::X8 => OversamplingSetting::OS8x,
        Oversampling::X16 => OversamplingSetting::OS16x,
    }
}

fn driver_filter(filter: FilterSize) -> IIRFilterSize {
    match filter {
        FilterSize::Size0 => IIRFilterSize::Size0,
        FilterSize::Size1 => IIRFilterSize::Size1,
        FilterSize::Size3 => IIRFilterSize::Size3,
        FilterSize::Size7 => IIRFilterSize::Size7,
        FilterSize::Size15 => IIRFilterSize::Size15,
        FilterSize::Size31 => IIRFilterSize::Size31,
        FilterSize::Size63 => IIRFilterSize::Size63,
        FilterSize::Size127 => IIRFilterSize::Size127,
    }
}
