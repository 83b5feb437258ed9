//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! All values are fixed for the lifetime of the process: they are read once
//! at startup and never mutated afterwards, matching the compile-time
//! constants of the firmware they configure.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::transport::ReportFormat;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelConfig,

    #[serde(default)]
    pub battery: BatteryConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub transport: TransportConfig,
}

/// Motion decoding configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WheelConfig {
    /// Minimum angular change (degrees) treated as real motion
    #[serde(default = "default_jitter_threshold")]
    pub jitter_threshold: f32,

    /// Largest plausible rotation (degrees) between two consecutive polls;
    /// anything beyond it is treated as a 0/360 wrap
    #[serde(default = "default_max_rotation_per_read")]
    pub max_rotation_per_read: f32,

    /// Scale factor from degrees of rotation to scroll clicks
    #[serde(default = "default_scroll_multiplier")]
    pub scroll_multiplier: f32,
}

/// Battery measurement configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BatteryConfig {
    /// Voltage reported as 0%
    #[serde(default = "default_min_voltage")]
    pub min_voltage: f32,

    /// Voltage reported as 100%
    #[serde(default = "default_max_voltage")]
    pub max_voltage: f32,

    /// ADC reference voltage
    #[serde(default = "default_reference_voltage")]
    pub reference_voltage: f32,

    /// Full-scale raw ADC value (12-bit converter)
    #[serde(default = "default_full_scale")]
    pub full_scale: u16,

    /// Correction factor applied to the computed voltage (voltage divider)
    #[serde(default = "default_correction_factor")]
    pub correction_factor: f32,
}

/// Scheduler cadence configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Interval between scroll samples in ms
    #[serde(default = "default_scroll_interval_ms")]
    pub scroll_interval_ms: u64,

    /// Interval between battery reports in ms
    #[serde(default = "default_battery_interval_ms")]
    pub battery_interval_ms: u64,

    /// Base tick granularity of the control loop in ms
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Delay after a disconnect before advertising is resumed, in ms
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

/// Transport payload configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TransportConfig {
    /// Payload shape sent to the peer
    #[serde(default)]
    pub report_format: ReportFormat,
}

// Default value functions (firmware defaults)
fn default_jitter_threshold() -> f32 { 0.5 }
fn default_max_rotation_per_read() -> f32 { 180.0 }
fn default_scroll_multiplier() -> f32 { 1.0 }

fn default_min_voltage() -> f32 { 3.3 }
fn default_max_voltage() -> f32 { 4.2 }
fn default_reference_voltage() -> f32 { 3.3 }
fn default_full_scale() -> u16 { 4095 }
fn default_correction_factor() -> f32 { 1.0 }

fn default_scroll_interval_ms() -> u64 { 100 }
fn default_battery_interval_ms() -> u64 { 5000 }
fn default_tick_ms() -> u64 { 5 }
fn default_settle_delay_ms() -> u64 { 1000 }

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            jitter_threshold: default_jitter_threshold(),
            max_rotation_per_read: default_max_rotation_per_read(),
            scroll_multiplier: default_scroll_multiplier(),
        }
    }
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            min_voltage: default_min_voltage(),
            max_voltage: default_max_voltage(),
            reference_voltage: default_reference_voltage(),
            full_scale: default_full_scale(),
            correction_factor: default_correction_factor(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            scroll_interval_ms: default_scroll_interval_ms(),
            battery_interval_ms: default_battery_interval_ms(),
            tick_ms: default_tick_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            report_format: ReportFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.wheel.jitter_threshold < 0.0 || self.wheel.jitter_threshold >= 90.0 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("jitter_threshold must be between 0.0 and 90.0")
            ));
        }

        if self.wheel.max_rotation_per_read <= 0.0 || self.wheel.max_rotation_per_read > 180.0 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("max_rotation_per_read must be between 0.0 and 180.0")
            ));
        }

        if self.wheel.scroll_multiplier == 0.0 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("scroll_multiplier must be non-zero")
            ));
        }

        if self.battery.min_voltage >= self.battery.max_voltage {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("min_voltage must be below max_voltage")
            ));
        }

        if self.battery.full_scale == 0 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("full_scale must be greater than 0")
            ));
        }

        if self.battery.correction_factor <= 0.0 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("correction_factor must be greater than 0")
            ));
        }

        if self.scheduler.tick_ms == 0 || self.scheduler.tick_ms > 1000 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("tick_ms must be between 1 and 1000")
            ));
        }

        if self.scheduler.scroll_interval_ms == 0 || self.scheduler.scroll_interval_ms > 60000 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("scroll_interval_ms must be between 1 and 60000")
            ));
        }

        if self.scheduler.battery_interval_ms == 0 || self.scheduler.battery_interval_ms > 600000 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("battery_interval_ms must be between 1 and 600000")
            ));
        }

        if self.scheduler.settle_delay_ms > 60000 {
            return Err(crate::error::ScrollWheelError::Config(
                toml::de::Error::custom("settle_delay_ms must be at most 60000")
            ));
        }

        Ok(())
    }
}
