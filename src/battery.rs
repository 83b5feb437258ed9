//! # Battery Monitor
//!
//! Maps raw ADC samples to a bounded battery percentage.
//!
//! This module handles:
//! - Reading raw samples from the battery sense ADC
//! - Converting samples to voltage via the ADC reference and a correction
//!   factor for the sense voltage divider
//! - Linear mapping of voltage to a percentage clamped to 0-100

use crate::config::BatteryConfig;
use crate::error::{Result, ScrollWheelError};

/// Trait for the raw battery-voltage ADC
pub trait BatterySource: Send {
    /// Read the current raw ADC sample
    fn read(&mut self) -> Result<u16>;
}

/// Fixed-level battery source for the demo binary and tests
#[derive(Debug, Clone)]
pub struct SimulatedBatterySource {
    raw: u16,
    available: bool,
}

impl SimulatedBatterySource {
    /// Create a source that always reads `raw`
    #[must_use]
    pub fn new(raw: u16) -> Self {
        Self {
            raw,
            available: true,
        }
    }

    /// Create a source whose reads fail
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            raw: 0,
            available: false,
        }
    }
}

impl BatterySource for SimulatedBatterySource {
    fn read(&mut self) -> Result<u16> {
        if self.available {
            Ok(self.raw)
        } else {
            Err(ScrollWheelError::Sensor(
                "battery sense ADC unavailable".to_string(),
            ))
        }
    }
}

/// Converts raw battery ADC samples to a clamped percentage.
///
/// Voltages outside the configured `[min_voltage, max_voltage]` window are
/// clamped, never propagated as errors: a sagging or overcharged cell reads
/// 0 or 100, not an out-of-range value.
#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    config: BatteryConfig,
}

impl BatteryMonitor {
    /// Creates a monitor with the given measurement configuration.
    #[must_use]
    pub fn new(config: BatteryConfig) -> Self {
        Self { config }
    }

    /// Reads one sample from `source` and returns the battery level in 0-100.
    pub fn level<S: BatterySource>(&self, source: &mut S) -> Result<u8> {
        let raw = source.read()?;
        Ok(self.percentage_from_raw(raw))
    }

    /// Maps a raw ADC sample to a percentage in 0-100.
    #[must_use]
    pub fn percentage_from_raw(&self, raw: u16) -> u8 {
        let voltage = self.voltage_from_raw(raw);
        self.percentage_from_voltage(voltage)
    }

    /// Converts a raw ADC sample to battery voltage.
    #[must_use]
    pub fn voltage_from_raw(&self, raw: u16) -> f32 {
        raw as f32 * self.config.reference_voltage / self.config.full_scale as f32
            * self.config.correction_factor
    }

    /// Linearly maps a voltage onto 0-100, clamped at both ends.
    #[must_use]
    pub fn percentage_from_voltage(&self, voltage: f32) -> u8 {
        let span = self.config.max_voltage - self.config.min_voltage;
        let fraction = (voltage - self.config.min_voltage) / span;
        (fraction * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> BatteryMonitor {
        BatteryMonitor::new(BatteryConfig::default())
    }

    // ==================== Clamping Tests ====================

    #[test]
    fn test_below_min_voltage_clamps_to_zero() {
        let m = monitor();
        assert_eq!(m.percentage_from_voltage(3.0), 0);
        assert_eq!(m.percentage_from_voltage(0.0), 0);
    }

    #[test]
    fn test_above_max_voltage_clamps_to_hundred() {
        let m = monitor();
        assert_eq!(m.percentage_from_voltage(4.5), 100);
        assert_eq!(m.percentage_from_voltage(9.9), 100);
    }

    #[test]
    fn test_exact_min_voltage_is_zero() {
        let m = monitor();
        assert_eq!(m.percentage_from_voltage(3.3), 0);
    }

    #[test]
    fn test_exact_max_voltage_is_hundred() {
        let m = monitor();
        assert_eq!(m.percentage_from_voltage(4.2), 100);
    }

    // ==================== Mapping Tests ====================

    #[test]
    fn test_midpoint_voltage_is_half() {
        let m = monitor();
        // Midpoint of 3.3-4.2 is 3.75
        assert_eq!(m.percentage_from_voltage(3.75), 50);
    }

    #[test]
    fn test_voltage_from_raw_full_scale() {
        let m = monitor();
        // Full-scale sample at 3.3V reference, correction 1.0
        let voltage = m.voltage_from_raw(4095);
        assert!((voltage - 3.3).abs() < 0.001);
    }

    #[test]
    fn test_voltage_from_raw_zero() {
        let m = monitor();
        assert_eq!(m.voltage_from_raw(0), 0.0);
    }

    #[test]
    fn test_correction_factor_scales_voltage() {
        let config = BatteryConfig {
            correction_factor: 2.0,
            ..BatteryConfig::default()
        };
        let m = BatteryMonitor::new(config);
        // Half-scale sample doubled by the divider correction
        let voltage = m.voltage_from_raw(2048);
        assert!((voltage - 3.3).abs() < 0.01);
    }

    #[test]
    fn test_raw_below_min_maps_to_zero() {
        // Correction 1.0 caps voltage at 3.3V = min_voltage, so any raw
        // sample short of full scale sits below the window
        let m = monitor();
        assert_eq!(m.percentage_from_raw(2000), 0);
    }

    #[test]
    fn test_full_charge_with_divider() {
        // 4.2V cell behind a correction factor of 1.28 reads near full scale
        let config = BatteryConfig {
            correction_factor: 1.28,
            ..BatteryConfig::default()
        };
        let m = BatteryMonitor::new(config);
        assert_eq!(m.percentage_from_raw(4095), 100);
    }

    // ==================== Source Tests ====================

    #[test]
    fn test_level_reads_from_source() {
        let m = BatteryMonitor::new(BatteryConfig {
            correction_factor: 1.28,
            ..BatteryConfig::default()
        });
        let mut source = SimulatedBatterySource::new(4095);
        assert_eq!(m.level(&mut source).unwrap(), 100);
    }

    #[test]
    fn test_level_propagates_source_error() {
        let m = monitor();
        let mut source = SimulatedBatterySource::unavailable();
        assert!(m.level(&mut source).is_err());
    }
}
