//! # Angle Source
//!
//! Trait abstraction over the absolute angle sensor, plus a deterministic
//! simulated source for the demo binary and tests.

use crate::error::{Result, ScrollWheelError};

/// Number of discrete positions of the absolute angle sensor (12-bit)
pub const ANGLE_RESOLUTION: u16 = 4096;

/// Convert a raw sensor sample to degrees in `[0, 360)`
///
/// # Arguments
///
/// * `raw` - Sample in `[0, ANGLE_RESOLUTION)`
#[inline]
#[must_use]
pub fn raw_to_degrees(raw: u16) -> f32 {
    raw as f32 * 360.0 / ANGLE_RESOLUTION as f32
}

/// Trait for absolute rotary angle sensors
///
/// `read` is polled by the scheduler and must be non-blocking; it returns the
/// most recent sensor position. `probe` is called once at startup and its
/// failure is fatal: the system halts rather than decoding motion from a
/// sensor that was never verified.
pub trait AngleSource: Send {
    /// Verify the sensor is present and responding
    fn probe(&mut self) -> Result<()>;

    /// Read the current absolute position in `[0, ANGLE_RESOLUTION)`
    fn read(&mut self) -> Result<u16>;
}

/// Deterministic angle source rotating at a fixed rate per read
///
/// Stands in for the hardware sensor when the binary runs without a wheel
/// attached, and drives the scheduler in tests. Wraps at the sensor
/// resolution the same way the real part does.
#[derive(Debug, Clone)]
pub struct SimulatedAngleSource {
    position: u16,
    step: i32,
    available: bool,
}

impl SimulatedAngleSource {
    /// Create a source starting at `position`, advancing `step` counts per read
    #[must_use]
    pub fn new(position: u16, step: i32) -> Self {
        Self {
            position: position % ANGLE_RESOLUTION,
            step,
            available: true,
        }
    }

    /// Create a source whose `probe` fails, for startup-failure tests
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            position: 0,
            step: 0,
            available: false,
        }
    }
}

impl AngleSource for SimulatedAngleSource {
    fn probe(&mut self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(ScrollWheelError::Sensor(
                "rotary encoder not found".to_string(),
            ))
        }
    }

    fn read(&mut self) -> Result<u16> {
        let current = self.position;
        let next = (current as i32 + self.step).rem_euclid(ANGLE_RESOLUTION as i32);
        self.position = next as u16;
        Ok(current)
    }
}
