//! # Sensor Module
//!
//! Magnetic rotary angle sensor handling.
//!
//! This module handles:
//! - Reading absolute angle samples from an AS5600-style sensor
//! - Converting raw 12-bit samples to degrees
//! - Decoding absolute angles into filtered relative scroll deltas
//! - Jitter suppression and 0/360 wrap-around correction

pub mod angle;
pub mod decoder;

pub use angle::{AngleSource, SimulatedAngleSource, ANGLE_RESOLUTION};
pub use decoder::MotionDecoder;
