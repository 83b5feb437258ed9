//! # Scroll Wheel Library
//!
//! Control loop for a battery-powered BLE scroll wheel peripheral.
//!
//! This library provides the core functionality for turning absolute magnetic
//! rotary sensor readings into discrete scroll events and forwarding them,
//! together with battery telemetry, to a single connected peer.

pub mod config;
pub mod error;
pub mod sensor;
pub mod battery;
pub mod link;
pub mod transport;
pub mod scheduler;
