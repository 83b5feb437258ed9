//! # Scroll Wheel
//!
//! Control loop for a battery-powered BLE scroll wheel peripheral.
//!
//! Decodes absolute magnetic rotary sensor readings into discrete scroll
//! events and forwards them, with battery telemetry, to a single connected
//! peer.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber;

mod config;
mod error;
mod sensor;
mod battery;
mod link;
mod transport;
mod scheduler;

use battery::SimulatedBatterySource;
use config::Config;
use link::LinkState;
use scheduler::TelemetryScheduler;
use sensor::{AngleSource, SimulatedAngleSource};
use transport::LoggingTransport;

/// Default configuration file path
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the scroll wheel control loop
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (falls back to built-in defaults)
///    - Probe the angle sensor; a missing sensor is fatal
///
/// 2. **Main Loop**
///    - Sample the sensor on the scroll cadence and emit non-zero deltas
///    - Emit the battery level on the battery cadence
///    - Resume advertising once per disconnect, after a settle delay
///    - Handle Ctrl+C for graceful shutdown
///
/// # Current Behavior
///
/// The binary runs the full control loop against simulated sensor sources
/// and a logging transport, so the core can be exercised end-to-end without
/// the radio or the wheel hardware attached. Wiring in a real BLE stack
/// means implementing [`transport::Transport`] and handing its connect and
/// disconnect callbacks a [`LinkState`] clone.
///
/// # Errors
///
/// Returns error if:
/// - The configuration file exists but is invalid
/// - The angle sensor fails its startup probe
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Scroll Wheel v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        Config::load(&config_path)?
    } else {
        warn!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    // Simulated hardware: a wheel turning ~5 degrees per poll and a cell
    // reading full scale on the battery sense ADC
    let mut angle_source = SimulatedAngleSource::new(0, 57);
    let battery_source = SimulatedBatterySource::new(4095);

    // A sensor that fails its probe means fabricated motion; halt instead
    angle_source.probe()?;
    info!("Rotary sensor probe OK");

    let link = LinkState::new();
    let transport = LoggingTransport::new();

    // No radio stack attached: treat the logging peer as connected so the
    // loop emits from the start
    link.on_link_up();

    let mut scheduler = TelemetryScheduler::new(
        &config,
        angle_source,
        battery_source,
        transport,
        link,
    );

    info!(
        "Scroll Wheel ready (scroll every {}ms, battery every {}ms, tick {}ms)",
        config.scheduler.scroll_interval_ms,
        config.scheduler.battery_interval_ms,
        config.scheduler.tick_ms,
    );
    info!("Press Ctrl+C to exit");

    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    Ok(())
}
