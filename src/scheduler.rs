//! # Telemetry Scheduler
//!
//! The cooperative control loop of the wheel.
//!
//! A single loop ticks at a fixed base granularity and checks two
//! independent cadences on every tick: a fast scroll cadence that samples
//! the sensor and emits a delta when the wheel actually moved, and a slow
//! battery cadence that emits the current charge level. Both are gated on a
//! peer being attached. The loop also watches for the disconnect edge and
//! resumes advertising once per lost connection, after a settle delay.
//!
//! Because both cadences are checked every tick rather than driven by
//! separate timers, neither can delay the other by more than one tick
//! period, and the worst-case lateness of either action is bounded by the
//! base granularity.
//!
//! All work within one tick is sequential; the only shared state crossing
//! execution contexts is [`LinkState`], written by the transport callbacks
//! and read here.

use std::time::{Duration, Instant};

use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::battery::{BatteryMonitor, BatterySource};
use crate::config::Config;
use crate::link::LinkState;
use crate::sensor::{AngleSource, MotionDecoder};
use crate::transport::{
    encode_battery_text, encode_scroll_text, encode_wheel_report, ReportFormat, Transport,
};

/// Connection-gated periodic scheduler.
///
/// Owns the motion decoder, the battery monitor and its own last-fired
/// timestamps; the only state it shares with other execution contexts is
/// the [`LinkState`] handle.
pub struct TelemetryScheduler<A, B, T> {
    angle_source: A,
    battery_source: B,
    transport: T,
    link: LinkState,
    decoder: MotionDecoder,
    monitor: BatteryMonitor,
    report_format: ReportFormat,
    scroll_interval: Duration,
    battery_interval: Duration,
    tick_period: Duration,
    settle_delay: Duration,
    /// Last-fired times; `None` means the action is due on the first
    /// connected tick
    last_scroll: Option<Instant>,
    last_battery: Option<Instant>,
}

impl<A, B, T> TelemetryScheduler<A, B, T>
where
    A: AngleSource,
    B: BatterySource,
    T: Transport,
{
    /// Creates a scheduler wired to the given sources, transport and link
    /// state, with all cadences taken from `config`.
    pub fn new(
        config: &Config,
        angle_source: A,
        battery_source: B,
        transport: T,
        link: LinkState,
    ) -> Self {
        Self {
            angle_source,
            battery_source,
            transport,
            link,
            decoder: MotionDecoder::new(
                config.wheel.jitter_threshold,
                config.wheel.max_rotation_per_read,
                config.wheel.scroll_multiplier,
            ),
            monitor: BatteryMonitor::new(config.battery.clone()),
            report_format: config.transport.report_format,
            scroll_interval: Duration::from_millis(config.scheduler.scroll_interval_ms),
            battery_interval: Duration::from_millis(config.scheduler.battery_interval_ms),
            tick_period: Duration::from_millis(config.scheduler.tick_ms),
            settle_delay: Duration::from_millis(config.scheduler.settle_delay_ms),
            last_scroll: None,
            last_battery: None,
        }
    }

    /// Runs the loop until the task is dropped (the device runs until
    /// power-off; shutdown is the caller's concern).
    pub async fn run(&mut self) {
        let mut ticker = interval(self.tick_period);
        loop {
            ticker.tick().await;
            self.tick(Instant::now()).await;
        }
    }

    /// Executes one tick of the control loop at time `now`.
    ///
    /// Mid-loop failures (a bad sensor read, a notify that raced a
    /// disconnect) are logged and absorbed; the loop never stops for them.
    pub async fn tick(&mut self, now: Instant) {
        if self.link.is_connected() && Self::due(self.last_scroll, now, self.scroll_interval) {
            self.last_scroll = Some(now);
            self.emit_scroll().await;
        }

        if self.link.is_connected() && Self::due(self.last_battery, now, self.battery_interval) {
            self.last_battery = Some(now);
            self.emit_battery().await;
        }

        if self.link.consume_just_disconnected() {
            // Give the stack time to tear the old connection down before
            // advertising again; exactly one resume per disconnect
            tokio::time::sleep(self.settle_delay).await;
            match self.transport.start_discovery().await {
                Ok(()) => info!("Advertising resumed after disconnect"),
                Err(e) => warn!("Failed to resume advertising: {}", e),
            }
        }
    }

    fn due(last: Option<Instant>, now: Instant, interval: Duration) -> bool {
        match last {
            None => true,
            Some(last) => now.duration_since(last) >= interval,
        }
    }

    async fn emit_scroll(&mut self) {
        let raw = match self.angle_source.read() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Angle read failed: {}", e);
                return;
            }
        };

        let delta = self.decoder.decode_raw(raw);
        if delta == 0 {
            return;
        }

        let result = match self.report_format {
            ReportFormat::Text => self.transport.notify(&encode_scroll_text(delta)).await,
            ReportFormat::HidWheel => self.transport.notify(&encode_wheel_report(delta)).await,
        };

        if let Err(e) = result {
            debug!("Failed to send scroll delta {}: {}", delta, e);
        }
    }

    async fn emit_battery(&mut self) {
        let level = match self.monitor.level(&mut self.battery_source) {
            Ok(level) => level,
            Err(e) => {
                warn!("Battery read failed: {}", e);
                return;
            }
        };

        debug!("Battery level: {}%", level);
        if let Err(e) = self.transport.notify(&encode_battery_text(level)).await {
            debug!("Failed to send battery level: {}", e);
        }
    }
}
