//! # Transport Module
//!
//! Boundary to the wireless link stack.
//!
//! The BLE stack itself (advertising setup, GATT services, pairing) lives
//! outside this crate; the core only needs two primitives from it: sending a
//! notification payload to the attached peer and resuming discoverability
//! after a disconnect. [`Transport`] is that narrow seam, and
//! [`report`] builds the payload shapes the peer understands.

pub mod report;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;

pub use report::{encode_battery_text, encode_scroll_text, encode_wheel_report};

/// Payload shape sent over the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Textual telemetry over a UART-style characteristic
    /// (`SCR:<delta>` / `BAT:<percent>`)
    #[default]
    Text,
    /// 4-byte relative pointer report with only the wheel field populated
    HidWheel,
}

/// Trait for wireless link I/O operations
#[async_trait]
pub trait Transport: Send {
    /// Send a notification payload to the attached peer
    async fn notify(&mut self, payload: &[u8]) -> Result<()>;

    /// Resume advertising so a new peer can attach
    async fn start_discovery(&mut self) -> Result<()>;
}

/// Transport that logs payloads instead of radiating them
///
/// Used by the binary when no link stack is wired in, so the whole control
/// loop can run end-to-end on a desk.
#[derive(Debug, Default)]
pub struct LoggingTransport {
    notified: u64,
}

impl LoggingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payloads sent so far
    #[must_use]
    pub fn notified(&self) -> u64 {
        self.notified
    }
}

#[async_trait]
impl Transport for LoggingTransport {
    async fn notify(&mut self, payload: &[u8]) -> Result<()> {
        self.notified += 1;
        match std::str::from_utf8(payload) {
            Ok(text) => info!("notify: {}", text),
            Err(_) => info!("notify: {:02x?}", payload),
        }
        Ok(())
    }

    async fn start_discovery(&mut self) -> Result<()> {
        info!("Advertising started");
        Ok(())
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::error::ScrollWheelError;
    use std::sync::{Arc, Mutex};

    /// Mock transport for testing
    #[derive(Clone, Default)]
    pub struct MockTransport {
        pub notified_payloads: Arc<Mutex<Vec<Vec<u8>>>>,
        pub discovery_count: Arc<Mutex<u32>>,
        pub notify_error: Arc<Mutex<bool>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn get_notified_payloads(&self) -> Vec<Vec<u8>> {
            self.notified_payloads.lock().unwrap().clone()
        }

        pub fn get_discovery_count(&self) -> u32 {
            *self.discovery_count.lock().unwrap()
        }

        pub fn set_notify_error(&self, fail: bool) {
            *self.notify_error.lock().unwrap() = fail;
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn notify(&mut self, payload: &[u8]) -> Result<()> {
            if *self.notify_error.lock().unwrap() {
                return Err(ScrollWheelError::Transport(
                    "mock notify error".to_string(),
                ));
            }
            self.notified_payloads.lock().unwrap().push(payload.to_vec());
            Ok(())
        }

        async fn start_discovery(&mut self) -> Result<()> {
            *self.discovery_count.lock().unwrap() += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_transport_counts_payloads() {
        let mut transport = LoggingTransport::new();
        transport.notify(b"SCR:3").await.unwrap();
        transport.notify(&[0, 0, 0, 5]).await.unwrap();
        assert_eq!(transport.notified(), 2);
    }

    #[tokio::test]
    async fn test_mock_transport_records_payloads() {
        let mut transport = mocks::MockTransport::new();
        transport.notify(b"BAT:85").await.unwrap();
        transport.start_discovery().await.unwrap();

        assert_eq!(transport.get_notified_payloads(), vec![b"BAT:85".to_vec()]);
        assert_eq!(transport.get_discovery_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_injected_error() {
        let mut transport = mocks::MockTransport::new();
        transport.set_notify_error(true);
        assert!(transport.notify(b"SCR:1").await.is_err());
        assert!(transport.get_notified_payloads().is_empty());
    }
}
