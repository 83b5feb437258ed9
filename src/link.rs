//! # Link Connection State
//!
//! Tracks whether a peer is attached to the wireless link.
//!
//! The transport stack delivers connect/disconnect notifications from its own
//! execution context; the scheduler reads the state from its polling loop.
//! Both sides share one [`LinkState`] handle backed by atomics, so no access
//! is a data race and no lock is ever held.
//!
//! Duplicate notifications are absorbed: only a real `Connected ->
//! Disconnected` transition arms the just-disconnected edge flag, and the
//! flag is consumed at most once per disconnect. The scheduler uses it to
//! trigger exactly one re-advertise per lost connection rather than one per
//! polling tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Thread-safe connection state shared between the transport callback
/// context and the scheduler.
///
/// Cloning is cheap and all clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct LinkState {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    connected: AtomicBool,
    just_disconnected: AtomicBool,
}

impl LinkState {
    /// Creates a new state handle, initially disconnected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport callback: a peer attached.
    ///
    /// Idempotent; repeated calls while already connected have no effect.
    /// A pending disconnect edge is cancelled, since resuming advertising
    /// is moot once a peer is attached again.
    pub fn on_link_up(&self) {
        if !self.inner.connected.swap(true, Ordering::SeqCst) {
            self.inner.just_disconnected.store(false, Ordering::SeqCst);
            info!("Peer connected");
        }
    }

    /// Transport callback: the peer detached.
    ///
    /// Arms the just-disconnected edge only on a real `Connected ->
    /// Disconnected` transition; duplicate notifications are absorbed.
    pub fn on_link_down(&self) {
        if self.inner.connected.swap(false, Ordering::SeqCst) {
            self.inner.just_disconnected.store(true, Ordering::SeqCst);
            info!("Peer disconnected");
        }
    }

    /// Whether a peer is currently attached.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }

    /// Consumes the disconnect edge.
    ///
    /// Returns `true` at most once per disconnect transition, then `false`
    /// until the next disconnect.
    #[must_use]
    pub fn consume_just_disconnected(&self) -> bool {
        self.inner.just_disconnected.swap(false, Ordering::SeqCst)
    }
}
