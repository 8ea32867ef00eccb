//! Process-wide notification bus.
//!
//! The coordinator subscribes to the signals below. Publishers are the
//! control-signal handlers, the config watcher and anything else holding a
//! bus handle.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the broadcast ring. Slow subscribers past this lag and skip.
const BUS_CAPACITY: usize = 64;

/// Named signals delivered over the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", content = "payload", rename_all = "snake_case")]
pub enum Signal {
    /// The automatic-updates preference changed. Payload is the new value.
    EnableAutomaticUpdatesChanged(bool),
    /// Tear down and rebuild the presentation session.
    ReloadRequested,
    /// "Customize…": open the live session's layout for editing.
    CustomizeRequested,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::EnableAutomaticUpdatesChanged(_) => "enable_automatic_updates_changed",
            Signal::ReloadRequested => "reload_requested",
            Signal::CustomizeRequested => "customize_requested",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::EnableAutomaticUpdatesChanged(on) => write!(f, "{}({})", self.name(), on),
            Signal::ReloadRequested | Signal::CustomizeRequested => write!(f, "{}", self.name()),
        }
    }
}

/// Typed publish/subscribe channel.
///
/// Each subscriber receives every signal published after it subscribed, in
/// publication order.
pub trait NotificationBus: Send + Sync {
    fn publish(&self, signal: Signal);
    fn subscribe(&self) -> broadcast::Receiver<Signal>;
}

/// In-process bus backed by `tokio::sync::broadcast`.
#[derive(Debug, Clone)]
pub struct LocalBus {
    tx: broadcast::Sender<Signal>,
}

impl LocalBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationBus for LocalBus {
    fn publish(&self, signal: Signal) {
        match self.tx.send(signal) {
            Ok(receivers) => debug!(
                event = "core.bus.publish_completed",
                signal = %signal,
                receivers = receivers,
            ),
            Err(_) => debug!(
                event = "core.bus.publish_skipped",
                signal = %signal,
                reason = "no subscribers",
            ),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(
            Signal::EnableAutomaticUpdatesChanged(true).name(),
            "enable_automatic_updates_changed"
        );
        assert_eq!(Signal::ReloadRequested.name(), "reload_requested");
        assert_eq!(Signal::CustomizeRequested.name(), "customize_requested");
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(
            Signal::EnableAutomaticUpdatesChanged(false).to_string(),
            "enable_automatic_updates_changed(false)"
        );
        assert_eq!(Signal::ReloadRequested.to_string(), "reload_requested");
    }

    #[test]
    fn test_signal_serializes_with_payload() {
        let json = serde_json::to_string(&Signal::EnableAutomaticUpdatesChanged(true)).unwrap();
        assert_eq!(
            json,
            r#"{"signal":"enable_automatic_updates_changed","payload":true}"#
        );
        let json = serde_json::to_string(&Signal::ReloadRequested).unwrap();
        assert_eq!(json, r#"{"signal":"reload_requested"}"#);
    }

    #[test]
    fn test_publish_without_subscribers_does_not_panic() {
        let bus = LocalBus::new();
        bus.publish(Signal::ReloadRequested);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_in_order() {
        let bus = LocalBus::new();
        let mut rx = bus.subscribe();

        bus.publish(Signal::ReloadRequested);
        bus.publish(Signal::EnableAutomaticUpdatesChanged(true));
        bus.publish(Signal::EnableAutomaticUpdatesChanged(false));

        assert_eq!(rx.recv().await.unwrap(), Signal::ReloadRequested);
        assert_eq!(
            rx.recv().await.unwrap(),
            Signal::EnableAutomaticUpdatesChanged(true)
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            Signal::EnableAutomaticUpdatesChanged(false)
        );
    }

    #[tokio::test]
    async fn test_clones_share_the_channel() {
        let bus = LocalBus::new();
        let publisher = bus.clone();
        let mut rx = bus.subscribe();

        publisher.publish(Signal::ReloadRequested);
        assert_eq!(rx.recv().await.unwrap(), Signal::ReloadRequested);
    }
}
