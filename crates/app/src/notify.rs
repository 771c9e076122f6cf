//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! Services publish user-facing toasts here; frontends subscribe and
//! render them, tests subscribe and assert on them. The bus is shared via
//! `Arc<Notifier>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// A successful operation worth telling the user about.
    Info,
    /// Something failed and the user should know.
    Error,
}

/// A user-facing toast: a short title plus a one-line body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub body: String,
    /// When the notification was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// An informational toast.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            body: body.into(),
            timestamp: Utc::now(),
        }
    }

    /// An error toast.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            body: body.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out bus for [`Notification`]s.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published notification.
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    ///
    /// If there are no active subscribers the notification is silently
    /// dropped.
    pub fn publish(&self, notification: Notification) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    /// Subscribe to all notifications published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        notifier.publish(Notification::info("Issue created", "All good."));

        let received = rx.recv().await.expect("should receive the notification");
        assert_eq!(received.severity, Severity::Info);
        assert_eq!(received.title, "Issue created");
        assert_eq!(received.body, "All good.");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_notification() {
        let notifier = Notifier::default();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();

        notifier.publish(Notification::error("Save failed", "Try again."));

        let n1 = rx1.recv().await.expect("subscriber 1 should receive");
        let n2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert!(n1.is_error());
        assert_eq!(n1.title, n2.title);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let notifier = Notifier::default();
        // No subscribers; this must not panic.
        notifier.publish(Notification::info("orphan", "nobody listening"));
    }
}
