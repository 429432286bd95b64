//! Transient user notices.
//!
//! The store reports user-visible events through an injected
//! [`NotificationSink`]. Dismissal timing is the sink's concern.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Receiver of one-line user notices.
pub trait NotificationSink: Send + Sync {
    fn show(&self, message: &str);
}

impl<F> NotificationSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn show(&self, message: &str) {
        self(message)
    }
}

/// A notice with its display window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub dismiss_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.dismiss_at
    }
}

/// Forwards notices to a UI task over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notice>,
    display_for: chrono::Duration,
}

impl ChannelSink {
    pub fn new(display_for: Duration) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let display_for =
            chrono::Duration::from_std(display_for).unwrap_or_else(|_| chrono::Duration::zero());
        (Self { tx, display_for }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn show(&self, message: &str) {
        let shown_at = Utc::now();
        let notice = Notice {
            message: message.to_string(),
            shown_at,
            dismiss_at: shown_at + self.display_for,
        };
        if self.tx.send(notice).is_err() {
            tracing::debug!(notice = message, "notice receiver dropped");
        }
    }
}
