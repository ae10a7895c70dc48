//! Ephemeral status notifications.
//!
//! A [`Notifier`] holds at most one [`Notification`]. Showing a new one
//! replaces the old one together with its dismissal deadline, so only the
//! latest notification's timer is ever honored.

use std::time::{Duration, Instant};

/// Default time a notification stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Neutral information.
    Info,
    /// An operation succeeded.
    Success,
    /// An operation was rejected or failed.
    Error,
}

/// A status message with its own dismissal deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text to display.
    pub message: String,
    /// Category, for styling.
    pub kind: NotificationKind,
    /// When it should disappear.
    pub dismiss_at: Instant,
}

/// Single-slot notification holder with auto-dismiss.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Notifier {
    /// Creates an empty notifier whose notifications last `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Shows `message`, replacing any current notification.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        tracing::trace!(%message, ?kind, "notification shown");
        self.current = Some(Notification {
            message,
            kind,
            dismiss_at: now + self.ttl,
        });
    }

    /// Dismisses the current notification if its deadline has passed.
    ///
    /// Returns `true` if something was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| now >= n.dismiss_at) {
            self.current = None;
            return true;
        }
        false
    }

    /// Removes the current notification immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// The notification currently visible, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// How long notifications stay visible.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}
