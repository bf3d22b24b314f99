//! Transient, auto-expiring notifications
//!
//! Every success and every failure in a controller produces exactly one
//! notification. A notification is owned by its screen instance, is
//! replaced by the next one, and expires after a fixed TTL.

use std::time::{Duration, Instant};

/// Outcome severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
}

/// A transient user-visible message
#[derive(Debug, Clone)]
pub struct Notification {
    /// Message text
    pub message: String,
    /// Severity
    pub severity: Severity,
    raised_at: Instant,
    ttl: Duration,
}

impl Notification {
    /// Create a notification that expires after `ttl`
    pub fn new(message: impl Into<String>, severity: Severity, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            raised_at: Instant::now(),
            ttl,
        }
    }

    /// Whether the fixed display duration has elapsed
    pub fn is_expired(&self) -> bool {
        self.raised_at.elapsed() >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_notification_is_visible() {
        let n = Notification::new("salvo", Severity::Success, Duration::from_secs(3));
        assert!(!n.is_expired());
        assert_eq!(n.severity, Severity::Success);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let n = Notification::new("erro", Severity::Error, Duration::ZERO);
        assert!(n.is_expired());
    }
}
