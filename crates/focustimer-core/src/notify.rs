//! Notification collaborator.
//!
//! The core only asks for a notification to be scheduled; delivery and
//! authorization belong to the platform. An unauthorized notifier drops
//! requests silently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::Result;

/// Title used for every interval-finished notification.
pub const NOTIFICATION_TITLE: &str = "FocusTimer";

/// Delay between an interval finishing and its notification.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(100);

pub trait Notifier: Send + Sync {
    /// Whether the platform allows this app to post notifications.
    fn is_authorized(&self) -> bool {
        true
    }

    /// Queue a notification to fire after `delay`.
    fn schedule(&self, title: &str, body: &str, delay: Duration) -> Result<()>;

    /// Drop every pending notification.
    fn cancel_all(&self) -> Result<()>;
}

/// Writes notifications to the log instead of a notification center.
#[derive(Debug)]
pub struct LogNotifier {
    authorized: AtomicBool,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self {
            authorized: AtomicBool::new(true),
        }
    }

    pub fn set_authorized(&self, authorized: bool) {
        self.authorized.store(authorized, Ordering::Relaxed);
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for LogNotifier {
    fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::Relaxed)
    }

    fn schedule(&self, title: &str, body: &str, delay: Duration) -> Result<()> {
        if !self.is_authorized() {
            tracing::debug!("notification suppressed (not authorized): {title}");
            return Ok(());
        }
        tracing::info!(delay_ms = delay.as_millis() as u64, "{title}: {body}");
        Ok(())
    }

    fn cancel_all(&self) -> Result<()> {
        tracing::debug!("pending notifications cancelled");
        Ok(())
    }
}
