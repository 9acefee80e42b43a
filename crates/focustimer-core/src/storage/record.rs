use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::SessionKind;

/// Placeholder shown for a record without a title.
pub const UNTITLED: &str = "untitled";

/// One finished interval, completed or abandoned.
///
/// Created once when the interval ends; only `memo` changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub title: String,
    /// When the interval first started running.
    pub start_time: DateTime<Utc>,
    /// Seconds actually spent running, paused time excluded.
    pub duration_secs: f64,
    pub is_completed: bool,
    pub is_work_session: bool,
    #[serde(default)]
    pub memo: Option<String>,
}

impl SessionRecord {
    /// Build a record with a fresh id. Negative durations clamp to zero.
    pub fn new(
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        duration_secs: f64,
        is_completed: bool,
        kind: SessionKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start_time,
            duration_secs: duration_secs.max(0.0),
            is_completed,
            is_work_session: kind.is_work(),
            memo: None,
        }
    }

    pub fn kind(&self) -> SessionKind {
        if self.is_work_session {
            SessionKind::Work
        } else {
            SessionKind::Break
        }
    }

    /// Fractional minutes; truncation is left to display code.
    pub fn minutes(&self) -> f64 {
        self.duration_secs / 60.0
    }

    /// Completed focus interval, the only kind that counts toward statistics.
    pub fn is_completed_work(&self) -> bool {
        self.is_completed && self.is_work_session
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}
