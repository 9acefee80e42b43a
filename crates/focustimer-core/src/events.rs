use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::{SessionKind, TimerPhase};

/// Every state change in the timing core produces an Event.
/// Front-ends print or forward them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. `remaining_secs` is captured before the
    /// engine restores the full interval, so it is always 0.
    CountdownCompleted {
        total_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A session record was handed to storage.
    SessionRecorded {
        record_id: Uuid,
        kind: SessionKind,
        title: String,
        duration_secs: f64,
        is_completed: bool,
        at: DateTime<Utc>,
    },
    /// The controller switched to the opposite kind of interval.
    KindChanged {
        from: SessionKind,
        to: SessionKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        kind: SessionKind,
        task_title: String,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        clock: String,
        at: DateTime<Utc>,
    },
}
