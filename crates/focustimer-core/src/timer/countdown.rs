//! Countdown engine.
//!
//! A tick-based state machine with one-second resolution. It does not own a
//! thread or a timer; whoever drives it calls `tick()` once per elapsed
//! second while it is running (see [`super::TimerDriver`]). Commands take
//! the instant their event is stamped with, so a caller replaying time on
//! a manual clock gets consistent timestamps.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   ^        |          |
//!   +--------+----------+   (reset, or completion on the last tick)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(25 * 60);
//! engine.start(Utc::now());
//! // Once per second:
//! if let Some(Event::CountdownCompleted { .. }) = engine.tick(Utc::now()) { /* ... */ }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TimerError, ValidationError};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        })
    }
}

/// Single-interval countdown.
///
/// Invariant: `0 <= remaining_secs <= total_secs`, and
/// `progress() == remaining_secs / total_secs` (1.0 for an empty countdown).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    phase: TimerPhase,
    total_secs: u64,
    remaining_secs: u64,
}

impl CountdownEngine {
    /// Create an idle countdown of `total_secs` seconds.
    pub fn new(total_secs: u64) -> Self {
        Self {
            phase: TimerPhase::Idle,
            total_secs,
            remaining_secs: total_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TimerPhase::Idle
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// 1.0 (full) .. 0.0 (elapsed).
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        self.remaining_secs as f64 / self.total_secs as f64
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the interval length. Only accepted while idle.
    ///
    /// # Errors
    /// `TimerError::NotIdle` while running or paused; a zero duration is
    /// rejected as a validation error. The engine is left untouched in
    /// both cases.
    pub fn set_duration(&mut self, secs: u64) -> crate::Result<()> {
        if self.phase != TimerPhase::Idle {
            return Err(TimerError::NotIdle { phase: self.phase }.into());
        }
        if secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration".into(),
                message: "must be at least one second".into(),
            }
            .into());
        }
        self.total_secs = secs;
        self.remaining_secs = secs;
        Ok(())
    }

    /// `Idle | Paused -> Running`. Already running is a no-op.
    pub fn start(&mut self, at: DateTime<Utc>) -> Option<Event> {
        match self.phase {
            TimerPhase::Idle => {
                self.phase = TimerPhase::Running;
                Some(Event::CountdownStarted {
                    total_secs: self.total_secs,
                    at,
                })
            }
            TimerPhase::Paused => self.resume(at),
            TimerPhase::Running => None,
        }
    }

    /// `Running -> Paused`; remaining time is frozen.
    pub fn pause(&mut self, at: DateTime<Utc>) -> Option<Event> {
        match self.phase {
            TimerPhase::Running => {
                self.phase = TimerPhase::Paused;
                Some(Event::CountdownPaused {
                    remaining_secs: self.remaining_secs,
                    at,
                })
            }
            _ => None,
        }
    }

    /// `Paused -> Running` from the frozen remaining time.
    pub fn resume(&mut self, at: DateTime<Utc>) -> Option<Event> {
        match self.phase {
            TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                Some(Event::CountdownResumed {
                    remaining_secs: self.remaining_secs,
                    at,
                })
            }
            _ => None,
        }
    }

    /// Back to `Idle` with the full interval restored.
    pub fn reset(&mut self, at: DateTime<Utc>) -> Option<Event> {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.total_secs;
        Some(Event::CountdownReset { at })
    }

    /// Advance by one second. Returns `Some(Event::CountdownCompleted)` on
    /// the tick that reaches zero, after which the engine is idle again with
    /// the full interval restored.
    pub fn tick(&mut self, at: DateTime<Utc>) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        self.phase = TimerPhase::Idle;
        let completed = Event::CountdownCompleted {
            total_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            at,
        };
        self.reset(at);
        Some(completed)
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(0)
    }
}
