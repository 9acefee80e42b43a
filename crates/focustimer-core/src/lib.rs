//! # FocusTimer Core Library
//!
//! Session timing and statistics for a Pomodoro-style focus timer. The
//! `focustimer` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: [`CountdownEngine`] is a second-granularity countdown state
//!   machine. [`SessionController`] alternates work and break intervals on
//!   top of it, records each interval and schedules notifications. The
//!   caller drives `tick()`, or hands the controller to a [`TimerDriver`]
//!   that ticks it on a tokio interval.
//! - **Storage**: [`SessionStore`] persistence (SQLite via [`Database`], or
//!   in-memory) and TOML-backed [`Config`] exposed through [`Settings`].
//! - **Stats**: daily, weekly and monthly aggregation over stored sessions.
//!
//! Collaborators (store, notifier, settings, clock) are injected as trait
//! objects, so tests run against [`MemoryStore`] and [`ManualClock`].

pub mod clock;
pub mod error;
pub mod events;
pub mod format;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, Result, TimerError, ValidationError};
pub use events::Event;
pub use notify::{LogNotifier, Notifier};
pub use stats::{Period, PeriodReport, StatsCalculator, StatsService};
pub use storage::{Config, Database, MemoryStore, SessionRecord, SessionStore, Settings};
pub use timer::{
    CountdownEngine, SessionController, SessionKind, SessionState, TimerDriver, TimerPhase,
};
