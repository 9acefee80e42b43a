//! Session controller.
//!
//! Wraps one [`CountdownEngine`] with session semantics: work/break
//! alternation, elapsed-time accounting across pauses, task titles, and a
//! [`SessionRecord`] for every interval that ends.
//!
//! Records are emitted at exactly three points: natural completion, an
//! explicit `reset()` of a started interval, and `skip_session()`. The
//! session kind toggles on completion and skip, always after the record
//! has been handed to storage.
//!
//! Interval lengths come from settings: the focus length for work, and for
//! a break either the short break length or, after every
//! `sessions_until_long_break` completed work intervals, the long break
//! length. A skipped work interval does not count toward the long break,
//! and a cadence of 0 from a custom `Settings` disables long breaks.
//!
//! Collaborator failures (storage, notifications) are logged and never
//! stop a transition.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::countdown::{CountdownEngine, TimerPhase};
use super::kind::SessionKind;
use crate::clock::Clock;
use crate::events::Event;
use crate::format::format_clock;
use crate::notify::{Notifier, COMPLETION_DELAY, NOTIFICATION_TITLE};
use crate::storage::{SessionRecord, SessionStore, Settings, UNTITLED};

/// Everything the controller needs to survive a restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    engine: CountdownEngine,
    kind: SessionKind,
    task_title: String,
    /// Set on the first `start()` of an interval.
    session_start: Option<DateTime<Utc>>,
    total_paused_secs: f64,
    pause_start: Option<DateTime<Utc>>,
    /// Completed work intervals since the controller was created.
    completed_work_streak: u32,
    /// The current break is a long one.
    long_break: bool,
}

impl SessionState {
    pub fn phase(&self) -> TimerPhase {
        self.engine.phase()
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.engine.remaining_secs()
    }
}

pub struct SessionController {
    state: SessionState,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<dyn Settings>,
    clock: Arc<dyn Clock>,
}

impl SessionController {
    /// A fresh controller: idle, work interval next, duration taken from
    /// settings.
    pub fn new(
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        settings: Arc<dyn Settings>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut controller = Self {
            state: SessionState::default(),
            store,
            notifier,
            settings,
            clock,
        };
        controller.update_duration();
        controller
    }

    /// Rebuild a controller around previously saved state.
    pub fn restore(
        state: SessionState,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        settings: Arc<dyn Settings>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state,
            store,
            notifier,
            settings,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.engine.phase()
    }

    pub fn kind(&self) -> SessionKind {
        self.state.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.engine.remaining_secs()
    }

    pub fn total_secs(&self) -> u64 {
        self.state.engine.total_secs()
    }

    pub fn progress(&self) -> f64 {
        self.state.engine.progress()
    }

    pub fn task_title(&self) -> &str {
        &self.state.task_title
    }

    pub fn session_start(&self) -> Option<DateTime<Utc>> {
        self.state.session_start
    }

    /// Paused seconds folded in by `resume()` so far.
    pub fn total_paused_secs(&self) -> f64 {
        self.state.total_paused_secs
    }

    pub fn completed_work_streak(&self) -> u32 {
        self.state.completed_work_streak
    }

    pub fn is_long_break(&self) -> bool {
        self.state.kind == SessionKind::Break && self.state.long_break
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            kind: self.kind(),
            task_title: self.state.task_title.clone(),
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            progress: self.progress(),
            clock: format_clock(self.remaining_secs()),
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_task_title(&mut self, title: impl Into<String>) {
        self.state.task_title = title.into();
    }

    /// Start the current interval. From `Paused` this resumes instead, so
    /// the interval's start time and paused total are kept. Already running
    /// is a no-op.
    pub fn start(&mut self) -> Vec<Event> {
        match self.phase() {
            TimerPhase::Idle => {
                let now = self.clock.now();
                self.state.session_start = Some(now);
                self.state.total_paused_secs = 0.0;
                self.state.pause_start = None;
                tracing::debug!(
                    kind = ?self.state.kind,
                    total_secs = self.total_secs(),
                    "interval started"
                );
                self.state.engine.start(now).into_iter().collect()
            }
            TimerPhase::Paused => self.resume(),
            TimerPhase::Running => Vec::new(),
        }
    }

    pub fn pause(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let Some(event) = self.state.engine.pause(now) else {
            return Vec::new();
        };
        self.state.pause_start = Some(now);
        tracing::debug!(remaining_secs = self.remaining_secs(), "interval paused");
        vec![event]
    }

    pub fn resume(&mut self) -> Vec<Event> {
        if self.phase() != TimerPhase::Paused {
            return Vec::new();
        }
        let now = self.clock.now();
        if let Some(paused_at) = self.state.pause_start.take() {
            self.state.total_paused_secs += secs_between(paused_at, now);
        }
        tracing::debug!(total_paused_secs = self.state.total_paused_secs, "interval resumed");
        self.state.engine.resume(now).into_iter().collect()
    }

    /// Abandon the current interval. A started interval is recorded as
    /// incomplete; an interval that never started leaves no record. The
    /// session kind does not change.
    pub fn reset(&mut self) -> Vec<Event> {
        let mut events: Vec<Event> = self.state.engine.reset(self.clock.now()).into_iter().collect();
        if let Some(started) = self.state.session_start {
            let duration = self.elapsed_secs(started);
            let title = if self.state.task_title.is_empty() {
                UNTITLED.to_string()
            } else {
                self.state.task_title.clone()
            };
            let record = SessionRecord::new(title, started, duration, false, self.state.kind);
            events.extend(self.emit_record(record));
        }
        self.clear_interval();
        events
    }

    /// Record the current interval as interrupted (if it started) and move
    /// on to the opposite kind.
    pub fn skip_session(&mut self) -> Vec<Event> {
        let mut events = self.reset();
        if self.state.kind == SessionKind::Work {
            self.state.long_break = false;
        }
        events.push(self.toggle_kind());
        events
    }

    /// Advance the countdown by one second. On the tick that finishes the
    /// interval the returned events include the completion, the record and
    /// the kind change, in that order.
    pub fn tick(&mut self) -> Vec<Event> {
        match self.state.engine.tick(self.clock.now()) {
            Some(completed) => {
                let mut events = vec![completed];
                events.extend(self.complete_interval());
                events
            }
            None => Vec::new(),
        }
    }

    /// Re-read the configured length for the current kind (the long break
    /// length when this break was earned as a long one). Only applies while
    /// idle; returns the new length in seconds when applied.
    pub fn update_duration(&mut self) -> Option<u64> {
        if !self.state.engine.is_idle() {
            return None;
        }
        let minutes = match self.state.kind {
            SessionKind::Work => self.settings.focus_duration_minutes(),
            SessionKind::Break if self.state.long_break => {
                self.settings.long_break_duration_minutes()
            }
            SessionKind::Break => self.settings.break_duration_minutes(),
        };
        let secs = u64::from(minutes) * 60;
        match self.state.engine.set_duration(secs) {
            Ok(()) => Some(secs),
            Err(e) => {
                tracing::warn!("keeping {}s countdown: {e}", self.total_secs());
                None
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_interval(&mut self) -> Vec<Event> {
        let kind = self.state.kind;
        let mut events = Vec::new();

        if let Some(started) = self.state.session_start {
            let duration = self.elapsed_secs(started);
            let title = if self.state.task_title.is_empty() {
                kind.completed_title().to_string()
            } else {
                self.state.task_title.clone()
            };
            let record = SessionRecord::new(title, started, duration, true, kind);
            events.extend(self.emit_record(record));
        }

        self.notify_finished(kind);

        if kind == SessionKind::Work {
            self.state.completed_work_streak += 1;
            let every = self.settings.sessions_until_long_break();
            self.state.long_break = every > 0 && self.state.completed_work_streak % every == 0;
        }
        events.push(self.toggle_kind());
        self.clear_interval();
        events
    }

    fn toggle_kind(&mut self) -> Event {
        let from = self.state.kind;
        self.state.kind = from.toggled();
        if self.state.kind == SessionKind::Work {
            self.state.long_break = false;
        }
        self.update_duration();
        tracing::debug!(?from, to = ?self.state.kind, "session kind changed");
        Event::KindChanged {
            from,
            to: self.state.kind,
            duration_secs: self.total_secs(),
            at: self.clock.now(),
        }
    }

    fn clear_interval(&mut self) {
        self.state.session_start = None;
        self.state.total_paused_secs = 0.0;
        self.state.pause_start = None;
        self.state.task_title.clear();
    }

    /// Running time since `started`: wall time minus folded pauses minus a
    /// pause still in progress.
    fn elapsed_secs(&self, started: DateTime<Utc>) -> f64 {
        let now = self.clock.now();
        let open_pause = self
            .state
            .pause_start
            .map(|paused_at| secs_between(paused_at, now))
            .unwrap_or(0.0);
        (secs_between(started, now) - self.state.total_paused_secs - open_pause).max(0.0)
    }

    fn emit_record(&self, record: SessionRecord) -> Option<Event> {
        match self.store.append(&record) {
            Ok(record_id) => {
                tracing::info!(
                    %record_id,
                    completed = record.is_completed,
                    duration_secs = record.duration_secs,
                    "session recorded"
                );
                Some(Event::SessionRecorded {
                    record_id,
                    kind: record.kind(),
                    title: record.title,
                    duration_secs: record.duration_secs,
                    is_completed: record.is_completed,
                    at: self.clock.now(),
                })
            }
            Err(e) => {
                tracing::warn!("failed to record session '{}': {e}", record.title);
                None
            }
        }
    }

    fn notify_finished(&self, kind: SessionKind) {
        if !self.settings.notifications_enabled() || !self.notifier.is_authorized() {
            return;
        }
        if let Err(e) =
            self.notifier
                .schedule(NOTIFICATION_TITLE, kind.finished_message(), COMPLETION_DELAY)
        {
            tracing::warn!("failed to schedule notification: {e}");
        }
    }
}

fn secs_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{CoreError, Result};
    use crate::storage::{Config, MemoryStore};
    use chrono::TimeZone;
    use std::sync::{Mutex, RwLock};
    use std::time::Duration;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn schedule(&self, _title: &str, body: &str, _delay: Duration) -> Result<()> {
            self.sent.lock().unwrap().push(body.to_string());
            Ok(())
        }

        fn cancel_all(&self) -> Result<()> {
            self.sent.lock().unwrap().clear();
            Ok(())
        }
    }

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn append(&self, _record: &SessionRecord) -> Result<Uuid> {
            Err(CoreError::Custom("disk full".into()))
        }
        fn query(&self, _s: DateTime<Utc>, _e: DateTime<Utc>) -> Result<Vec<SessionRecord>> {
            Ok(Vec::new())
        }
        fn query_all(&self) -> Result<Vec<SessionRecord>> {
            Ok(Vec::new())
        }
        fn update_memo(&self, _id: Uuid, _memo: &str) -> Result<()> {
            Ok(())
        }
        fn delete(&self, _id: Uuid) -> Result<()> {
            Ok(())
        }
        fn delete_all(&self) -> Result<()> {
            Ok(())
        }
    }

    struct Harness {
        controller: SessionController,
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
        settings: Arc<RwLock<Config>>,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let settings = Arc::new(RwLock::new(Config::default()));
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        ));
        let controller = SessionController::new(
            store.clone(),
            notifier.clone(),
            settings.clone(),
            clock.clone(),
        );
        Harness {
            controller,
            store,
            notifier,
            settings,
            clock,
        }
    }

    impl Harness {
        fn run_secs(&mut self, secs: u64) -> Vec<Event> {
            let mut events = Vec::new();
            for _ in 0..secs {
                self.clock.advance_secs(1);
                events.extend(self.controller.tick());
            }
            events
        }
    }

    #[test]
    fn starts_idle_on_work_with_focus_length() {
        let h = harness();
        assert_eq!(h.controller.phase(), TimerPhase::Idle);
        assert_eq!(h.controller.kind(), SessionKind::Work);
        assert_eq!(h.controller.total_secs(), 25 * 60);
        assert_eq!(h.controller.remaining_secs(), 25 * 60);
    }

    #[test]
    fn reset_before_start_records_nothing() {
        let mut h = harness();
        h.controller.reset();
        assert!(h.store.is_empty());
        assert_eq!(h.controller.kind(), SessionKind::Work);
    }

    #[test]
    fn completed_work_session_is_recorded_and_toggles_to_break() {
        let mut h = harness();
        h.controller.set_task_title("Write report");
        h.controller.start();
        let events = h.run_secs(25 * 60);

        let records = h.store.snapshot();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(record.is_completed);
        assert!(record.is_work_session);
        assert_eq!(record.title, "Write report");
        assert!((record.duration_secs - 1500.0).abs() < 1.0);
        assert_eq!(record.start_time, Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());

        assert_eq!(h.controller.kind(), SessionKind::Break);
        assert_eq!(h.controller.phase(), TimerPhase::Idle);
        assert_eq!(h.controller.total_secs(), 5 * 60);
        assert_eq!(h.controller.task_title(), "");
        assert!(h.controller.session_start().is_none());

        assert_eq!(
            h.notifier.sent.lock().unwrap().as_slice(),
            ["Focus session finished. Time for a break!"]
        );
        assert!(matches!(events[0], Event::CountdownCompleted { .. }));
    }

    #[test]
    fn record_is_emitted_before_kind_changes() {
        let mut h = harness();
        h.controller.start();
        let events = h.run_secs(25 * 60);
        let recorded = events
            .iter()
            .position(|e| matches!(e, Event::SessionRecorded { kind: SessionKind::Work, .. }))
            .unwrap();
        let toggled = events
            .iter()
            .position(|e| matches!(e, Event::KindChanged { .. }))
            .unwrap();
        assert!(recorded < toggled);
    }

    #[test]
    fn events_are_stamped_with_the_injected_clock() {
        let mut h = harness();
        let started = h.clock.now();
        match h.controller.start().as_slice() {
            [Event::CountdownStarted { at, .. }] => assert_eq!(*at, started),
            other => panic!("unexpected events {other:?}"),
        }

        let events = h.run_secs(25 * 60);
        let finished = started + chrono::Duration::seconds(25 * 60);
        let stamps: Vec<DateTime<Utc>> = events
            .iter()
            .filter_map(|e| match e {
                Event::CountdownCompleted { at, .. }
                | Event::SessionRecorded { at, .. }
                | Event::KindChanged { at, .. } => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(stamps, vec![finished; 3]);
    }

    #[test]
    fn untitled_completions_use_kind_default_titles() {
        let mut h = harness();
        h.controller.start();
        h.run_secs(25 * 60);
        h.controller.start();
        h.run_secs(5 * 60);

        let titles: Vec<_> = h.store.snapshot().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Focus Session", "Break"]);
        assert_eq!(h.controller.kind(), SessionKind::Work);
        assert_eq!(
            h.notifier.sent.lock().unwrap().last().map(String::as_str),
            Some("Break is over. Let's focus again!")
        );
    }

    #[test]
    fn interrupted_session_records_elapsed_ticks() {
        let mut h = harness();
        h.controller.start();
        h.run_secs(90);
        h.controller.reset();

        let records = h.store.snapshot();
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_completed);
        assert_eq!(records[0].title, UNTITLED);
        assert!((records[0].duration_secs - 90.0).abs() < 1e-9);
        assert_eq!(h.controller.kind(), SessionKind::Work);
        assert_eq!(h.controller.remaining_secs(), 25 * 60);
    }

    #[test]
    fn pause_time_is_excluded_from_duration() {
        let mut h = harness();
        h.controller.start();
        h.run_secs(60);

        h.controller.pause();
        let remaining = h.controller.remaining_secs();
        h.clock.advance_secs(300);
        assert!(h.controller.tick().is_empty());
        assert_eq!(h.controller.remaining_secs(), remaining);
        h.controller.resume();
        assert_eq!(h.controller.total_paused_secs(), 300.0);
        assert_eq!(h.controller.remaining_secs(), remaining);

        h.run_secs(30);
        h.controller.reset();
        let record = &h.store.snapshot()[0];
        assert!((record.duration_secs - 90.0).abs() < 1e-9);
    }

    #[test]
    fn reset_while_paused_excludes_open_pause() {
        let mut h = harness();
        h.controller.start();
        h.run_secs(40);
        h.controller.pause();
        h.clock.advance_secs(600);
        h.controller.reset();
        let record = &h.store.snapshot()[0];
        assert!((record.duration_secs - 40.0).abs() < 1e-9);
    }

    #[test]
    fn double_pause_keeps_first_pause_start() {
        let mut h = harness();
        h.controller.start();
        h.controller.pause();
        h.clock.advance_secs(10);
        assert!(h.controller.pause().is_empty());
        h.clock.advance_secs(10);
        h.controller.resume();
        assert_eq!(h.controller.total_paused_secs(), 20.0);
    }

    #[test]
    fn start_while_paused_resumes_same_interval() {
        let mut h = harness();
        h.controller.start();
        h.run_secs(10);
        h.controller.pause();
        h.clock.advance_secs(5);
        h.controller.start();
        assert_eq!(h.controller.phase(), TimerPhase::Running);
        assert_eq!(h.controller.total_paused_secs(), 5.0);
        assert_eq!(
            h.controller.session_start(),
            Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap())
        );
        assert!(h.controller.start().is_empty());
    }

    #[test]
    fn skip_immediately_after_start_records_and_toggles_once() {
        let mut h = harness();
        h.controller.start();
        let events = h.controller.skip_session();

        let records = h.store.snapshot();
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_completed);
        assert_eq!(records[0].duration_secs, 0.0);
        assert_eq!(h.controller.kind(), SessionKind::Break);
        assert_eq!(h.controller.total_secs(), 5 * 60);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::KindChanged { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn skip_while_idle_toggles_without_record() {
        let mut h = harness();
        h.controller.skip_session();
        assert!(h.store.is_empty());
        assert_eq!(h.controller.kind(), SessionKind::Break);
    }

    #[test]
    fn reset_clears_task_title() {
        let mut h = harness();
        h.controller.set_task_title("Refactor parser");
        h.controller.start();
        h.run_secs(5);
        h.controller.reset();
        assert_eq!(h.store.snapshot()[0].title, "Refactor parser");
        assert_eq!(h.controller.task_title(), "");
    }

    #[test]
    fn update_duration_follows_settings_only_while_idle() {
        let mut h = harness();
        h.settings.write().unwrap().set("timer.focus_duration", "50").unwrap();
        assert_eq!(h.controller.update_duration(), Some(50 * 60));
        assert_eq!(h.controller.update_duration(), Some(50 * 60));
        assert_eq!(h.controller.remaining_secs(), 50 * 60);
        assert_eq!(h.controller.total_secs(), 50 * 60);

        h.controller.start();
        h.run_secs(3);
        h.settings.write().unwrap().set("timer.focus_duration", "30").unwrap();
        assert_eq!(h.controller.update_duration(), None);
        assert_eq!(h.controller.total_secs(), 50 * 60);
        assert_eq!(h.controller.remaining_secs(), 50 * 60 - 3);
    }

    #[test]
    fn every_fourth_completed_work_session_earns_long_break() {
        let mut h = harness();
        for round in 1..=4 {
            h.controller.start();
            h.run_secs(25 * 60);
            assert_eq!(h.controller.kind(), SessionKind::Break);
            if round < 4 {
                assert_eq!(h.controller.total_secs(), 5 * 60);
                assert!(!h.controller.is_long_break());
                h.controller.skip_session();
            }
        }
        assert!(h.controller.is_long_break());
        assert_eq!(h.controller.total_secs(), 15 * 60);

        h.controller.skip_session();
        assert_eq!(h.controller.kind(), SessionKind::Work);
        h.controller.skip_session();
        assert_eq!(h.controller.total_secs(), 5 * 60);
        assert_eq!(h.controller.completed_work_streak(), 4);
    }

    #[test]
    fn storage_failure_does_not_block_transitions() {
        let notifier = Arc::new(RecordingNotifier::default());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let mut controller = SessionController::new(
            Arc::new(FailingStore),
            notifier.clone(),
            Arc::new(Config::default()),
            clock.clone(),
        );
        controller.start();
        let mut events = Vec::new();
        for _ in 0..25 * 60 {
            clock.advance_secs(1);
            events.extend(controller.tick());
        }
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::SessionRecorded { .. })));
        assert_eq!(controller.kind(), SessionKind::Break);
        assert_eq!(controller.phase(), TimerPhase::Idle);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn disabled_notifications_are_not_scheduled() {
        let mut h = harness();
        h.settings.write().unwrap().set("notifications.enabled", "false").unwrap();
        h.controller.start();
        h.run_secs(25 * 60);
        assert!(h.notifier.sent.lock().unwrap().is_empty());
        assert_eq!(h.store.len(), 1);
    }

    #[test]
    fn state_survives_restore() {
        let mut h = harness();
        h.controller.set_task_title("Inbox zero");
        h.controller.start();
        h.run_secs(12);
        let saved = serde_json::to_string(h.controller.state()).unwrap();

        let state: SessionState = serde_json::from_str(&saved).unwrap();
        let mut restored = SessionController::restore(
            state,
            h.store.clone(),
            h.notifier.clone(),
            h.settings.clone(),
            h.clock.clone(),
        );
        assert_eq!(restored.phase(), TimerPhase::Running);
        assert_eq!(restored.remaining_secs(), 25 * 60 - 12);
        restored.reset();
        assert_eq!(h.store.snapshot()[0].title, "Inbox zero");
    }

    #[test]
    fn snapshot_reports_clock_text() {
        let mut h = harness();
        h.controller.start();
        h.run_secs(61);
        match h.controller.snapshot() {
            Event::StateSnapshot {
                phase,
                remaining_secs,
                clock,
                ..
            } => {
                assert_eq!(phase, TimerPhase::Running);
                assert_eq!(remaining_secs, 25 * 60 - 61);
                assert_eq!(clock, "23:59");
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
