//! Real-time driver for a [`SessionController`].
//!
//! Spawns a tokio task that ticks the controller once per interval while
//! it is running. Commands and ticks go through the same mutex, and every
//! command that changes state bumps a generation counter under that lock,
//! so a tick that was already scheduled when `pause()`/`reset()`/
//! `skip_session()` ran finds a stale generation and does nothing. A no-op
//! command such as `start()` while running leaves the ticker alone.
//!
//! Must be used from within a tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::controller::SessionController;
use super::countdown::TimerPhase;
use crate::events::Event;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

struct Shared {
    controller: SessionController,
    generation: u64,
}

pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    events: UnboundedSender<Event>,
    tick_interval: Duration,
}

impl TimerDriver {
    /// Wrap a controller. Events produced by ticks (including completion)
    /// arrive on the returned receiver; command events are returned
    /// directly from each call.
    pub fn new(controller: SessionController) -> (Self, UnboundedReceiver<Event>) {
        Self::with_tick_interval(controller, TICK_INTERVAL)
    }

    pub fn with_tick_interval(
        controller: SessionController,
        tick_interval: Duration,
    ) -> (Self, UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let driver = Self {
            shared: Arc::new(Mutex::new(Shared {
                controller,
                generation: 0,
            })),
            ticker: Mutex::new(None),
            events,
            tick_interval,
        };
        (driver, rx)
    }

    /// Read controller state.
    pub fn with_controller<R>(&self, f: impl FnOnce(&SessionController) -> R) -> R {
        f(&lock(&self.shared).controller)
    }

    pub fn phase(&self) -> TimerPhase {
        self.with_controller(|c| c.phase())
    }

    pub fn snapshot(&self) -> Event {
        self.with_controller(|c| c.snapshot())
    }

    pub fn start(&self) -> Vec<Event> {
        self.command(|c| c.start())
    }

    pub fn pause(&self) -> Vec<Event> {
        self.command(|c| c.pause())
    }

    pub fn resume(&self) -> Vec<Event> {
        self.command(|c| c.resume())
    }

    pub fn reset(&self) -> Vec<Event> {
        self.command(|c| c.reset())
    }

    pub fn skip_session(&self) -> Vec<Event> {
        self.command(|c| c.skip_session())
    }

    pub fn set_task_title(&self, title: impl Into<String>) {
        let title = title.into();
        lock(&self.shared).controller.set_task_title(title);
    }

    pub fn update_duration(&self) -> Option<u64> {
        lock(&self.shared).controller.update_duration()
    }

    /// Stop ticking without touching controller state.
    pub fn shutdown(&self) {
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        self.cancel_ticker();
    }

    /// Run a command under the lock. A command that changed nothing while
    /// running keeps the live ticker and its progress toward the next tick;
    /// anything else invalidates in-flight ticks and starts a fresh ticker
    /// if the controller ended up running.
    fn command(&self, f: impl FnOnce(&mut SessionController) -> Vec<Event>) -> Vec<Event> {
        let mut shared = lock(&self.shared);
        let was_running = shared.controller.phase() == TimerPhase::Running;
        let events = f(&mut shared.controller);
        let running = shared.controller.phase() == TimerPhase::Running;

        if was_running && running && events.is_empty() && self.ticker_alive() {
            return events;
        }

        shared.generation += 1;
        self.cancel_ticker();
        if running {
            self.spawn_ticker(shared.generation);
        }
        events
    }

    fn ticker_alive(&self) -> bool {
        lock(&self.ticker)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_ticker(&self) {
        if let Some(handle) = lock(&self.ticker).take() {
            handle.abort();
        }
    }

    fn spawn_ticker(&self, generation: u64) {
        let shared = self.shared.clone();
        let events = self.events.clone();
        let period = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;

                let (produced, still_running) = {
                    let mut guard = lock(&shared);
                    if guard.generation != generation
                        || guard.controller.phase() != TimerPhase::Running
                    {
                        break;
                    }
                    let produced = guard.controller.tick();
                    let still_running = guard.controller.phase() == TimerPhase::Running;
                    (produced, still_running)
                };

                for event in produced {
                    if events.send(event).is_err() {
                        tracing::debug!("timer event receiver dropped");
                    }
                }
                if !still_running {
                    break;
                }
            }
        });

        *lock(&self.ticker) = Some(handle);
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::notify::LogNotifier;
    use crate::storage::{Config, MemoryStore};
    use crate::timer::SessionKind;

    fn driver(store: Arc<MemoryStore>) -> (TimerDriver, UnboundedReceiver<Event>) {
        let controller = SessionController::new(
            store,
            Arc::new(LogNotifier::new()),
            Arc::new(Config::default()),
            Arc::new(SystemClock),
        );
        TimerDriver::new(controller)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let store = Arc::new(MemoryStore::new());
        let (driver, _rx) = driver(store);
        driver.start();

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(driver.with_controller(|c| c.remaining_secs()), 25 * 60 - 3);
    }

    #[tokio::test(start_paused = true)]
    async fn redundant_start_keeps_tick_cadence() {
        let store = Arc::new(MemoryStore::new());
        let (driver, _rx) = driver(store);
        driver.start();

        for _ in 0..5 {
            time::sleep(Duration::from_millis(900)).await;
            assert!(driver.start().is_empty());
            assert!(driver.resume().is_empty());
        }
        assert_eq!(driver.with_controller(|c| c.remaining_secs()), 25 * 60 - 4);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_ticks_and_resume_continues() {
        let store = Arc::new(MemoryStore::new());
        let (driver, _rx) = driver(store);
        driver.start();
        time::sleep(Duration::from_millis(2_500)).await;
        driver.pause();

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(driver.phase(), TimerPhase::Paused);
        assert_eq!(driver.with_controller(|c| c.remaining_secs()), 25 * 60 - 2);

        driver.resume();
        time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(driver.with_controller(|c| c.remaining_secs()), 25 * 60 - 3);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_pending_tick() {
        let store = Arc::new(MemoryStore::new());
        let (driver, _rx) = driver(store.clone());
        driver.start();
        time::sleep(Duration::from_millis(1_999)).await;
        driver.reset();

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(driver.phase(), TimerPhase::Idle);
        assert_eq!(driver.with_controller(|c| c.remaining_secs()), 25 * 60);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_is_delivered_once_and_ticker_stops() {
        let store = Arc::new(MemoryStore::new());
        let (driver, mut rx) = driver(store.clone());
        driver.start();

        time::sleep(Duration::from_secs(25 * 60 + 30)).await;

        let mut completions = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, Event::CountdownCompleted { .. }) {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(driver.phase(), TimerPhase::Idle);
        assert_eq!(driver.with_controller(|c| c.kind()), SessionKind::Break);
        assert_eq!(driver.with_controller(|c| c.remaining_secs()), 5 * 60);

        let records = store.snapshot();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_completed);
    }

    #[tokio::test(start_paused = true)]
    async fn skip_while_running_moves_to_break_and_stops() {
        let store = Arc::new(MemoryStore::new());
        let (driver, _rx) = driver(store.clone());
        driver.set_task_title("Email");
        driver.start();
        time::sleep(Duration::from_millis(1_500)).await;
        driver.skip_session();

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(driver.phase(), TimerPhase::Idle);
        assert_eq!(driver.with_controller(|c| c.kind()), SessionKind::Break);
        let records = store.snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Email");
        assert!(!records[0].is_completed);
    }
}
