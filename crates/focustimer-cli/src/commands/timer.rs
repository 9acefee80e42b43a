use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use focustimer_core::clock::{Clock, ManualClock, SystemClock};
use focustimer_core::storage::Database;
use focustimer_core::{Event, LogNotifier, SessionController, SessionState, TimerDriver, TimerPhase};
use serde::{Deserialize, Serialize};

use super::{print_json, CliResult, Context};

const STATE_KEY: &str = "timer_state";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the current interval, or resume it if paused
    Start,
    /// Pause the running interval
    Pause,
    /// Resume a paused interval
    Resume,
    /// Abandon the current interval, recording it as interrupted
    Reset,
    /// Record the current interval and switch to the other kind
    Skip,
    /// Apply the seconds elapsed since the last command
    Tick,
    /// Print current timer state as JSON
    Status,
    /// Set the task title for the current interval
    Title {
        /// Task title
        title: String,
    },
    /// Run the timer in the foreground until the interval ends
    Run,
}

/// Controller state plus the instant it was last brought up to date.
#[derive(Serialize, Deserialize)]
struct SavedTimer {
    state: SessionState,
    saved_at: DateTime<Utc>,
}

fn load_state(db: &Database) -> Option<SavedTimer> {
    let json = match db.kv_get(STATE_KEY) {
        Ok(json) => json?,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read saved timer state");
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(saved) => Some(saved),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable timer state");
            None
        }
    }
}

fn save_state(db: &Database, state: &SessionState, at: DateTime<Utc>) -> CliResult {
    let saved = SavedTimer {
        state: state.clone(),
        saved_at: at,
    };
    db.kv_set(STATE_KEY, &serde_json::to_string(&saved)?)?;
    Ok(())
}

/// Rebuild the controller on a manual clock and replay one tick per whole
/// second that passed while no process was running. The clock stays at the
/// last replayed second while the countdown is still running, so the
/// fractional remainder carries into the next invocation.
fn restore(
    ctx: &Context,
    now: DateTime<Utc>,
) -> (SessionController, Arc<ManualClock>, Vec<Event>) {
    let notifier = Arc::new(LogNotifier::new());
    let Some(saved) = load_state(&ctx.db) else {
        let clock = Arc::new(ManualClock::new(now));
        let controller =
            SessionController::new(ctx.db.clone(), notifier, ctx.config.clone(), clock.clone());
        return (controller, clock, Vec::new());
    };

    let clock = Arc::new(ManualClock::new(saved.saved_at));
    let mut controller = SessionController::restore(
        saved.state,
        ctx.db.clone(),
        notifier,
        ctx.config.clone(),
        clock.clone(),
    );

    let mut events = Vec::new();
    let elapsed = (now - saved.saved_at).num_seconds().max(0);
    for _ in 0..elapsed {
        if controller.phase() != TimerPhase::Running {
            break;
        }
        clock.advance_secs(1);
        events.extend(controller.tick());
    }
    if controller.phase() != TimerPhase::Running {
        clock.set(now);
    }
    // Settings may have changed since the last invocation.
    controller.update_duration();

    (controller, clock, events)
}

fn print_events(events: &[Event]) -> CliResult {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let ctx = Context::open()?;
    let (mut controller, clock, mut events) = restore(&ctx, Utc::now());

    match action {
        TimerAction::Start => events.extend(controller.start()),
        TimerAction::Pause => events.extend(controller.pause()),
        TimerAction::Resume => events.extend(controller.resume()),
        TimerAction::Reset => events.extend(controller.reset()),
        TimerAction::Skip => events.extend(controller.skip_session()),
        TimerAction::Tick => {}
        TimerAction::Status => {
            print_events(&events)?;
            print_json(&controller.snapshot())?;
            return save_state(&ctx.db, controller.state(), clock.now());
        }
        TimerAction::Title { title } => controller.set_task_title(title),
        TimerAction::Run => {
            print_events(&events)?;
            return run_foreground(&ctx, controller.state().clone());
        }
    }

    print_events(&events)?;
    print_json(&controller.snapshot())?;
    save_state(&ctx.db, controller.state(), clock.now())
}

/// Tick on the wall clock until the interval completes or Ctrl-C pauses it.
fn run_foreground(ctx: &Context, state: SessionState) -> CliResult {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive(ctx, state))
}

async fn drive(ctx: &Context, state: SessionState) -> CliResult {
    let controller = SessionController::restore(
        state,
        ctx.db.clone(),
        Arc::new(LogNotifier::new()),
        ctx.config.clone(),
        Arc::new(SystemClock),
    );
    let (driver, mut rx) = TimerDriver::new(controller);
    print_events(&driver.start())?;

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                print_events(std::slice::from_ref(&event))?;
                if matches!(event, Event::KindChanged { .. }) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                print_events(&driver.pause())?;
                break;
            }
        }
    }

    driver.shutdown();
    let state = driver.with_controller(|c| c.state().clone());
    print_json(&driver.snapshot())?;
    save_state(&ctx.db, &state, Utc::now())
}
