mod controller;
mod countdown;
mod driver;
mod kind;

pub use controller::{SessionController, SessionState};
pub use countdown::{CountdownEngine, TimerPhase};
pub use driver::{TimerDriver, TICK_INTERVAL};
pub use kind::SessionKind;
