mod config;
pub mod database;
mod memory;
mod record;

pub use config::{
    Config, GoalsConfig, NotificationsConfig, Settings, TimerConfig, UiConfig, THEMES,
};
pub use database::Database;
pub use memory::MemoryStore;
pub use record::{SessionRecord, UNTITLED};

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, ValidationError};

/// Persistence collaborator for session records.
///
/// Implementations return records newest first.
pub trait SessionStore: Send + Sync {
    /// Persist a new record and return its id.
    fn append(&self, record: &SessionRecord) -> Result<Uuid>;

    /// Work sessions whose start time lies in `[start, end]`.
    fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SessionRecord>>;

    /// Every record, work and break.
    fn query_all(&self) -> Result<Vec<SessionRecord>>;

    fn update_memo(&self, id: Uuid, memo: &str) -> Result<()>;

    fn delete(&self, id: Uuid) -> Result<()>;

    fn delete_all(&self) -> Result<()>;
}

pub(crate) fn check_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end < start {
        return Err(ValidationError::InvalidTimeRange { start, end }.into());
    }
    Ok(())
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSTIMER_DATA_DIR` wins when set; otherwise `~/.config/focustimer`,
/// or `~/.config/focustimer-dev` when `FOCUSTIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSTIMER_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focustimer-dev")
            } else {
                base_dir.join("focustimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
