//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Focus, break and long-break lengths
//! - Daily and weekly focus goals
//! - Notification and sound toggles
//! - Theme
//!
//! Configuration is stored at `<data dir>/config.toml`. Every value is
//! range-checked on load and on `set`, so the timing core only ever sees
//! valid durations.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};

pub const FOCUS_RANGE: RangeInclusive<u32> = 5..=60;
pub const BREAK_RANGE: RangeInclusive<u32> = 5..=30;
pub const LONG_BREAK_RANGE: RangeInclusive<u32> = 10..=60;
pub const SESSIONS_UNTIL_LONG_BREAK_RANGE: RangeInclusive<u32> = 1..=12;
pub const THEMES: [&str; 3] = ["system", "light", "dark"];

/// Read-only preferences consumed by the timing core and the statistics
/// service. Durations are in minutes.
pub trait Settings: Send + Sync {
    fn focus_duration_minutes(&self) -> u32;
    fn break_duration_minutes(&self) -> u32;
    fn long_break_duration_minutes(&self) -> u32;
    fn sessions_until_long_break(&self) -> u32;
    fn daily_goal_minutes(&self) -> u32;
    fn weekly_goal_minutes(&self) -> u32;
    fn notifications_enabled(&self) -> bool;
    fn sound_enabled(&self) -> bool;
    fn theme(&self) -> String;
}

/// Interval lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_duration")]
    pub focus_duration: u32,
    #[serde(default = "default_break_duration")]
    pub break_duration: u32,
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration: u32,
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
}

/// Focus goals in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_daily_goal")]
    pub daily_minutes: u32,
    #[serde(default = "default_weekly_goal")]
    pub weekly_minutes: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_focus_duration() -> u32 {
    25
}
fn default_break_duration() -> u32 {
    5
}
fn default_long_break_duration() -> u32 {
    15
}
fn default_sessions_until_long_break() -> u32 {
    4
}
fn default_daily_goal() -> u32 {
    120
}
fn default_weekly_goal() -> u32 {
    600
}
fn default_true() -> bool {
    true
}
fn default_theme() -> String {
    "system".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_duration: default_focus_duration(),
            break_duration: default_break_duration(),
            long_break_duration: default_long_break_duration(),
            sessions_until_long_break: default_sessions_until_long_break(),
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            daily_minutes: default_daily_goal(),
            weekly_minutes: default_weekly_goal(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

fn check_range(key: &str, value: u32, range: RangeInclusive<u32>) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.into(),
            message: format!(
                "{value} is outside {}..={}",
                range.start(),
                range.end()
            ),
        })
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u32>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as whole minutes")))?
                        .into(),
                ),
                serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                _ => return Err(unknown()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Check every value against its allowed range.
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("timer.focus_duration", self.timer.focus_duration, FOCUS_RANGE)?;
        check_range("timer.break_duration", self.timer.break_duration, BREAK_RANGE)?;
        check_range(
            "timer.long_break_duration",
            self.timer.long_break_duration,
            LONG_BREAK_RANGE,
        )?;
        check_range(
            "timer.sessions_until_long_break",
            self.timer.sessions_until_long_break,
            SESSIONS_UNTIL_LONG_BREAK_RANGE,
        )?;
        check_range("goals.daily_minutes", self.goals.daily_minutes, 1..=u32::MAX)?;
        check_range("goals.weekly_minutes", self.goals.weekly_minutes, 1..=u32::MAX)?;
        if !THEMES.contains(&self.ui.theme.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "ui.theme".into(),
                message: format!("'{}' is not one of {}", self.ui.theme, THEMES.join(", ")),
            });
        }
        Ok(())
    }

    /// Load from the default location, writing defaults if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds out-of-range values, or if the default config cannot be
    /// written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("falling back to default config: {e}");
                Self::default()
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result falls outside its allowed range. `self` is unchanged
    /// on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Every leaf key with its current value, in declaration order.
    pub fn entries(&self) -> Vec<(String, String)> {
        const KEYS: [&str; 9] = [
            "timer.focus_duration",
            "timer.break_duration",
            "timer.long_break_duration",
            "timer.sessions_until_long_break",
            "goals.daily_minutes",
            "goals.weekly_minutes",
            "notifications.enabled",
            "notifications.sound",
            "ui.theme",
        ];
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (k.to_string(), v)))
            .collect()
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

impl Settings for Config {
    fn focus_duration_minutes(&self) -> u32 {
        self.timer.focus_duration
    }

    fn break_duration_minutes(&self) -> u32 {
        self.timer.break_duration
    }

    fn long_break_duration_minutes(&self) -> u32 {
        self.timer.long_break_duration
    }

    fn sessions_until_long_break(&self) -> u32 {
        self.timer.sessions_until_long_break
    }

    fn daily_goal_minutes(&self) -> u32 {
        self.goals.daily_minutes
    }

    fn weekly_goal_minutes(&self) -> u32 {
        self.goals.weekly_minutes
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications.enabled
    }

    fn sound_enabled(&self) -> bool {
        self.notifications.sound
    }

    fn theme(&self) -> String {
        self.ui.theme.clone()
    }
}

/// Settings that are edited elsewhere while the core keeps reading them.
impl<S: Settings> Settings for RwLock<S> {
    fn focus_duration_minutes(&self) -> u32 {
        self.read().unwrap_or_else(|e| e.into_inner()).focus_duration_minutes()
    }

    fn break_duration_minutes(&self) -> u32 {
        self.read().unwrap_or_else(|e| e.into_inner()).break_duration_minutes()
    }

    fn long_break_duration_minutes(&self) -> u32 {
        self.read()
            .unwrap_or_else(|e| e.into_inner())
            .long_break_duration_minutes()
    }

    fn sessions_until_long_break(&self) -> u32 {
        self.read()
            .unwrap_or_else(|e| e.into_inner())
            .sessions_until_long_break()
    }

    fn daily_goal_minutes(&self) -> u32 {
        self.read().unwrap_or_else(|e| e.into_inner()).daily_goal_minutes()
    }

    fn weekly_goal_minutes(&self) -> u32 {
        self.read().unwrap_or_else(|e| e.into_inner()).weekly_goal_minutes()
    }

    fn notifications_enabled(&self) -> bool {
        self.read().unwrap_or_else(|e| e.into_inner()).notifications_enabled()
    }

    fn sound_enabled(&self) -> bool {
        self.read().unwrap_or_else(|e| e.into_inner()).sound_enabled()
    }

    fn theme(&self) -> String {
        self.read().unwrap_or_else(|e| e.into_inner()).theme()
    }
}
