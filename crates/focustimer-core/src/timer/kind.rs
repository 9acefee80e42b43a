use serde::{Deserialize, Serialize};

/// Whether the current (or next) interval is a focus or a break interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    pub fn toggled(self) -> Self {
        match self {
            SessionKind::Work => SessionKind::Break,
            SessionKind::Break => SessionKind::Work,
        }
    }

    pub fn is_work(self) -> bool {
        self == SessionKind::Work
    }

    /// Title stored for a completed interval that had no task title.
    pub fn completed_title(self) -> &'static str {
        match self {
            SessionKind::Work => "Focus Session",
            SessionKind::Break => "Break",
        }
    }

    /// Notification body announcing the end of an interval of this kind.
    pub fn finished_message(self) -> &'static str {
        match self {
            SessionKind::Work => "Focus session finished. Time for a break!",
            SessionKind::Break => "Break is over. Let's focus again!",
        }
    }
}

impl Default for SessionKind {
    fn default() -> Self {
        SessionKind::Work
    }
}
