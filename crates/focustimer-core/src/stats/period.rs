//! Period windows and the breakdowns shown for each period view.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::calculator::{safe_div, StatsCalculator, WEEKDAYS};
use crate::error::ValidationError;
use crate::storage::SessionRecord;

/// Number of tasks listed in the weekly breakdown.
pub const TOP_TASKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// Calendar days covered, today included.
    pub fn days(self) -> i64 {
        match self {
            Period::Daily => 1,
            Period::Weekly => 7,
            Period::Monthly => 30,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(ValidationError::InvalidValue {
                field: "period".into(),
                message: format!("unknown period '{other}'"),
            }),
        }
    }
}

/// `[start, end]` for a period, with the local dates it spans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodWindow {
    pub period: Period,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub interrupted_sessions: usize,
    pub total_focus_minutes: f64,
    pub average_session_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayBucket {
    pub weekday: Weekday,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMinutes {
    pub title: String,
    pub minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalLevel {
    Low,
    Near,
    Reached,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal_minutes: u32,
    pub achieved_minutes: f64,
    pub ratio: f64,
    pub level: GoalLevel,
}

impl GoalProgress {
    pub const NEAR_THRESHOLD: f64 = 0.7;

    /// Progress toward `goal_minutes`, capped at 1. A zero goal has no
    /// progress.
    pub fn new(achieved_minutes: f64, goal_minutes: u32) -> Self {
        let ratio = if goal_minutes == 0 {
            0.0
        } else {
            (achieved_minutes.max(0.0) / f64::from(goal_minutes)).min(1.0)
        };
        let level = if ratio >= 1.0 {
            GoalLevel::Reached
        } else if ratio >= Self::NEAR_THRESHOLD {
            GoalLevel::Near
        } else {
            GoalLevel::Low
        };
        Self {
            goal_minutes,
            achieved_minutes,
            ratio,
            level,
        }
    }
}

impl<Tz: TimeZone> StatsCalculator<Tz> {
    /// From local midnight `days - 1` days before `now`'s date up to `now`.
    pub fn window(&self, period: Period, now: DateTime<Utc>) -> PeriodWindow {
        let last_day = self.local_date(&now);
        let first_day = last_day - Duration::days(period.days() - 1);
        PeriodWindow {
            period,
            start: self.start_of_day(first_day),
            end: now,
            first_day,
            last_day,
        }
    }

    /// Counts cover every work session; minutes only completed ones.
    pub fn basic_stats(&self, records: &[SessionRecord]) -> BasicStats {
        let work: Vec<&SessionRecord> = records.iter().filter(|r| r.is_work_session).collect();
        let completed = work.iter().filter(|r| r.is_completed).count();
        let total_focus_minutes: f64 = work
            .iter()
            .filter(|r| r.is_completed)
            .map(|r| r.minutes())
            .sum();
        BasicStats {
            total_sessions: work.len(),
            completed_sessions: completed,
            interrupted_sessions: work.len() - completed,
            total_focus_minutes,
            average_session_minutes: safe_div(total_focus_minutes, completed),
        }
    }

    /// Completed focus minutes per local hour, 0 through 23.
    pub fn hourly_histogram(&self, records: &[SessionRecord]) -> Vec<HourBucket> {
        let mut minutes = [0.0f64; 24];
        for record in records.iter().filter(|r| r.is_completed_work()) {
            minutes[self.local_hour(&record.start_time) as usize] += record.minutes();
        }
        minutes
            .iter()
            .enumerate()
            .map(|(hour, &minutes)| HourBucket {
                hour: hour as u32,
                minutes,
            })
            .collect()
    }

    /// Completed focus minutes per weekday, Sunday first.
    pub fn weekday_histogram(&self, records: &[SessionRecord]) -> Vec<WeekdayBucket> {
        let mut minutes = [0.0f64; 7];
        for record in records.iter().filter(|r| r.is_completed_work()) {
            let day = self.local_weekday(&record.start_time).num_days_from_sunday();
            minutes[day as usize] += record.minutes();
        }
        WEEKDAYS
            .iter()
            .zip(minutes)
            .map(|(&weekday, minutes)| WeekdayBucket { weekday, minutes })
            .collect()
    }

    /// Completed focus minutes for each date in `first..=last`, zeros
    /// included. Records outside the range are ignored.
    pub fn daily_histogram(
        &self,
        records: &[SessionRecord],
        first: NaiveDate,
        last: NaiveDate,
    ) -> Vec<DayBucket> {
        let mut per_day: HashMap<NaiveDate, f64> = HashMap::new();
        for record in records.iter().filter(|r| r.is_completed_work()) {
            *per_day.entry(self.local_date(&record.start_time)).or_default() += record.minutes();
        }
        first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| DayBucket {
                date,
                minutes: per_day.get(&date).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Completed focus minutes per task title, largest first, at most
    /// `limit` entries. Equal totals are ordered by title.
    pub fn task_breakdown(&self, records: &[SessionRecord], limit: usize) -> Vec<TaskMinutes> {
        let mut per_task: HashMap<String, f64> = HashMap::new();
        for record in records.iter().filter(|r| r.is_completed_work()) {
            *per_task.entry(record.display_title().to_string()).or_default() += record.minutes();
        }
        let mut tasks: Vec<TaskMinutes> = per_task
            .into_iter()
            .map(|(title, minutes)| TaskMinutes { title, minutes })
            .collect();
        tasks.sort_by(|a, b| {
            b.minutes
                .total_cmp(&a.minutes)
                .then_with(|| a.title.cmp(&b.title))
        });
        tasks.truncate(limit);
        tasks
    }
}
