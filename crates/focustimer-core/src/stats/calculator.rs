//! Summary statistics over session records.
//!
//! Only completed work sessions count. Minutes stay fractional
//! (`duration_secs / 60`); every average over an empty set is 0.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::storage::SessionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyStats {
    pub total_minutes: f64,
    pub session_count: usize,
    pub average_session_minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub total_minutes: f64,
    pub average_daily_minutes: f64,
    pub active_days: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total_minutes: f64,
    pub average_weekly_minutes: f64,
    pub active_weeks: usize,
}

/// One of the eight three-hour blocks of the day, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub index: u8,
    pub start_hour: u8,
    pub end_hour: u8,
}

impl TimeSlot {
    pub const COUNT: u8 = 8;

    pub fn for_hour(hour: u32) -> Self {
        Self::from_index((hour.min(23) / 3) as u8)
    }

    pub fn from_index(index: u8) -> Self {
        let index = index.min(Self::COUNT - 1);
        let start_hour = index * 3;
        Self {
            index,
            start_hour,
            end_hour: (start_hour + 3).min(24),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_hour, self.end_hour)
    }
}

/// Weekdays in the order the histograms use.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

pub(crate) fn safe_div(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Largest bucket; ties go to the smallest key.
fn max_bucket<K: Copy + Ord>(buckets: &BTreeMap<K, f64>) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for (&key, &minutes) in buckets {
        match best {
            Some((_, top)) if minutes <= top => {}
            _ => best = Some((key, minutes)),
        }
    }
    best.map(|(key, _)| key)
}

/// Statistics computed in a fixed timezone, which decides where day and
/// week boundaries fall.
#[derive(Debug, Clone)]
pub struct StatsCalculator<Tz: TimeZone> {
    tz: Tz,
}

impl StatsCalculator<Local> {
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl<Tz: TimeZone> StatsCalculator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn local_date(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    pub fn local_hour(&self, at: &DateTime<Utc>) -> u32 {
        at.with_timezone(&self.tz).hour()
    }

    pub fn local_weekday(&self, at: &DateTime<Utc>) -> Weekday {
        at.with_timezone(&self.tz).weekday()
    }

    /// The first instant of `date` in this timezone, as UTC.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        match self.tz.from_local_datetime(&midnight).earliest() {
            Some(local) => local.with_timezone(&Utc),
            // Midnight skipped by a DST jump: fall back to the UTC reading.
            None => midnight.and_utc(),
        }
    }

    /// `(year, month, week-of-month)` with weeks starting on Sunday, the
    /// first (possibly partial) week being 1.
    pub fn week_of_month(&self, date: NaiveDate) -> (i32, u32, u32) {
        let offset = date
            .with_day(1)
            .map(|first| first.weekday().num_days_from_sunday())
            .unwrap_or(0);
        (date.year(), date.month(), (date.day() - 1 + offset) / 7 + 1)
    }

    pub fn daily_stats(&self, records: &[SessionRecord]) -> DailyStats {
        let completed: Vec<&SessionRecord> =
            records.iter().filter(|r| r.is_completed_work()).collect();
        let total_minutes: f64 = completed.iter().map(|r| r.minutes()).sum();
        DailyStats {
            total_minutes,
            session_count: completed.len(),
            average_session_minutes: safe_div(total_minutes, completed.len()),
        }
    }

    pub fn weekly_stats(&self, records: &[SessionRecord]) -> WeeklyStats {
        let mut per_day: HashMap<NaiveDate, f64> = HashMap::new();
        for record in records.iter().filter(|r| r.is_completed_work()) {
            *per_day.entry(self.local_date(&record.start_time)).or_default() += record.minutes();
        }
        let total_minutes: f64 = per_day.values().sum();
        WeeklyStats {
            total_minutes,
            average_daily_minutes: safe_div(total_minutes, per_day.len()),
            active_days: per_day.len(),
        }
    }

    pub fn monthly_stats(&self, records: &[SessionRecord]) -> MonthlyStats {
        let mut per_week: HashMap<(i32, u32, u32), f64> = HashMap::new();
        for record in records.iter().filter(|r| r.is_completed_work()) {
            let week = self.week_of_month(self.local_date(&record.start_time));
            *per_week.entry(week).or_default() += record.minutes();
        }
        let total_minutes: f64 = per_week.values().sum();
        MonthlyStats {
            total_minutes,
            average_weekly_minutes: safe_div(total_minutes, per_week.len()),
            active_weeks: per_week.len(),
        }
    }

    /// The three-hour slot with the most completed focus minutes.
    pub fn most_productive_time_slot(&self, records: &[SessionRecord]) -> Option<TimeSlot> {
        let mut per_slot: BTreeMap<u8, f64> = BTreeMap::new();
        for record in records.iter().filter(|r| r.is_completed_work()) {
            let slot = TimeSlot::for_hour(self.local_hour(&record.start_time));
            *per_slot.entry(slot.index).or_default() += record.minutes();
        }
        max_bucket(&per_slot).map(TimeSlot::from_index)
    }

    /// The weekday with the most completed focus minutes.
    pub fn most_productive_day(&self, records: &[SessionRecord]) -> Option<Weekday> {
        let mut per_day: BTreeMap<u32, f64> = BTreeMap::new();
        for record in records.iter().filter(|r| r.is_completed_work()) {
            let day = self.local_weekday(&record.start_time).num_days_from_sunday();
            *per_day.entry(day).or_default() += record.minutes();
        }
        max_bucket(&per_day).map(|day| WEEKDAYS[day as usize])
    }
}
