//! Focus statistics.
//!
//! [`StatsCalculator`] holds the pure aggregation functions over session
//! records, evaluated in one timezone. [`StatsService`] pulls records for a
//! period window from a [`SessionStore`](crate::storage::SessionStore) and
//! assembles the report a statistics view shows.

mod calculator;
mod history;
mod period;
mod service;

pub use calculator::{
    weekday_name, DailyStats, MonthlyStats, StatsCalculator, TimeSlot, WeeklyStats, WEEKDAYS,
};
pub use history::{DayGroup, HistoryFilter};
pub use period::{
    BasicStats, DayBucket, GoalLevel, GoalProgress, HourBucket, Period, PeriodWindow,
    TaskMinutes, WeekdayBucket, TOP_TASKS,
};
pub use service::{Histogram, OverallSummary, PeriodReport, PeriodSummary, StatsService};
