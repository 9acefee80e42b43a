//! Period reports backed by the session store.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc, Weekday};
use serde::Serialize;

use super::calculator::{DailyStats, MonthlyStats, StatsCalculator, TimeSlot, WeeklyStats};
use super::history::{DayGroup, HistoryFilter};
use super::period::{
    BasicStats, DayBucket, GoalProgress, HourBucket, Period, PeriodWindow, TaskMinutes,
    WeekdayBucket, TOP_TASKS,
};
use crate::clock::Clock;
use crate::error::Result;
use crate::storage::{SessionRecord, SessionStore, Settings};

/// The summary figure appropriate to a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeriodSummary {
    Daily(DailyStats),
    Weekly(WeeklyStats),
    Monthly(MonthlyStats),
}

/// Minutes distribution for a period view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "buckets", rename_all = "lowercase")]
pub enum Histogram {
    /// Daily view: 24 hour buckets.
    Hourly(Vec<HourBucket>),
    /// Weekly view: 7 weekday buckets, Sunday first.
    Weekday(Vec<WeekdayBucket>),
    /// Monthly view: one bucket per date in the window.
    Daily(Vec<DayBucket>),
}

/// Everything a statistics screen shows for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub window: PeriodWindow,
    pub basic: BasicStats,
    pub summary: PeriodSummary,
    pub histogram: Histogram,
    /// Top tasks by focus minutes; filled for the weekly view only.
    pub top_tasks: Vec<TaskMinutes>,
    /// Daily goal for the daily view, weekly goal for the weekly view.
    pub goal: Option<GoalProgress>,
    pub most_productive_slot: Option<TimeSlot>,
    pub most_productive_day: Option<Weekday>,
}

/// All-time figures over every stored session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub basic: BasicStats,
    pub active_days: usize,
    pub most_productive_slot: Option<TimeSlot>,
    pub most_productive_day: Option<Weekday>,
    pub first_session: Option<DateTime<Utc>>,
}

pub struct StatsService<Tz: TimeZone> {
    store: Arc<dyn SessionStore>,
    settings: Arc<dyn Settings>,
    clock: Arc<dyn Clock>,
    calculator: StatsCalculator<Tz>,
}

impl StatsService<Local> {
    pub fn local(
        store: Arc<dyn SessionStore>,
        settings: Arc<dyn Settings>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(store, settings, clock, Local)
    }
}

impl<Tz: TimeZone> StatsService<Tz> {
    pub fn new(
        store: Arc<dyn SessionStore>,
        settings: Arc<dyn Settings>,
        clock: Arc<dyn Clock>,
        tz: Tz,
    ) -> Self {
        Self {
            store,
            settings,
            clock,
            calculator: StatsCalculator::new(tz),
        }
    }

    pub fn calculator(&self) -> &StatsCalculator<Tz> {
        &self.calculator
    }

    /// Work sessions in the period's window, newest first.
    pub fn records(&self, period: Period) -> Result<(PeriodWindow, Vec<SessionRecord>)> {
        let window = self.calculator.window(period, self.clock.now());
        let records = self.store.query(window.start, window.end)?;
        Ok((window, records))
    }

    pub fn report(&self, period: Period) -> Result<PeriodReport> {
        let (window, records) = self.records(period)?;
        let calc = &self.calculator;
        let basic = calc.basic_stats(&records);

        let (summary, histogram, top_tasks, goal) = match period {
            Period::Daily => (
                PeriodSummary::Daily(calc.daily_stats(&records)),
                Histogram::Hourly(calc.hourly_histogram(&records)),
                Vec::new(),
                Some(GoalProgress::new(
                    basic.total_focus_minutes,
                    self.settings.daily_goal_minutes(),
                )),
            ),
            Period::Weekly => (
                PeriodSummary::Weekly(calc.weekly_stats(&records)),
                Histogram::Weekday(calc.weekday_histogram(&records)),
                calc.task_breakdown(&records, TOP_TASKS),
                Some(GoalProgress::new(
                    basic.total_focus_minutes,
                    self.settings.weekly_goal_minutes(),
                )),
            ),
            Period::Monthly => (
                PeriodSummary::Monthly(calc.monthly_stats(&records)),
                Histogram::Daily(calc.daily_histogram(
                    &records,
                    window.first_day,
                    window.last_day,
                )),
                Vec::new(),
                None,
            ),
        };

        tracing::debug!(
            period = %period,
            records = records.len(),
            minutes = basic.total_focus_minutes,
            "built period report"
        );

        Ok(PeriodReport {
            most_productive_slot: calc.most_productive_time_slot(&records),
            most_productive_day: calc.most_productive_day(&records),
            window,
            basic,
            summary,
            histogram,
            top_tasks,
            goal,
        })
    }

    pub fn overall(&self) -> Result<OverallSummary> {
        let records = self.store.query_all()?;
        let calc = &self.calculator;
        Ok(OverallSummary {
            basic: calc.basic_stats(&records),
            active_days: calc.weekly_stats(&records).active_days,
            most_productive_slot: calc.most_productive_time_slot(&records),
            most_productive_day: calc.most_productive_day(&records),
            first_session: records.iter().map(|r| r.start_time).min(),
        })
    }

    /// Every stored session (work and break) matching `filter`, grouped
    /// by local day.
    pub fn history(&self, filter: HistoryFilter) -> Result<Vec<DayGroup>> {
        let records = filter.apply(self.store.query_all()?);
        Ok(self.calculator.group_by_day(records))
    }
}
