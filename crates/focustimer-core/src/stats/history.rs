//! Session history listing: filtering and per-day grouping.

use std::str::FromStr;

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::calculator::StatsCalculator;
use crate::error::ValidationError;
use crate::storage::SessionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    Completed,
    Interrupted,
}

impl HistoryFilter {
    pub fn matches(self, record: &SessionRecord) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Completed => record.is_completed,
            HistoryFilter::Interrupted => !record.is_completed,
        }
    }

    pub fn apply(self, records: Vec<SessionRecord>) -> Vec<SessionRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

impl FromStr for HistoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(HistoryFilter::All),
            "completed" => Ok(HistoryFilter::Completed),
            "interrupted" => Ok(HistoryFilter::Interrupted),
            other => Err(ValidationError::InvalidValue {
                field: "filter".into(),
                message: format!("expected all, completed or interrupted, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub records: Vec<SessionRecord>,
}

impl<Tz: TimeZone> StatsCalculator<Tz> {
    /// Group by local date, newest day first. Within a day records keep
    /// their input order.
    pub fn group_by_day(&self, records: Vec<SessionRecord>) -> Vec<DayGroup> {
        let mut groups: Vec<DayGroup> = Vec::new();
        for record in records {
            let date = self.local_date(&record.start_time);
            match groups.iter_mut().find(|g| g.date == date) {
                Some(group) => group.records.push(record),
                None => groups.push(DayGroup {
                    date,
                    records: vec![record],
                }),
            }
        }
        groups.sort_by(|a, b| b.date.cmp(&a.date));
        groups
    }
}
