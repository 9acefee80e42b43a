use std::sync::Arc;

use clap::Subcommand;
use focustimer_core::format::{format_minutes, format_percent};
use focustimer_core::stats::{weekday_name, Period, PeriodReport, StatsService};
use focustimer_core::SystemClock;
use serde_json::json;

use super::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's focus statistics
    Daily,
    /// The last 7 days
    Weekly,
    /// The last 30 days
    Monthly,
    /// All-time totals
    Summary,
}

/// Human-readable strings alongside the raw report.
fn display(report: &PeriodReport) -> serde_json::Value {
    json!({
        "total_focus": format_minutes(report.basic.total_focus_minutes),
        "average_session": format_minutes(report.basic.average_session_minutes),
        "goal": report.goal.map(|g| format_percent(g.ratio)),
        "most_productive_slot": report.most_productive_slot.map(|s| s.to_string()),
        "most_productive_day": report.most_productive_day.map(weekday_name),
    })
}

pub fn run(action: StatsAction) -> CliResult {
    let ctx = Context::open()?;
    let service = StatsService::local(ctx.db.clone(), ctx.config.clone(), Arc::new(SystemClock));

    let period = match action {
        StatsAction::Daily => Period::Daily,
        StatsAction::Weekly => Period::Weekly,
        StatsAction::Monthly => Period::Monthly,
        StatsAction::Summary => {
            let summary = service.overall()?;
            return print_json(&json!({
                "summary": summary,
                "display": {
                    "total_focus": format_minutes(summary.basic.total_focus_minutes),
                    "most_productive_slot": summary.most_productive_slot.map(|s| s.to_string()),
                    "most_productive_day": summary.most_productive_day.map(weekday_name),
                },
            }));
        }
    };

    let report = service.report(period)?;
    print_json(&json!({
        "report": report,
        "display": display(&report),
    }))
}
