use std::sync::Arc;

use clap::{Subcommand, ValueEnum};
use focustimer_core::format::format_duration;
use focustimer_core::stats::{HistoryFilter, StatsService};
use focustimer_core::{SessionStore, SystemClock};
use serde_json::json;
use uuid::Uuid;

use super::{print_json, CliResult, Context};

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    Completed,
    Interrupted,
}

impl From<FilterArg> for HistoryFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => HistoryFilter::All,
            FilterArg::Completed => HistoryFilter::Completed,
            FilterArg::Interrupted => HistoryFilter::Interrupted,
        }
    }
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List sessions grouped by day, newest first
    List {
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,
    },
    /// Attach a memo to a session
    Memo {
        /// Session ID
        id: Uuid,
        /// Memo text
        text: String,
    },
    /// Delete a session
    Delete {
        /// Session ID
        id: Uuid,
    },
    /// Delete every session
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: HistoryAction) -> CliResult {
    let ctx = Context::open()?;

    match action {
        HistoryAction::List { filter } => {
            let service =
                StatsService::local(ctx.db.clone(), ctx.config.clone(), Arc::new(SystemClock));
            let groups = service.history(filter.into())?;
            let days: Vec<serde_json::Value> = groups
                .iter()
                .map(|group| {
                    let sessions: Vec<serde_json::Value> = group
                        .records
                        .iter()
                        .map(|r| {
                            json!({
                                "record": r,
                                "title": r.display_title(),
                                "duration": format_duration(r.duration_secs),
                            })
                        })
                        .collect();
                    json!({ "date": group.date, "sessions": sessions })
                })
                .collect();
            print_json(&days)?;
        }
        HistoryAction::Memo { id, text } => {
            ctx.db.update_memo(id, &text)?;
            println!("ok");
        }
        HistoryAction::Delete { id } => {
            ctx.db.delete(id)?;
            println!("deleted {id}");
        }
        HistoryAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear history without --yes".into());
            }
            ctx.db.delete_all()?;
            println!("history cleared");
        }
    }
    Ok(())
}
