use clap::Subcommand;
use studynext_core::{triage::weekly_summary, AssignmentSource, Progress};

use super::common::{reference_time, CmdResult, Context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Completed vs. total assignments due this week
    Week {
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// XP, level and streak
    Progress {
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: StatsAction) -> CmdResult {
    match action {
        StatsAction::Week { at, user } => {
            let ctx = Context::load(user)?;
            let today = reference_time(at.as_deref())?.date();
            let assignments = ctx.source.get_all(&ctx.user_id)?;
            let summary = weekly_summary(&assignments, today, ctx.config.triage.week_starts_on);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Progress { at, user } => {
            let ctx = Context::load(user)?;
            let today = reference_time(at.as_deref())?.date();
            let assignments = ctx.source.get_all(&ctx.user_id)?;
            let progress = Progress::from_assignments(&assignments, today, &ctx.config.rewards);
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
    }
    Ok(())
}
