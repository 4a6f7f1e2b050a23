use chrono::Datelike;
use clap::Args;
use studynext_core::{AssignmentSource, MonthGrid};

use super::common::{reference_time, CmdResult, Context};

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM (defaults to the current month)
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    at: Option<String>,
    #[arg(long)]
    user: Option<String>,
}

fn parse_month(value: &str) -> Result<(i32, u32), Box<dyn std::error::Error>> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{value}'"))?;
    Ok((year.parse()?, month.parse()?))
}

pub fn run(args: CalendarArgs) -> CmdResult {
    let ctx = Context::load(args.user)?;
    ctx.config.profile.require_premium("calendar")?;

    let today = reference_time(args.at.as_deref())?.date();
    let (year, month) = match args.month.as_deref() {
        Some(value) => parse_month(value)?,
        None => (today.year(), today.month()),
    };

    let assignments = ctx.source.get_all(&ctx.user_id)?;
    let grid = MonthGrid::build(
        year,
        month,
        ctx.config.triage.week_starts_on,
        today,
        &assignments,
    )?;
    println!("{}", serde_json::to_string_pretty(&grid)?);
    Ok(())
}
