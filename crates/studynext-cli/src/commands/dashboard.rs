use clap::Args;
use studynext_core::{triage, triage::weekly_summary, AssignmentSource, Bucket};

use super::common::{reference_time, CmdResult, Context};

#[derive(Args)]
pub struct DashboardArgs {
    /// Evaluate at this local time instead of now (e.g. 2026-02-05T20:00)
    #[arg(long)]
    at: Option<String>,
    /// User id (defaults to profile.user_id)
    #[arg(long)]
    user: Option<String>,
    /// Include items hidden by Tonight Mode
    #[arg(long)]
    all: bool,
}

pub fn run(args: DashboardArgs) -> CmdResult {
    let ctx = Context::load(args.user)?;
    let now = reference_time(args.at.as_deref())?;

    let assignments = ctx.source.get_all(&ctx.user_id)?;
    let result = triage(&assignments, now, &ctx.config.triage);
    let week = weekly_summary(&assignments, now.date(), ctx.config.triage.week_starts_on);

    let items = if args.all { &result.ordered } else { &result.visible };
    let rows: Vec<_> = items
        .iter()
        .map(|e| {
            serde_json::json!({
                "id": e.assignment.id,
                "subject": e.assignment.subject,
                "title": e.assignment.title,
                "due_date": e.assignment.due_date,
                "priority": e.assignment.priority,
                "color": e.assignment.color,
                "bucket": e.bucket,
                "status": e.bucket.label(),
            })
        })
        .collect();

    let out = serde_json::json!({
        "user_id": ctx.user_id,
        "evaluated_at": result.evaluated_at,
        "tonight_mode": result.tonight_mode,
        "hidden": result.hidden(),
        "counts": result.counts,
        "visible_counts": {
            "overdue": result.in_bucket(Bucket::Overdue).count(),
            "today": result.in_bucket(Bucket::Today).count(),
            "upcoming": result.in_bucket(Bucket::Upcoming).count(),
        },
        "assignments": rows,
        "week": {
            "start": week.week_start,
            "end": week.week_end,
            "total": week.total,
            "completed": week.completed,
            "completion_pct": week.completion_pct(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
