//! Assignment management commands for CLI.

use clap::Subcommand;
use studynext_core::assignment::parse_due_date;
use studynext_core::{
    Assignment, AssignmentPatch, AssignmentSource, Priority, SourceError, ValidationError,
};

use super::common::{reference_time, CmdResult, Context};

#[derive(Subcommand)]
pub enum AssignmentAction {
    /// Add a new assignment
    Add {
        /// Subject label (e.g. "Math")
        subject: String,
        /// Assignment title
        title: String,
        /// Due date: YYYY-MM-DD or YYYY-MM-DDTHH:MM
        #[arg(long)]
        due: String,
        /// Priority: high, medium or low
        #[arg(long)]
        priority: Option<String>,
        /// Color override (e.g. "#f97316")
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// List assignments
    List {
        /// Include completed assignments
        #[arg(long)]
        all: bool,
        #[arg(long)]
        user: Option<String>,
    },
    /// Mark an assignment complete
    Complete {
        id: String,
        /// Completion time (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Mark an assignment incomplete again
    Reopen {
        id: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete an assignment
    Delete {
        id: String,
        #[arg(long)]
        user: Option<String>,
    },
}

fn parse_priority(label: Option<String>) -> Result<Option<Priority>, Box<dyn std::error::Error>> {
    match label {
        None => Ok(None),
        Some(label) => Priority::from_label(&label)
            .map(Some)
            .ok_or_else(|| format!("unknown priority '{label}' (expected high, medium or low)").into()),
    }
}

pub fn run(action: AssignmentAction) -> CmdResult {
    match action {
        AssignmentAction::Add {
            subject,
            title,
            due,
            priority,
            color,
            user,
        } => {
            let ctx = Context::load(user)?;
            let due_date =
                parse_due_date(&due).ok_or_else(|| format!("cannot parse due date '{due}'"))?;
            let assignment = Assignment::new(subject, title, due_date)?
                .with_priority(parse_priority(priority)?)
                .with_color(color);
            ctx.source.insert(&ctx.user_id, &assignment)?;
            tracing::info!(assignment_id = %assignment.id, "assignment added");
            println!("{}", serde_json::to_string_pretty(&assignment)?);
        }
        AssignmentAction::List { all, user } => {
            let ctx = Context::load(user)?;
            let assignments: Vec<_> = ctx
                .source
                .get_all(&ctx.user_id)?
                .into_iter()
                .filter(|a| all || !a.completed)
                .collect();
            println!("{}", serde_json::to_string_pretty(&assignments)?);
        }
        AssignmentAction::Complete { id, at, user } => {
            let mut ctx = Context::load(user)?;
            let when = reference_time(at.as_deref())?;
            let existing = ctx.source.get_all(&ctx.user_id)?;
            match existing.iter().find(|a| a.id == id) {
                None => return Err(SourceError::NotFound { id }.into()),
                Some(a) if a.completed => {
                    return Err(ValidationError::AlreadyCompleted { id }.into())
                }
                Some(_) => {}
            }
            ctx.source
                .update(&ctx.user_id, &id, &AssignmentPatch::complete(when))?;
            println!("Assignment completed: {id}");
        }
        AssignmentAction::Reopen { id, user } => {
            let mut ctx = Context::load(user)?;
            ctx.source
                .update(&ctx.user_id, &id, &AssignmentPatch::reopen())?;
            println!("Assignment reopened: {id}");
        }
        AssignmentAction::Delete { id, user } => {
            let ctx = Context::load(user)?;
            ctx.source.remove(&ctx.user_id, &id)?;
            println!("Assignment deleted: {id}");
        }
    }
    Ok(())
}
