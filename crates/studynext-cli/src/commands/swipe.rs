//! Replays a swipe gesture against one assignment.
//!
//! The first position is the pointer-down, the rest are pointer moves, and
//! the gesture is released after the last one. A committed swipe waits
//! out the commit delay before the assignment is marked complete.

use clap::Args;
use studynext_core::error::Result as CoreResult;
use studynext_core::gesture::now_ms;
use studynext_core::{
    AssignmentPatch, AssignmentSource, Celebration, CoreError, Event, Progress, SourceError,
    SwipeToComplete, ValidationError,
};

use super::common::{reference_time, CmdResult, Context};

#[derive(Args)]
pub struct SwipeArgs {
    /// Assignment id
    id: String,
    /// Pointer x positions, comma-separated (e.g. "10,60,180")
    #[arg(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
    moves: Vec<f64>,
    #[arg(long)]
    at: Option<String>,
    #[arg(long)]
    user: Option<String>,
}

pub fn run(args: SwipeArgs) -> CmdResult {
    let Context {
        config,
        source,
        user_id,
    } = Context::load(args.user)?;
    let now = reference_time(args.at.as_deref())?;

    let before = source.get_all(&user_id)?;
    match before.iter().find(|a| a.id == args.id) {
        None => return Err(SourceError::NotFound { id: args.id }.into()),
        Some(a) if a.completed => {
            return Err(ValidationError::AlreadyCompleted { id: args.id }.into())
        }
        Some(_) => {}
    }
    let (first, rest) = args
        .moves
        .split_first()
        .ok_or("--moves needs at least one position")?;

    let complete = {
        let mut source = source.clone();
        let user_id = user_id.clone();
        move |id: &str| -> CoreResult<()> {
            source.update(&user_id, id, &AssignmentPatch::complete(now))
        }
    };
    let mut item = SwipeToComplete::new(args.id.clone(), config.swipe.clone(), complete);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let events = runtime.block_on(async {
        let mut events: Vec<Event> = Vec::new();
        events.extend(item.pointer_down(*first));
        for x in rest {
            item.pointer_move(*x);
        }
        events.extend(item.release(now_ms()));
        events.extend(item.settle().await?);
        Ok::<_, CoreError>(events)
    })?;

    let celebration = if events
        .iter()
        .any(|e| matches!(e, Event::AssignmentCompleted { .. }))
    {
        let after = source.get_all(&user_id)?;
        let today = now.date();
        let progress_before = Progress::from_assignments(&before, today, &config.rewards);
        let progress_after = Progress::from_assignments(&after, today, &config.rewards);
        Some(Celebration::between(
            args.id.clone(),
            &progress_before,
            &progress_after,
        ))
    } else {
        None
    };

    let out = serde_json::json!({
        "assignment_id": args.id,
        "events": events,
        "celebration": celebration,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
