//! Swipe-to-complete list item.
//!
//! The item can be driven two ways. Synchronously, the owner polls
//! [`SwipeToComplete::tick`] with the wall clock. On a tokio runtime,
//! [`SwipeToComplete::release`] schedules the completion as a
//! [`DeferredCommit`] owned by the item, [`SwipeToComplete::settle`] waits
//! for it, and [`SwipeToComplete::unmount`] (or dropping the item) aborts it.

use std::time::Duration;

use chrono::Utc;

use super::deferred::DeferredCommit;
use super::recognizer::{SwipeConfig, SwipeRecognizer};
use crate::error::Result;
use crate::events::Event;

/// Receives the completion decision for an assignment.
///
/// The owner of the toggle-completion operation implements this; it is
/// also responsible for persistence and for reconciling the displayed
/// list if the update fails.
pub trait CompletionHandler {
    fn complete(&mut self, assignment_id: &str) -> Result<()>;
}

impl<F> CompletionHandler for F
where
    F: FnMut(&str) -> Result<()>,
{
    fn complete(&mut self, assignment_id: &str) -> Result<()> {
        self(assignment_id)
    }
}

/// A recognizer bound to one assignment and its completion handler.
pub struct SwipeToComplete<H> {
    assignment_id: String,
    recognizer: SwipeRecognizer,
    handler: H,
    /// Completion scheduled by `release`, if any.
    pending: Option<DeferredCommit<Result<()>>>,
}

impl<H: CompletionHandler> SwipeToComplete<H> {
    pub fn new(assignment_id: impl Into<String>, config: SwipeConfig, handler: H) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            recognizer: SwipeRecognizer::new(config),
            handler,
            pending: None,
        }
    }

    pub fn assignment_id(&self) -> &str {
        &self.assignment_id
    }

    pub fn recognizer(&self) -> &SwipeRecognizer {
        &self.recognizer
    }

    /// Whether a completion scheduled by `release` is still waiting.
    pub fn has_pending_commit(&self) -> bool {
        self.pending.as_ref().is_some_and(DeferredCommit::is_pending)
    }

    pub fn pointer_down(&mut self, x: f64) -> Option<Event> {
        self.recognizer.pointer_down(x)
    }

    pub fn pointer_move(&mut self, x: f64) -> f64 {
        self.recognizer.pointer_move(x)
    }

    pub fn pointer_up(&mut self, now_ms: u64) -> Option<Event> {
        self.recognizer.pointer_up(now_ms)
    }

    pub fn pointer_cancel(&mut self) -> Option<Event> {
        self.recognizer.pointer_cancel()
    }

    /// Advance the pending commit. When it fires, the handler is called
    /// once and `AssignmentCompleted` is returned.
    ///
    /// Does nothing while a commit scheduled by `release` is outstanding;
    /// that one completes through `settle`.
    ///
    /// # Errors
    /// Returns the handler's error. The card has already reset by then;
    /// the owner should reload its list.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<Event>> {
        if self.pending.is_some() {
            return Ok(None);
        }
        let Some(Event::CommitFired { .. }) = self.recognizer.tick(now_ms) else {
            return Ok(None);
        };
        let outcome = self.handler.complete(&self.assignment_id);
        self.finish(outcome)
    }

    /// The item is being unmounted; drop any pending commit.
    pub fn unmount(&mut self) -> Option<Event> {
        if let Some(mut pending) = self.pending.take() {
            pending.cancel();
        }
        self.recognizer.cancel()
    }

    fn finish(&self, outcome: Result<()>) -> Result<Option<Event>> {
        if let Err(err) = outcome {
            tracing::warn!(
                assignment_id = %self.assignment_id,
                error = %err,
                "completion handler failed"
            );
            return Err(err);
        }
        tracing::info!(assignment_id = %self.assignment_id, "assignment completed by swipe");
        Ok(Some(Event::AssignmentCompleted {
            assignment_id: self.assignment_id.clone(),
            at: Utc::now(),
        }))
    }
}

impl<H> SwipeToComplete<H>
where
    H: CompletionHandler + Clone + Send + 'static,
{
    /// Release the pointer. A committing release schedules the handler to
    /// run after the commit delay on the current tokio runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn release(&mut self, now_ms: u64) -> Option<Event> {
        let event = self.recognizer.pointer_up(now_ms);
        if let Some(Event::CommitScheduled { delay_ms, .. }) = event {
            let mut handler = self.handler.clone();
            let id = self.assignment_id.clone();
            self.pending = Some(DeferredCommit::schedule(
                Duration::from_millis(delay_ms),
                move || handler.complete(&id),
            ));
        }
        event
    }

    /// Wait for the commit scheduled by `release`.
    ///
    /// Returns `Ok(None)` when nothing was scheduled or the commit was
    /// cancelled.
    ///
    /// # Errors
    /// Returns the handler's error, as [`SwipeToComplete::tick`] does.
    pub async fn settle(&mut self) -> Result<Option<Event>> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        let Some(outcome) = pending.wait().await else {
            return Ok(None);
        };
        if let Some(deadline) = self.recognizer.commit_at_ms() {
            self.recognizer.tick(deadline);
        }
        self.finish(outcome)
    }
}
