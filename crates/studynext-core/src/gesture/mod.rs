mod deferred;
mod item;
mod recognizer;

pub use deferred::DeferredCommit;
pub use item::{CompletionHandler, SwipeToComplete};
pub use recognizer::{GesturePhase, SwipeConfig, SwipeRecognizer};

/// Current wall-clock time in epoch milliseconds, for `pointer_up`/`tick`.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
