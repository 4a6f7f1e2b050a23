//! Helpers shared by the command handlers.

use chrono::NaiveDateTime;
use studynext_core::assignment::parse_due_date;
use studynext_core::{Config, JsonFileSource};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded configuration plus the assignment source for the active user.
pub struct Context {
    pub config: Config,
    pub source: JsonFileSource,
    pub user_id: String,
}

impl Context {
    /// Load config and open the default source. `user` overrides the
    /// configured profile user.
    pub fn load(user: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let source = JsonFileSource::open_default()?;
        let user_id = user.unwrap_or_else(|| config.profile.user_id.clone());
        tracing::debug!(user_id = %user_id, root = %source.root().display(), "loaded context");
        Ok(Self {
            config,
            source,
            user_id,
        })
    }
}

/// `--at` override or the local wall clock.
pub fn reference_time(at: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match at {
        Some(value) => parse_due_date(value)
            .ok_or_else(|| format!("cannot parse '{value}' as a date or date-time").into()),
        None => Ok(chrono::Local::now().naive_local()),
    }
}
