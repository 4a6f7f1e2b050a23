mod config;

pub use config::{Config, Profile};

use std::path::PathBuf;

/// Returns `~/.config/studynext[-dev]/` based on STUDYNEXT_ENV.
///
/// Set STUDYNEXT_ENV=dev to use development data directory.
/// STUDYNEXT_DATA_DIR overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("STUDYNEXT_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYNEXT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studynext-dev")
            } else {
                base_dir.join("studynext")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
