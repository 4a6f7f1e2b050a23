//! Core error types for studynext-core.
//!
//! This module defines the error hierarchy using thiserror so that
//! callers can tell configuration problems, malformed records and data
//! source failures apart.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studynext-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Assignment data source errors
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    /// A premium-only view was requested on a free profile
    #[error("'{feature}' requires a premium subscription")]
    Entitlement { feature: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors for incoming records and user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Due date could not be parsed
    #[error("Invalid due date '{value}' for assignment '{id}'")]
    InvalidDueDate { id: String, value: String },

    /// Required field is blank
    #[error("Field '{field}' must not be empty")]
    EmptyField { field: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Completion requested for an assignment that is already done
    #[error("Assignment '{id}' is already completed")]
    AlreadyCompleted { id: String },
}

/// Errors raised by an assignment data source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// No record with the given id
    #[error("Assignment not found: {id}")]
    NotFound { id: String },

    /// Reading from the backing store failed
    #[error("Failed to read assignments from {location}: {message}")]
    ReadFailed { location: String, message: String },

    /// Writing to the backing store failed
    #[error("Failed to write assignments to {location}: {message}")]
    WriteFailed { location: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
