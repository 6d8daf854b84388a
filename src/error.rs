//! Error types for the fencing ladder
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific roster and bout scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Fencer not found: {fencer_id}")]
    FencerNotFound { fencer_id: String },

    #[error("A fencer named '{name}' already exists")]
    DuplicateFencer { name: String },

    #[error("Invalid fencer name: {reason}")]
    InvalidFencerName { reason: String },

    #[error("Bout not found: {bout_id}")]
    BoutNotFound { bout_id: String },

    #[error("Invalid bout: {reason}")]
    InvalidBout { reason: String },

    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
