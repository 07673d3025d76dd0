//! Error types for the strategy assistant
//!
//! Classification and dispatch are total and never produce these. Errors only
//! surface while the process is starting up.

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {

    // =============================
    // Startup Errors
    // =============================

    #[error("Stop words unavailable: {0}")]
    StopWordsUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
