//! Error types for the library console

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),

    /// A state accepted an action it has no transition for. This is a gap in
    /// the navigation table, never a user mistake.
    #[error("Unhandled action {action} in state {state}")]
    UnhandledAction { state: String, action: String },
}

impl AppError {
    pub fn not_found(what: &str, id: i32) -> Self {
        AppError::NotFound(format!("{} with id {} not found", what, id))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
