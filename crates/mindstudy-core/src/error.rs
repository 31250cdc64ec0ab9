//! Core error types for mindstudy-core.
//!
//! This module defines the error hierarchy using thiserror. The AI client
//! has its own [`AiError`](crate::ai::AiError) taxonomy in `ai/error.rs`;
//! everything funnels into [`CoreError`] at the library boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::ai::AiError;

/// Core error type for mindstudy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors from the hosted generation service
    #[error("AI service error: {0}")]
    Ai(#[from] AiError),

    /// Plan-workflow state machine errors
    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Plan-workflow errors.
///
/// These mark rejected transitions; the wizard itself stays in its last
/// stable state whenever one is returned.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// A generation request is already outstanding for this wizard.
    #[error("a generation request is already in flight")]
    RequestInFlight,

    /// The profile form was submitted with an empty text field.
    #[error("profile field '{0}' must not be empty")]
    EmptyProfileField(&'static str),

    /// An answer arrived while the wizard was not on a quiz question.
    #[error("the wizard is not accepting quiz answers in its current step")]
    NotInQuiz,

    /// An answer arrived after all questions were already answered.
    #[error("all {expected} quiz answers are already collected")]
    QuizComplete { expected: usize },

    /// Generation was requested before the quiz finished.
    #[error("only {answered} of {expected} quiz answers collected")]
    QuizIncomplete { answered: usize, expected: usize },

    /// An operation was invoked in a step where it has no meaning.
    #[error("operation not valid in the current wizard step")]
    InvalidStep,

    /// The generation request itself failed.
    #[error(transparent)]
    Generation(#[from] AiError),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        DatabaseError::QueryFailed(err.to_string())
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
