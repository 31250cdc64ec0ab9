//! AI-client error types.

use thiserror::Error;

/// Errors from the hosted generation service.
#[derive(Debug, Error)]
pub enum AiError {
    /// The service is out of quota or rate limiting us.
    #[error("rate limited: {message}")]
    RateLimited { message: String },

    /// Any other non-success HTTP response.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The call succeeded but the payload is not usable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The audio call returned no data.
    #[error("audio synthesis returned no data")]
    EmptyAudio,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("invalid AI base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Textual markers the service uses when a project runs out of quota.
const QUOTA_MARKERS: [&str; 4] = ["quota", "429", "resource_exhausted", "rate limit"];

fn is_quota_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    QUOTA_MARKERS.iter().any(|marker| lowered.contains(marker))
}

impl AiError {
    /// Classify a non-success HTTP response. Quota exhaustion is detected
    /// from the status code or from textual markers in the body, because
    /// the service reports it both ways.
    pub fn from_status(status: u16, message: String) -> Self {
        if status == 429 || is_quota_message(&message) {
            AiError::RateLimited { message }
        } else {
            AiError::Api { status, message }
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, AiError::RateLimited { .. })
    }

    /// One-line notice for the transient user-facing surface.
    pub fn user_message(&self) -> &'static str {
        if self.is_rate_limit() {
            "The AI service is over its quota right now. Please try again later."
        } else {
            "Could not reach the AI service. Check your connection and try again."
        }
    }
}
