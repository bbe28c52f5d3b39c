//! # Assist Error Types
//!
//! Internal failures of a suggestion call. None of these reach the caller:
//! [`crate::Suggester`] implementations fold them into a
//! [`crate::Suggestion`] with a displayable message.

use thiserror::Error;

/// Result type alias for assist operations.
pub type AssistResult<T> = Result<T, AssistError>;

#[derive(Debug, Error)]
pub enum AssistError {
    /// No API key configured.
    #[error("API key not configured")]
    NotConfigured,

    /// Transport failure, timeout, or undecodable body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response held no candidate text.
    #[error("Response contained no text")]
    EmptyResponse,
}
