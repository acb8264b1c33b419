//! Assistant errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("generative API key is not configured")]
    NotConfigured,

    /// The generative API answered with a non-success status; holds its body.
    #[error("{0}")]
    Upstream(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
