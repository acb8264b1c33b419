//! Auth client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth service refused the request, e.g. bad credentials or an expired token.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from auth service: {0}")]
    UnexpectedResponse(String),
}

impl AuthError {
    /// Whether the failure is attributable to the caller rather than the service.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
