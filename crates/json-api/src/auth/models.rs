//! Auth request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::auth::AuthUser;

/// E-mail and password.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Where the client goes after signing in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignedInResponse {
    /// Authenticated user id
    pub user_id: Uuid,

    pub email: Option<String>,

    /// Page to navigate to
    pub next: String,
}

impl SignedInResponse {
    pub(crate) fn new(user: &AuthUser, next: &str) -> Self {
        Self {
            user_id: user.uuid.into(),
            email: user.email.clone(),
            next: next.to_string(),
        }
    }
}

/// A message to show, optionally followed by navigation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Delay before navigating to `next`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_after_ms: Option<u64>,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            next: None,
            redirect_after_ms: None,
        }
    }
}
