//! Password Recovery Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use crate::{
    auth::{errors::into_status_error, models::MessageResponse},
    extensions::*,
    state::State,
};

const RECOVERY_SENT: &str =
    "If an account exists for this email, a password reset link has been sent.";

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ForgotPasswordRequest {
    pub email: String,
}

/// Password Recovery Handler
///
/// Sends a recovery e-mail that links back to the update-password page.
#[endpoint(
    tags("auth"),
    summary = "Request Password Reset",
    responses(
        (status_code = StatusCode::OK, description = "Recovery requested"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing e-mail"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ForgotPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let email = json.into_inner().email.trim().to_string();

    if email.is_empty() {
        return Err(StatusError::bad_request().brief("Email is required."));
    }

    let redirect_to = state.web.page_url("/update-password");

    state
        .app
        .auth
        .send_password_recovery(&email, &redirect_to)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new(RECOVERY_SENT)))
}
