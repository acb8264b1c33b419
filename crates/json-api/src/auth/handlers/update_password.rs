//! Update Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use brankas_app::auth::{AuthEvent, guard::LOGIN_PATH};

use crate::{
    auth::{errors::into_status_error, models::MessageResponse},
    extensions::*,
    state::State,
};

const PASSWORD_UPDATED: &str = "Your password has been updated successfully!";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

/// Update Password Handler
///
/// Sets a new password for the current (usually recovery) session.
#[endpoint(
    tags("auth"),
    summary = "Update Password",
    responses(
        (status_code = StatusCode::OK, description = "Password updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid password"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdatePasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let holder = depot.session_holder_or_500()?;
    let session = depot.session_or_401()?;

    let request = json.into_inner();

    if request.password != request.confirm_password {
        return Err(StatusError::bad_request().brief("Passwords do not match"));
    }

    if request.password.is_empty() {
        return Err(StatusError::bad_request().brief("Password is required."));
    }

    let user = state
        .app
        .auth
        .update_password(session.access_token.expose(), &request.password)
        .await
        .map_err(into_status_error)?;

    holder.apply(AuthEvent::UserUpdated(user));

    Ok(Json(MessageResponse {
        message: PASSWORD_UPDATED.to_string(),
        next: Some(LOGIN_PATH.to_string()),
        redirect_after_ms: Some(2000),
    }))
}
