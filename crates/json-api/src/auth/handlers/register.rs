//! Registration Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use brankas_app::auth::{AuthEvent, NewAccount};

use crate::{
    auth::{errors::into_status_error, models::MessageResponse},
    extensions::*,
    state::State,
};

const CONFIRMATION_SENT: &str =
    "Registration successful! Please check your email to confirm your account.";

/// Registration form.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    fn into_account(self) -> Result<NewAccount, StatusError> {
        if self.password != self.confirm_password {
            return Err(StatusError::bad_request().brief("Passwords do not match"));
        }

        let email = self.email.trim().to_string();

        if email.is_empty() || self.password.is_empty() {
            return Err(StatusError::bad_request().brief("Email and password are required."));
        }

        Ok(NewAccount {
            email,
            password: self.password,
            full_name: self.full_name.trim().to_string(),
        })
    }
}

/// Registration Handler
///
/// Creates an account. A session is stored only when the backend signs the
/// user in immediately.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid registration"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let holder = depot.session_holder_or_500()?;

    let outcome = state
        .app
        .auth
        .sign_up(json.into_inner().into_account()?)
        .await
        .map_err(into_status_error)?;

    if let Some(session) = outcome.session {
        holder.apply(AuthEvent::SignedIn(session));
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new(CONFIRMATION_SENT)))
}
