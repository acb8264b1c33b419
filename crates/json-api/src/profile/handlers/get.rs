//! Get Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    profile::{errors::into_status_error, models::ProfileResponse},
    state::State,
};

/// Get Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let profile = state
        .app
        .users
        .get_profile(&user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
