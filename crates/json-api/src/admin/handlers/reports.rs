//! Admin Reports Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::{errors::into_status_error, models::ReportsResponse},
    extensions::*,
    state::State,
};

/// Admin Reports Handler
///
/// Weekly reports, newest first, with the newest one loaded.
#[endpoint(
    tags("admin"),
    summary = "Admin Reports",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Reports"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReportsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    let overview = state
        .app
        .admin
        .reports(admin.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(overview.into()))
}
