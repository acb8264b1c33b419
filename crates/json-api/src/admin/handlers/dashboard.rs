//! Admin Dashboard Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::{errors::into_status_error, models::DashboardResponse},
    extensions::*,
    state::State,
};

/// Admin Dashboard Handler
///
/// Revenue, occupancy and the last week's activity. Fails as a whole when any
/// part fails.
#[endpoint(
    tags("admin"),
    summary = "Admin Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Dashboard"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    let dashboard = state
        .app
        .admin
        .dashboard(admin.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(dashboard.into()))
}
