//! Admin Payments Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::{errors::into_status_error, models::PaymentsResponse},
    extensions::*,
    state::State,
};

/// Admin Payments Handler
///
/// Payment totals, the payment ledger and the method distribution.
#[endpoint(
    tags("admin"),
    summary = "Admin Payments",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payments"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PaymentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    let overview = state
        .app
        .admin
        .payments(admin.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(overview.into()))
}
