//! Admin Customers Handler

use std::sync::Arc;

use salvo::prelude::*;

use brankas_app::domain::admin::records::SignupRange;

use crate::{
    admin::{errors::into_status_error, models::CustomersResponse},
    extensions::*,
    state::State,
};

fn signup_range(raw: Option<&str>) -> Result<SignupRange, StatusError> {
    let Some(raw) = raw else {
        return Ok(SignupRange::default());
    };

    raw.parse::<i64>()
        .ok()
        .and_then(SignupRange::from_days)
        .ok_or_else(|| StatusError::bad_request().brief("range must be 7 or 30"))
}

/// Admin Customers Handler
///
/// All customers and the daily sign-ups of the last `range` days (7 or 30).
#[endpoint(
    tags("admin"),
    summary = "Admin Customers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unsupported range"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CustomersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;
    let range = signup_range(req.query_text("range").as_deref())?;

    let overview = state
        .app
        .admin
        .customers(admin.uuid, range)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CustomersResponse::new(overview, range.days())))
}
