//! Admin Report Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    admin::{errors::into_status_error, models::WeeklyReportResponse},
    extensions::*,
    state::State,
};

/// Admin Report Handler
#[endpoint(
    tags("admin"),
    summary = "Admin Weekly Report",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Weekly report"),
        (status_code = StatusCode::NOT_FOUND, description = "Report not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    report: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WeeklyReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    let report = state
        .app
        .admin
        .report(admin.uuid, report.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(report.into()))
}
