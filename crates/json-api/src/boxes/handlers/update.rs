//! Update Box Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use brankas_app::domain::boxes::records::BoxStatus;

use crate::{
    boxes::{errors::into_status_error, models::DepositBoxResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateBoxRequest {
    /// One of `available`, `pending`, `rented`, `unavailable`, `maintenance`
    pub status: String,
}

/// Update Box Status Handler
///
/// Overrides the status of a deposit box.
#[endpoint(
    tags("admin"),
    summary = "Update Deposit Box Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Box updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Box not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    deposit_box: PathParam<Uuid>,
    json: JsonBody<UpdateBoxRequest>,
    depot: &mut Depot,
) -> Result<Json<DepositBoxResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    let status = json
        .into_inner()
        .status
        .parse::<BoxStatus>()
        .or_400("Unknown box status")?;

    let updated = state
        .app
        .boxes
        .update_status(Some(admin.uuid), deposit_box.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
