//! Box Grid Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    boxes::{errors::into_status_error, models::DepositBoxResponse},
    extensions::*,
    state::State,
};

/// Box Grid Handler
///
/// Lists every deposit box ordered by code.
#[endpoint(
    tags("boxes"),
    summary = "List Deposit Boxes",
    responses(
        (status_code = StatusCode::OK, description = "Deposit boxes"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<DepositBoxResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let boxes = state
        .app
        .boxes
        .list_boxes()
        .await
        .map_err(into_status_error)?;

    Ok(Json(boxes.into_iter().map(Into::into).collect()))
}
