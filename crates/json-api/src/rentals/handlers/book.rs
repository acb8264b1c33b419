//! Book Box Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use brankas_app::domain::rentals::{data::NewBooking, pricing::RentDuration};

use crate::{
    extensions::*,
    rentals::{errors::into_status_error, models::NextStepResponse},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookRequest {
    pub box_id: Uuid,

    /// One of `one_day`, `three_days`, `one_week`, `one_month`
    pub rent_duration: String,

    pub items_type: String,
}

/// Book Box Handler
///
/// Creates a pending rental for an available box.
#[endpoint(
    tags("rentals"),
    summary = "Book Deposit Box",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Rental created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid booking"),
        (status_code = StatusCode::NOT_FOUND, description = "Box not found"),
        (status_code = StatusCode::CONFLICT, description = "Box already rented"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<NextStepResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let request = json.into_inner();

    let rent_duration = request
        .rent_duration
        .parse::<RentDuration>()
        .or_400("Please choose a valid rental duration.")?;

    let rental = state
        .app
        .rentals
        .book_box(
            &user,
            NewBooking {
                box_uuid: request.box_id.into(),
                rent_duration,
                items_type: request.items_type,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(NextStepResponse::new(
        rental.uuid,
        format!("/payment?rentalId={}", rental.uuid),
    )))
}
