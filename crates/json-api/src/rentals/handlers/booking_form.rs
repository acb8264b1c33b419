//! Booking Form Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::{
    boxes::records::BoxUuid,
    rentals::{pricing::RentDuration, records::BookingView},
};

use crate::{
    extensions::*,
    rentals::{errors::into_status_error, models::DurationOption},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingFormResponse {
    pub box_id: Uuid,
    pub box_code: String,
    pub full_name: String,
    pub email: Option<String>,

    /// Rental durations in display order
    pub durations: Vec<DurationOption>,
}

impl From<BookingView> for BookingFormResponse {
    fn from(view: BookingView) -> Self {
        Self {
            box_id: view.deposit_box.uuid.into(),
            box_code: view.deposit_box.box_code,
            full_name: view.full_name,
            email: view.email,
            durations: RentDuration::BOOKING
                .into_iter()
                .map(DurationOption::booking)
                .collect(),
        }
    }
}

/// Booking Form Handler
///
/// Returns the selected box and the customer's details for booking.
#[endpoint(
    tags("rentals"),
    summary = "Booking Form",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Booking form"),
        (status_code = StatusCode::BAD_REQUEST, description = "No box selected"),
        (status_code = StatusCode::NOT_FOUND, description = "Box not found"),
        (status_code = StatusCode::CONFLICT, description = "Box already rented"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<BookingFormResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let deposit_box: BoxUuid = req.query_id_or_400("boxId", "No box selected.")?;

    let view = state
        .app
        .rentals
        .booking_view(&user, deposit_box)
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}
