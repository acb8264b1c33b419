//! Confirmation Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::rentals::records::{RentalOverview, RentalUuid};

use crate::{
    extensions::*,
    rentals::{
        errors::into_status_error,
        models::{masked_pin, money, timestamp},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfirmationResponse {
    pub rental_id: Uuid,
    pub box_code: String,
    pub status: String,
    pub payment_status: String,
    pub rent_duration: String,
    pub items_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub price: String,
    pub total_paid: String,

    /// Value encoded in the access barcode
    pub barcode: String,

    pub pin_set: bool,

    /// `••••` once a PIN is set; the PIN itself is never returned
    pub masked_pin: Option<String>,
}

impl From<RentalOverview> for ConfirmationResponse {
    fn from(overview: RentalOverview) -> Self {
        let masked_pin = masked_pin(&overview);
        let rental = overview.rental;

        Self {
            rental_id: rental.uuid.into(),
            box_code: overview.box_code,
            status: rental.status.to_string(),
            payment_status: rental.payment_status.to_string(),
            rent_duration: rental.rent_duration,
            items_type: rental.items_type,
            start_date: timestamp(rental.start_date),
            end_date: timestamp(rental.end_date),
            price: money(rental.price),
            total_paid: money(overview.total_paid),
            barcode: rental.barcode,
            pin_set: masked_pin.is_some(),
            masked_pin,
        }
    }
}

/// Confirmation Handler
///
/// Returns the completed rental with its barcode.
#[endpoint(
    tags("rentals"),
    summary = "Rental Confirmation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Rental confirmation"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ConfirmationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let rental: RentalUuid = req.query_id_or_400("rentalId", "No rental selected.")?;

    let overview = state
        .app
        .rentals
        .rental_overview(user.uuid, rental)
        .await
        .map_err(into_status_error)?;

    Ok(Json(overview.into()))
}
