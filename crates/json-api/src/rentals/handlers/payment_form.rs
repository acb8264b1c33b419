//! Payment Form Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::rentals::records::{PaymentView, RentalUuid};

use crate::{
    extensions::*,
    rentals::{
        errors::into_status_error,
        models::{money, offered_payment_methods},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentFormResponse {
    pub rental_id: Uuid,
    pub box_id: Uuid,
    pub box_code: String,
    pub price: String,
    pub rent_duration: String,
    pub items_type: String,
    pub customer_name: String,
    pub payment_methods: Vec<String>,

    /// Send back with the payment to make retries safe
    pub submission_key: Uuid,
}

impl From<PaymentView> for PaymentFormResponse {
    fn from(view: PaymentView) -> Self {
        Self {
            rental_id: view.rental.uuid.into(),
            box_id: view.rental.box_uuid.into(),
            box_code: view.box_code,
            price: money(view.rental.price),
            rent_duration: view.rental.rent_duration,
            items_type: view.rental.items_type,
            customer_name: view.customer_name,
            payment_methods: offered_payment_methods(),
            submission_key: Uuid::new_v4(),
        }
    }
}

/// Payment Form Handler
///
/// Returns an unpaid rental of the current user for payment.
#[endpoint(
    tags("rentals"),
    summary = "Payment Form",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment form"),
        (status_code = StatusCode::BAD_REQUEST, description = "No rental selected"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::CONFLICT, description = "Already paid"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<PaymentFormResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let rental: RentalUuid = req.query_id_or_400("rentalId", "No rental selected.")?;

    let view = state
        .app
        .rentals
        .payment_view(&user, rental)
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}
