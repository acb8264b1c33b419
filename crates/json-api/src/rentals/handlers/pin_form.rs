//! PIN Form Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::rentals::records::RentalUuid;

use crate::{extensions::*, rentals::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PinFormResponse {
    pub rental_id: Uuid,
    pub box_code: String,
}

/// PIN Form Handler
///
/// Checks that a paid rental is still waiting for its PIN.
#[endpoint(
    tags("rentals"),
    summary = "PIN Form",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ready for a PIN"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::CONFLICT, description = "Unpaid or PIN already set"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<PinFormResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let rental: RentalUuid = req.query_id_or_400("rentalId", "No rental selected.")?;

    let overview = state
        .app
        .rentals
        .pin_view(user.uuid, rental)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PinFormResponse {
        rental_id: overview.rental.uuid.into(),
        box_code: overview.box_code,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use brankas_app::domain::rentals::{MockRentalsService, RentalsServiceError};

    use crate::test_helpers::StateBuilder;

    use super::*;

    #[tokio::test]
    async fn test_unpaid_rental_returns_409() {
        let mut rentals = MockRentalsService::new();

        rentals
            .expect_pin_view()
            .once()
            .return_once(|_, _| Err(RentalsServiceError::PaymentIncomplete));

        let service = StateBuilder::new()
            .rentals(rentals)
            .signed_in(Router::with_path("set-pin").get(handler));

        let res = TestClient::get(format!(
            "http://example.com/set-pin?rentalId={}",
            RentalUuid::new()
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
