//! Set PIN Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::*,
    rentals::{errors::into_status_error, models::NextStepResponse},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetPinRequest {
    pub rental_id: Uuid,

    /// Exactly four digits
    pub pin: String,
}

/// Set PIN Handler
///
/// Stores the access PIN of a paid rental and e-mails a confirmation.
#[endpoint(
    tags("rentals"),
    summary = "Set PIN",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "PIN stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed PIN"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::CONFLICT, description = "Unpaid or PIN already set"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SetPinRequest>,
    depot: &mut Depot,
) -> Result<Json<NextStepResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let request = json.into_inner();

    let overview = state
        .app
        .rentals
        .set_pin(&user, request.rental_id.into(), &request.pin)
        .await
        .map_err(into_status_error)?;

    let rental = overview.rental.uuid;

    Ok(Json(NextStepResponse {
        redirect_after_ms: Some(2000),
        ..NextStepResponse::new(rental, format!("/confirmation?rentalId={rental}"))
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brankas_app::domain::rentals::{
        MockRentalsService, RentalsServiceError,
        pin::PinError,
        records::{PaymentStatus, RentalStatus, RentalUuid},
    };

    use crate::{
        rentals::handlers::tests::{make_overview, make_rental, with_pin},
        test_helpers::StateBuilder,
    };

    use super::*;

    fn make_service(rentals: MockRentalsService) -> Service {
        StateBuilder::new()
            .rentals(rentals)
            .signed_in(Router::with_path("set-pin").post(handler))
    }

    #[tokio::test]
    async fn test_set_pin_links_to_confirmation() -> TestResult {
        let mut rentals = MockRentalsService::new();
        let rental = with_pin(make_rental(RentalStatus::Active, PaymentStatus::Paid));
        let uuid = rental.uuid;
        let overview = make_overview(rental);

        rentals
            .expect_set_pin()
            .once()
            .withf(move |_, r, pin| *r == uuid && pin == "4821")
            .return_once(move |_, _, _| Ok(overview));

        let mut res = TestClient::post("http://example.com/set-pin")
            .json(&json!({ "rentalId": uuid, "pin": "4821" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: NextStepResponse = res.take_json().await?;

        assert_eq!(body.next, format!("/confirmation?rentalId={uuid}"));
        assert_eq!(body.redirect_after_ms, Some(2000));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_pin_returns_400() {
        let mut rentals = MockRentalsService::new();

        rentals
            .expect_set_pin()
            .once()
            .return_once(|_, _, _| Err(RentalsServiceError::Pin(PinError::InvalidFormat)));

        let res = TestClient::post("http://example.com/set-pin")
            .json(&json!({ "rentalId": RentalUuid::new(), "pin": "12a4" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_second_pin_returns_409() {
        let mut rentals = MockRentalsService::new();

        rentals
            .expect_set_pin()
            .once()
            .return_once(|_, _, _| Err(RentalsServiceError::PinAlreadySet));

        let res = TestClient::post("http://example.com/set-pin")
            .json(&json!({ "rentalId": RentalUuid::new(), "pin": "1234" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
