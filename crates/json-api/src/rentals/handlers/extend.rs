//! Extend Rental Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use brankas_app::domain::rentals::{
    data::ExtensionSubmission, pricing::RentDuration, records::PaymentMethod,
};

use crate::{
    extensions::*,
    rentals::{
        errors::into_submission_error,
        models::{NextStepResponse, submission_key},
    },
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExtendRequest {
    pub rental_id: Uuid,

    /// One of `one_day`, `three_days`, `one_week`
    pub duration: String,

    /// Defaults to `credit_card`
    pub payment_method: Option<String>,

    pub submission_key: Option<Uuid>,
}

impl ExtendRequest {
    fn method(&self) -> Result<PaymentMethod, StatusError> {
        self.payment_method
            .as_deref()
            .map_or(Ok(PaymentMethod::CreditCard), str::parse)
            .or_400("Please choose a valid payment method.")
    }
}

/// Extend Rental Handler
///
/// Adds time to an active rental. Repeating a submission key replays the
/// first success.
#[endpoint(
    tags("rentals"),
    summary = "Extend Rental",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Rental extended"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid extension"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::CONFLICT, description = "Rental not active"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Extension failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ExtendRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<NextStepResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let request = json.into_inner();

    let duration = request
        .duration
        .parse::<RentDuration>()
        .or_400("Please choose a valid extension duration.")?;

    let extension = ExtensionSubmission {
        rental: request.rental_id.into(),
        duration,
        method: request.method()?,
        submission_key: submission_key(req.headers(), request.submission_key)?,
    };

    let outcome = state
        .app
        .rentals
        .extend_rental(user.uuid, extension)
        .await
        .map_err(into_submission_error("Extension failed:"))?;

    Ok(Json(NextStepResponse {
        replayed: Some(outcome.replayed),
        ..NextStepResponse::new(outcome.rental, "/my-orders?extended=true".to_string())
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brankas_app::domain::rentals::{
        MockRentalsService, RentalsServiceError,
        records::{RentalUuid, SubmissionOutcome},
    };

    use crate::test_helpers::StateBuilder;

    use super::*;

    fn make_service(rentals: MockRentalsService) -> Service {
        StateBuilder::new()
            .rentals(rentals)
            .signed_in(Router::with_path("extend-duration").post(handler))
    }

    #[tokio::test]
    async fn test_extend_defaults_to_credit_card() -> TestResult {
        let mut rentals = MockRentalsService::new();
        let rental = RentalUuid::new();

        rentals
            .expect_extend_rental()
            .once()
            .withf(move |_, extension| {
                extension.rental == rental
                    && extension.duration == RentDuration::OneWeek
                    && extension.method == PaymentMethod::CreditCard
            })
            .return_once(move |_, _| {
                Ok(SubmissionOutcome {
                    rental,
                    replayed: false,
                })
            });

        let mut res = TestClient::post("http://example.com/extend-duration")
            .json(&json!({ "rentalId": rental, "duration": "one_week" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: NextStepResponse = res.take_json().await?;

        assert_eq!(body.next, "/my-orders?extended=true");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_duration_returns_400() {
        let mut rentals = MockRentalsService::new();

        rentals.expect_extend_rental().never();

        let res = TestClient::post("http://example.com/extend-duration")
            .json(&json!({ "rentalId": RentalUuid::new(), "duration": "forever" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_inactive_rental_returns_409() {
        let mut rentals = MockRentalsService::new();

        rentals
            .expect_extend_rental()
            .once()
            .return_once(|_, _| Err(RentalsServiceError::RentalInactive));

        let res = TestClient::post("http://example.com/extend-duration")
            .json(&json!({
                "rentalId": RentalUuid::new(),
                "duration": "one_day",
                "paymentMethod": "bank_transfer",
            }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
