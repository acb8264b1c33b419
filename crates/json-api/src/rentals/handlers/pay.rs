//! Pay Rental Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use brankas_app::domain::rentals::{data::PaymentSubmission, records::PaymentMethod};

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
pub(crate) struct PayRequest {
    pub rental_id: Uuid,

    /// One of `credit_card`, `bank_transfer`, `digital_wallet`, `cash`
    pub payment_method: String,

    /// Ignored when an `Idempotency-Key` header is present
    pub submission_key: Option<Uuid>,
}

/// Pay Rental Handler
///
/// Settles a rental. Repeating a submission key replays the first success.
#[endpoint(
    tags("rentals"),
    summary = "Pay Rental",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payment"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::CONFLICT, description = "Already paid"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Payment processing failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PayRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<NextStepResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let request = json.into_inner();

    let method = request
        .payment_method
        .parse::<PaymentMethod>()
        .or_400("Please choose a valid payment method.")?;

    let payment = PaymentSubmission {
        rental: request.rental_id.into(),
        method,
        submission_key: submission_key(req.headers(), request.submission_key)?,
    };

    let outcome = state
        .app
        .rentals
        .pay_rental(user.uuid, payment)
        .await
        .map_err(into_submission_error("Payment processing failed:"))?;

    Ok(Json(NextStepResponse {
        replayed: Some(outcome.replayed),
        ..NextStepResponse::new(
            outcome.rental,
            format!("/set-pin?rentalId={}", outcome.rental),
        )
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

    use crate::{
        rentals::models::IDEMPOTENCY_KEY_HEADER,
        test_helpers::{StateBuilder, TEST_USER_UUID},
    };

    use super::*;

    fn make_service(rentals: MockRentalsService) -> Service {
        StateBuilder::new()
            .rentals(rentals)
            .signed_in(Router::with_path("payment").post(handler))
    }

    #[tokio::test]
    async fn test_pay_uses_header_key_and_links_to_pin() -> TestResult {
        let mut rentals = MockRentalsService::new();
        let rental = RentalUuid::new();
        let key = Uuid::new_v4();

        rentals
            .expect_pay_rental()
            .once()
            .withf(move |user, payment| {
                *user == TEST_USER_UUID
                    && payment.rental == rental
                    && payment.method == PaymentMethod::BankTransfer
                    && payment.submission_key == key
            })
            .return_once(move |_, _| {
                Ok(SubmissionOutcome {
                    rental,
                    replayed: false,
                })
            });

        let mut res = TestClient::post("http://example.com/payment")
            .add_header(IDEMPOTENCY_KEY_HEADER, key.to_string(), true)
            .json(&json!({ "rentalId": rental, "paymentMethod": "bank_transfer" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: NextStepResponse = res.take_json().await?;

        assert_eq!(body.next, format!("/set-pin?rentalId={rental}"));
        assert_eq!(body.replayed, Some(false));

        Ok(())
    }

    #[tokio::test]
    async fn test_replayed_submission_reports_replay() -> TestResult {
        let mut rentals = MockRentalsService::new();
        let rental = RentalUuid::new();
        let key = Uuid::new_v4();

        rentals
            .expect_pay_rental()
            .once()
            .withf(move |_, payment| payment.submission_key == key)
            .return_once(move |_, _| {
                Ok(SubmissionOutcome {
                    rental,
                    replayed: true,
                })
            });

        let mut res = TestClient::post("http://example.com/payment")
            .json(&json!({
                "rentalId": rental,
                "paymentMethod": "credit_card",
                "submissionKey": key,
            }))
            .send(&make_service(rentals))
            .await;

        let body: NextStepResponse = res.take_json().await?;

        assert_eq!(body.replayed, Some(true));

        Ok(())
    }

    #[tokio::test]
    async fn test_procedure_error_is_surfaced() -> TestResult {
        let mut rentals = MockRentalsService::new();

        rentals.expect_pay_rental().once().return_once(|_, _| {
            Err(RentalsServiceError::Procedure(
                "Box is no longer pending".to_string(),
            ))
        });

        let mut res = TestClient::post("http://example.com/payment")
            .json(&json!({ "rentalId": RentalUuid::new(), "paymentMethod": "digital_wallet" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let body = res.take_string().await?;

        assert!(
            body.contains("Payment processing failed: Box is no longer pending"),
            "{body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_method_returns_400() {
        let mut rentals = MockRentalsService::new();

        rentals.expect_pay_rental().never();

        let res = TestClient::post("http://example.com/payment")
            .json(&json!({ "rentalId": RentalUuid::new(), "paymentMethod": "barter" }))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
