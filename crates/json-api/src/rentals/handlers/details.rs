//! Rental Details Handler

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
pub(crate) struct RentalDetailsResponse {
    pub rental_id: Uuid,
    pub status: String,
    pub masked_pin: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub items_type: String,
    pub box_code: String,
    pub total_paid: String,
}

impl From<RentalOverview> for RentalDetailsResponse {
    fn from(overview: RentalOverview) -> Self {
        Self {
            masked_pin: masked_pin(&overview),
            rental_id: overview.rental.uuid.into(),
            status: overview.rental.status.to_string(),
            start_date: timestamp(overview.rental.start_date),
            end_date: timestamp(overview.rental.end_date),
            items_type: overview.rental.items_type,
            box_code: overview.box_code,
            total_paid: money(overview.total_paid),
        }
    }
}

/// Rental Details Handler
#[endpoint(
    tags("rentals"),
    summary = "Rental Details",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Rental details"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<RentalDetailsResponse>, StatusError> {
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

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use brankas_app::domain::rentals::{
        MockRentalsService, RentalsServiceError,
        records::{PaymentStatus, RentalStatus},
    };

    use crate::{
        rentals::handlers::tests::{make_overview, make_rental},
        test_helpers::StateBuilder,
    };

    use super::*;

    fn make_service(rentals: MockRentalsService) -> Service {
        StateBuilder::new()
            .rentals(rentals)
            .signed_in(Router::with_path("see-details").get(handler))
    }

    #[tokio::test]
    async fn test_details_without_pin() -> TestResult {
        let mut rentals = MockRentalsService::new();
        let overview = make_overview(make_rental(RentalStatus::Pending, PaymentStatus::Paid));
        let uuid = overview.rental.uuid;

        rentals
            .expect_rental_overview()
            .once()
            .return_once(move |_, _| Ok(overview));

        let mut res = TestClient::get(format!("http://example.com/see-details?rentalId={uuid}"))
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: RentalDetailsResponse = res.take_json().await?;

        assert!(body.masked_pin.is_none());
        assert_eq!(body.total_paid, "14.99");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_rental_id_returns_400() {
        let mut rentals = MockRentalsService::new();

        rentals.expect_rental_overview().never();

        let res = TestClient::get("http://example.com/see-details?rentalId=42")
            .send(&make_service(rentals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_foreign_rental_returns_404() {
        let mut rentals = MockRentalsService::new();

        rentals
            .expect_rental_overview()
            .once()
            .return_once(|_, _| Err(RentalsServiceError::RentalNotFound));

        let res = TestClient::get(format!(
            "http://example.com/see-details?rentalId={}",
            RentalUuid::new()
        ))
        .send(&make_service(rentals))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
