//! Extension Form Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::rentals::{
    pricing::RentDuration,
    records::{RentalOverview, RentalUuid},
};

use crate::{
    extensions::*,
    rentals::{
        errors::into_status_error,
        models::{DurationOption, offered_payment_methods, timestamp},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExtensionFormResponse {
    pub rental_id: Uuid,
    pub box_code: String,
    pub end_date: Option<String>,
    pub options: Vec<DurationOption>,
    pub payment_methods: Vec<String>,
    pub submission_key: Uuid,
}

impl From<RentalOverview> for ExtensionFormResponse {
    fn from(overview: RentalOverview) -> Self {
        Self {
            rental_id: overview.rental.uuid.into(),
            box_code: overview.box_code,
            end_date: timestamp(overview.rental.end_date),
            options: RentDuration::EXTENSION
                .into_iter()
                .filter_map(DurationOption::extension)
                .collect(),
            payment_methods: offered_payment_methods(),
            submission_key: Uuid::new_v4(),
        }
    }
}

/// Extension Form Handler
///
/// Returns an active rental with its extension options.
#[endpoint(
    tags("rentals"),
    summary = "Extension Form",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Extension form"),
        (status_code = StatusCode::NOT_FOUND, description = "Rental not found"),
        (status_code = StatusCode::CONFLICT, description = "Rental not active"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ExtensionFormResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let rental: RentalUuid = req.query_id_or_400("rentalId", "No rental selected.")?;

    let overview = state
        .app
        .rentals
        .extension_view(user.uuid, rental)
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
            .signed_in(Router::with_path("extend-duration").get(handler))
    }

    #[tokio::test]
    async fn test_extension_options_exclude_one_month() -> TestResult {
        let mut rentals = MockRentalsService::new();
        let overview = make_overview(make_rental(RentalStatus::Active, PaymentStatus::Paid));
        let uuid = overview.rental.uuid;

        rentals
            .expect_extension_view()
            .once()
            .return_once(move |_, _| Ok(overview));

        let mut res = TestClient::get(format!(
            "http://example.com/extend-duration?rentalId={uuid}"
        ))
        .send(&make_service(rentals))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ExtensionFormResponse = res.take_json().await?;
        let options: Vec<(&str, &str)> = body
            .options
            .iter()
            .map(|o| (o.code.as_str(), o.price.as_str()))
            .collect();

        assert_eq!(
            options,
            [
                ("one_day", "5.99"),
                ("three_days", "14.99"),
                ("one_week", "29.99")
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_rental_returns_409() {
        let mut rentals = MockRentalsService::new();

        rentals
            .expect_extension_view()
            .once()
            .return_once(|_, _| Err(RentalsServiceError::RentalInactive));

        let res = TestClient::get(format!(
            "http://example.com/extend-duration?rentalId={}",
            RentalUuid::new()
        ))
        .send(&make_service(rentals))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
