//! Admin Rentals Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::{errors::into_status_error, models::RentalsOverviewResponse},
    extensions::*,
    state::State,
};

/// Admin Rentals Handler
///
/// All boxes and all rentals.
#[endpoint(
    tags("admin"),
    summary = "Admin Rentals",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Boxes and rentals"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<RentalsOverviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    let overview = state
        .app
        .admin
        .rentals(admin.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(overview.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use brankas_app::domain::{
        admin::{
            MockAdminService,
            records::{AdminRentalRecord, RentalsOverview},
        },
        boxes::records::BoxStatus,
        rentals::records::RentalUuid,
    };

    use crate::{boxes::handlers::tests::make_box, test_helpers::StateBuilder};

    use super::*;

    #[tokio::test]
    async fn test_rentals_overview() -> TestResult {
        let mut admin = MockAdminService::new();

        admin.expect_rentals().once().return_once(|_| {
            Ok(RentalsOverview {
                boxes: vec![make_box("A-01", BoxStatus::Rented)],
                rentals: vec![AdminRentalRecord {
                    rental_uuid: RentalUuid::new(),
                    user_email: Some("customer@example.com".to_string()),
                    box_code: Some("A-01".to_string()),
                    status: Some("active".to_string()),
                    start_date: None,
                    end_date: None,
                    rent_duration: Some("one_week".to_string()),
                }],
            })
        });

        let service = StateBuilder::new()
            .admin(admin)
            .signed_in(Router::with_path("admin/rentals").get(handler));

        let mut res = TestClient::get("http://example.com/admin/rentals")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: RentalsOverviewResponse = res.take_json().await?;

        assert_eq!(body.boxes.len(), 1);
        assert_eq!(
            body.rentals.first().and_then(|r| r.status.as_deref()),
            Some("active")
        );

        Ok(())
    }
}
