//! End Rental Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{admin::errors::into_status_error, extensions::*, state::State};

/// End Rental Handler
///
/// Ends a rental early and frees its box.
#[endpoint(
    tags("admin"),
    summary = "End Rental",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Rental ended"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    rental: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    state
        .app
        .admin
        .end_rental(admin.uuid, rental.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use brankas_app::domain::{
        admin::{AdminServiceError, MockAdminService},
        rentals::records::RentalUuid,
    };

    use crate::test_helpers::StateBuilder;

    use super::*;

    fn make_service(admin: MockAdminService) -> Service {
        StateBuilder::new()
            .admin(admin)
            .signed_in(Router::with_path("admin/rentals/{rental}/end").post(handler))
    }

    #[tokio::test]
    async fn test_end_rental_forwards_id() {
        let mut admin = MockAdminService::new();
        let rental = RentalUuid::new();

        admin
            .expect_end_rental()
            .once()
            .withf(move |_, r| *r == rental)
            .return_once(|_, _| Ok(()));

        let res = TestClient::post(format!("http://example.com/admin/rentals/{rental}/end"))
            .send(&make_service(admin))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_procedure_error_returns_500() {
        let mut admin = MockAdminService::new();

        admin.expect_end_rental().once().return_once(|_, _| {
            Err(AdminServiceError::Procedure("Rental is not active".to_string()))
        });

        let res = TestClient::post(format!(
            "http://example.com/admin/rentals/{}/end",
            RentalUuid::new()
        ))
        .send(&make_service(admin))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
