//! Create Box Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use crate::{
    boxes::{errors::into_status_error, models::DepositBoxResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBoxRequest {
    pub box_code: String,
}

/// Create Box Handler
///
/// Adds an available deposit box.
#[endpoint(
    tags("admin"),
    summary = "Create Deposit Box",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Box created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty box code"),
        (status_code = StatusCode::CONFLICT, description = "Duplicate box code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBoxRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DepositBoxResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.user_or_401()?;

    let created = state
        .app
        .boxes
        .create_box(Some(admin.uuid), &json.into_inner().box_code)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brankas_app::domain::boxes::{BoxesServiceError, MockBoxesService, records::BoxStatus};

    use crate::{
        boxes::handlers::tests::make_box,
        test_helpers::{StateBuilder, TEST_USER_UUID},
    };

    use super::*;

    fn make_service(boxes: MockBoxesService) -> Service {
        StateBuilder::new()
            .boxes(boxes)
            .signed_in(Router::with_path("admin/boxes").post(handler))
    }

    #[tokio::test]
    async fn test_create_returns_201() -> TestResult {
        let mut boxes = MockBoxesService::new();

        boxes
            .expect_create_box()
            .once()
            .withf(|admin, code| *admin == Some(TEST_USER_UUID) && code == "B-07")
            .return_once(|_, _| Ok(make_box("B-07", BoxStatus::Available)));

        let mut res = TestClient::post("http://example.com/admin/boxes")
            .json(&json!({ "boxCode": "B-07" }))
            .send(&make_service(boxes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: DepositBoxResponse = res.take_json().await?;

        assert_eq!(body.status, "available");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_code_returns_409() {
        let mut boxes = MockBoxesService::new();

        boxes
            .expect_create_box()
            .once()
            .return_once(|_, _| Err(BoxesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/boxes")
            .json(&json!({ "boxCode": "A-01" }))
            .send(&make_service(boxes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
