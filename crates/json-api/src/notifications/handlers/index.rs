//! List Notifications Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::notifications::records::NotificationRecord;

use crate::{extensions::*, notifications::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotificationResponse {
    pub id: Uuid,
    pub message: String,

    /// Page the notification points at
    pub link_url: Option<String>,

    pub is_read: bool,
    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(record: NotificationRecord) -> Self {
        Self {
            id: record.uuid.into(),
            message: record.message,
            link_url: record.link_url,
            is_read: record.is_read,
            created_at: record.created_at.to_string(),
        }
    }
}

/// List Notifications Handler
///
/// Returns the current user's notifications, newest first.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Notifications"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<NotificationResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let notifications = state
        .app
        .notifications
        .list_notifications(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use brankas_app::domain::notifications::{
        MockNotificationsService, records::NotificationUuid,
    };

    use crate::test_helpers::{StateBuilder, TEST_USER_UUID};

    use super::*;

    #[tokio::test]
    async fn test_lists_own_notifications() -> TestResult {
        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_list_notifications()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| {
                Ok(vec![NotificationRecord {
                    uuid: NotificationUuid::new(),
                    user_uuid: TEST_USER_UUID,
                    message: "Your rental ends tomorrow.".to_string(),
                    link_url: Some("/my-orders".to_string()),
                    is_read: false,
                    created_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let service = StateBuilder::new()
            .notifications(notifications)
            .signed_in(Router::with_path("notifications").get(handler));

        let mut res = TestClient::get("http://example.com/notifications")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<NotificationResponse> = res.take_json().await?;

        assert_eq!(body.len(), 1);
        assert_eq!(
            body.first().and_then(|n| n.link_url.as_deref()),
            Some("/my-orders")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_unauthorized() {
        let mut notifications = MockNotificationsService::new();

        notifications.expect_list_notifications().never();

        let service = StateBuilder::new()
            .notifications(notifications)
            .anonymous(Router::with_path("notifications").get(handler));

        let res = TestClient::get("http://example.com/notifications")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
