//! Update Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use brankas_app::auth::AuthEvent;

use crate::{
    auth::errors::into_status_error as into_auth_status_error,
    extensions::*,
    profile::{
        errors::into_status_error,
        models::{ProfileResponse, UpdateProfileRequest},
    },
    state::State,
};

/// Update Profile Handler
///
/// Renames the user in the users table and in the auth metadata.
#[endpoint(
    tags("profile"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty full name"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let holder = depot.session_holder_or_500()?;
    let session = depot.session_or_401()?;

    let full_name = state
        .app
        .users
        .update_full_name(session.user.uuid, &json.into_inner().full_name)
        .await
        .map_err(into_status_error)?;

    let user = state
        .app
        .auth
        .update_full_name(session.access_token.expose(), &full_name)
        .await
        .map_err(into_auth_status_error)?;

    let response = ProfileResponse {
        full_name,
        email: user.email.clone(),
    };

    holder.apply(AuthEvent::UserUpdated(user));

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brankas_app::{
        auth::{AuthUser, MockAuthService},
        domain::users::{MockUsersService, UsersServiceError},
    };

    use crate::test_helpers::{StateBuilder, TEST_USER_UUID, test_user};

    use super::*;

    #[tokio::test]
    async fn test_update_renames_in_both_places() -> TestResult {
        let mut users = MockUsersService::new();
        let mut auth = MockAuthService::new();

        users
            .expect_update_full_name()
            .once()
            .withf(|user, name| *user == TEST_USER_UUID && name == " Siti Aminah ")
            .return_once(|_, _| Ok("Siti Aminah".to_string()));
        auth.expect_update_full_name()
            .once()
            .withf(|token, name| token == "access-token" && name == "Siti Aminah")
            .return_once(|_, _| {
                Ok(AuthUser {
                    full_name: Some("Siti Aminah".to_string()),
                    ..test_user()
                })
            });

        let service = StateBuilder::new()
            .users(users)
            .auth(auth)
            .signed_in(Router::with_path("my-profile").put(handler));

        let mut res = TestClient::put("http://example.com/my-profile")
            .json(&json!({ "fullName": " Siti Aminah " }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProfileResponse = res.take_json().await?;

        assert_eq!(body.full_name, "Siti Aminah");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() {
        let mut users = MockUsersService::new();
        let mut auth = MockAuthService::new();

        users
            .expect_update_full_name()
            .once()
            .return_once(|_, _| Err(UsersServiceError::EmptyFullName));
        auth.expect_update_full_name().never();

        let service = StateBuilder::new()
            .users(users)
            .auth(auth)
            .signed_in(Router::with_path("my-profile").put(handler));

        let res = TestClient::put("http://example.com/my-profile")
            .json(&json!({ "fullName": "   " }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
