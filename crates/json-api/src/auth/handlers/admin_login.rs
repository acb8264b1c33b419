//! Admin Sign In Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::{error, warn};

use brankas_app::auth::AuthEvent;

use crate::{
    auth::{
        errors::into_status_error,
        models::{CredentialsRequest, SignedInResponse},
    },
    extensions::*,
    state::State,
};

const ADMIN_HOME_PATH: &str = "/admin/dashboard";

/// Admin Sign In Handler
///
/// Signs in and requires the admin flag. A non-admin is signed out again.
#[endpoint(
    tags("auth", "admin"),
    summary = "Admin Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in as admin"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid credentials"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
) -> Result<Json<SignedInResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let holder = depot.session_holder_or_500()?;

    let session = state
        .app
        .auth
        .sign_in(json.into_inner().into_credentials()?)
        .await
        .map_err(into_status_error)?;

    let is_admin = state
        .app
        .users
        .is_admin(session.user.uuid)
        .await
        .map_err(|source| {
            error!("failed to verify admin role: {source}");

            StatusError::internal_server_error().brief("Could not verify user role.")
        })?;

    if !is_admin {
        if let Err(source) = state.app.auth.sign_out(session.access_token.expose()).await {
            warn!("failed to revoke non-admin session: {source}");
        }

        return Err(StatusError::forbidden()
            .brief("You do not have permission to access the admin panel."));
    }

    let response = SignedInResponse::new(&session.user, ADMIN_HOME_PATH);

    holder.apply(AuthEvent::SignedIn(session));

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brankas_app::{auth::MockAuthService, domain::users::MockUsersService};

    use crate::{
        session::cookies::ACCESS_TOKEN_COOKIE,
        test_helpers::{StateBuilder, TEST_USER_UUID, test_session, written_cookie},
    };

    use super::*;

    fn make_service(auth: MockAuthService, users: MockUsersService) -> Service {
        StateBuilder::new()
            .auth(auth)
            .users(users)
            .with_session_middleware(Router::with_path("admin/login").post(handler))
    }

    fn credentials() -> serde_json::Value {
        json!({ "email": "admin@example.com", "password": "secret" })
    }

    #[tokio::test]
    async fn test_admin_login_goes_to_dashboard() -> TestResult {
        let mut auth = MockAuthService::new();
        let mut users = MockUsersService::new();

        auth.expect_sign_in()
            .once()
            .return_once(|_| Ok(test_session()));
        auth.expect_sign_out().never();
        users
            .expect_is_admin()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(true));

        let mut res = TestClient::post("http://example.com/admin/login")
            .json(&credentials())
            .send(&make_service(auth, users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(written_cookie(&res, ACCESS_TOKEN_COOKIE).is_some(), "session cookie");

        let body: SignedInResponse = res.take_json().await?;

        assert_eq!(body.next, "/admin/dashboard");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_is_signed_out_and_forbidden() {
        let mut auth = MockAuthService::new();
        let mut users = MockUsersService::new();

        auth.expect_sign_in()
            .once()
            .return_once(|_| Ok(test_session()));
        auth.expect_sign_out()
            .once()
            .withf(|token| token == "access-token")
            .return_once(|_| Ok(()));
        users.expect_is_admin().once().return_once(|_| Ok(false));

        let res = TestClient::post("http://example.com/admin/login")
            .json(&credentials())
            .send(&make_service(auth, users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert!(written_cookie(&res, ACCESS_TOKEN_COOKIE).is_none(), "no session cookie");
    }
}
