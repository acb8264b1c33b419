//! Sign In Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use brankas_app::auth::{AuthEvent, Credentials, guard::HOME_PATH};

use crate::{
    auth::{
        errors::into_status_error,
        models::{CredentialsRequest, SignedInResponse},
    },
    extensions::*,
    state::State,
};

impl CredentialsRequest {
    /// Trimmed credentials, or a bad request when either part is blank.
    pub(crate) fn into_credentials(self) -> Result<Credentials, StatusError> {
        let email = self.email.trim().to_string();

        if email.is_empty() || self.password.is_empty() {
            return Err(StatusError::bad_request().brief("Email and password are required."));
        }

        Ok(Credentials {
            email,
            password: self.password,
        })
    }
}

/// Sign In Handler
///
/// Signs in with e-mail and password.
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid credentials"),
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

    let response = SignedInResponse::new(&session.user, HOME_PATH);

    holder.apply(AuthEvent::SignedIn(session));

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brankas_app::auth::{AuthError, MockAuthService};

    use crate::{
        session::cookies::ACCESS_TOKEN_COOKIE,
        test_helpers::{StateBuilder, test_session, written_cookie},
    };

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        StateBuilder::new()
            .auth(auth)
            .with_session_middleware(Router::with_path("login").post(handler))
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_in()
            .once()
            .withf(|credentials| {
                credentials.email == "customer@example.com" && credentials.password == "secret"
            })
            .return_once(|_| Ok(test_session()));

        let mut res = TestClient::post("http://example.com/login")
            .json(&json!({ "email": " customer@example.com ", "password": "secret" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            written_cookie(&res, ACCESS_TOKEN_COOKIE),
            Some("access-token".to_string())
        );

        let body: SignedInResponse = res.take_json().await?;

        assert_eq!(body.next, "/");
        assert_eq!(body.email.as_deref(), Some("customer@example.com"));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_rejected_returns_400_without_cookie() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_in().once().return_once(|_| {
            Err(AuthError::Rejected {
                status: 400,
                message: "Invalid login credentials".to_string(),
            })
        });

        let res = TestClient::post("http://example.com/login")
            .json(&json!({ "email": "customer@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(written_cookie(&res, ACCESS_TOKEN_COOKIE).is_none(), "no session cookie");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_blank_email_skips_auth_service() {
        let mut auth = MockAuthService::new();

        auth.expect_sign_in().never();

        let res = TestClient::post("http://example.com/login")
            .json(&json!({ "email": "  ", "password": "secret" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
