//! Auth Callback Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{error, info};

use brankas_app::auth::{AuthEvent, Session, guard::HOME_PATH};

use crate::{extensions::*, state::State};

/// PKCE verifier left behind by a client-initiated OAuth flow.
pub(crate) const CODE_VERIFIER_COOKIE: &str = "brankas-code-verifier";

const AUTH_ERROR_PATH: &str = "/login?error=auth_error";
const DATABASE_ERROR_PATH: &str = "/login?error=Database%20error";
const RECOVERY_PATH: &str = "/update-password";

/// `next` when it is a same-site relative path, otherwise home.
pub(crate) fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => HOME_PATH,
    }
}

/// Auth Callback Handler
///
/// Completes an OAuth, magic-link or password-recovery redirect and sends the
/// browser on to the right page.
#[endpoint(
    tags("auth"),
    summary = "Auth Callback",
    responses(
        (status_code = StatusCode::FOUND, description = "Redirect to the next page"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let holder = depot.session_holder_or_500()?;
    let auth = &state.app.auth;

    let exchanged = if let Some(code) = req.query_text("code") {
        let verifier = req
            .cookie(CODE_VERIFIER_COOKIE)
            .map(|cookie| cookie.value().to_owned());

        auth.exchange_code(&code, verifier).await
    } else if let (Some(access), Some(refresh)) =
        (req.query_text("access_token"), req.query_text("refresh_token"))
    {
        auth.session_from_tokens(&access, &refresh).await
    } else {
        return res.redirect_found("/login");
    };

    let session: Session = match exchanged {
        Ok(session) => session,
        Err(source) => {
            info!("auth callback rejected: {source}");

            return res.redirect_found(AUTH_ERROR_PATH);
        }
    };

    if let Err(source) = state.app.users.ensure_user(&session.user).await {
        error!("failed to ensure user row after callback: {source}");

        return res.redirect_found(DATABASE_ERROR_PATH);
    }

    holder.apply(AuthEvent::SignedIn(session));

    if req.query_text("type").as_deref() == Some("recovery") {
        return res.redirect_found(RECOVERY_PATH);
    }

    let next = req.query_text("next");

    res.redirect_found(safe_next(next.as_deref()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::LOCATION,
        test::{ResponseExt, TestClient},
    };

    use brankas_app::{
        auth::{AuthError, MockAuthService},
        domain::users::{MockUsersService, UsersServiceError},
    };

    use crate::{
        session::cookies::ACCESS_TOKEN_COOKIE,
        test_helpers::{StateBuilder, test_session, written_cookie},
    };

    use super::*;

    fn make_service(auth: MockAuthService, users: MockUsersService) -> Service {
        StateBuilder::new()
            .auth(auth)
            .users(users)
            .with_session_middleware(Router::with_path("auth/callback").get(handler))
    }

    fn location(res: &Response) -> Option<String> {
        res.headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    fn ensuring_users() -> MockUsersService {
        let mut users = MockUsersService::new();

        users.expect_ensure_user().once().return_once(|_| Ok(true));

        users
    }

    #[test]
    fn test_safe_next_only_allows_relative_paths() {
        assert_eq!(safe_next(Some("/my-orders")), "/my-orders");
        assert_eq!(safe_next(Some("//evil.example.com")), "/");
        assert_eq!(safe_next(Some("https://evil.example.com")), "/");
        assert_eq!(safe_next(Some("/\\evil.example.com")), "/");
        assert_eq!(safe_next(None), "/");
    }

    #[tokio::test]
    async fn test_code_exchange_redirects_to_next() {
        let mut auth = MockAuthService::new();

        auth.expect_exchange_code()
            .once()
            .withf(|code, verifier| code == "abc" && verifier.is_none())
            .return_once(|_, _| Ok(test_session()));

        let res = TestClient::get("http://example.com/auth/callback?code=abc&next=/my-orders")
            .send(&make_service(auth, ensuring_users()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));
        assert_eq!(location(&res).as_deref(), Some("/my-orders"));
        assert!(written_cookie(&res, ACCESS_TOKEN_COOKIE).is_some(), "session cookie");
    }

    #[tokio::test]
    async fn test_recovery_goes_to_update_password() {
        let mut auth = MockAuthService::new();

        auth.expect_exchange_code()
            .once()
            .return_once(|_, _| Ok(test_session()));

        let res = TestClient::get("http://example.com/auth/callback?code=abc&type=recovery")
            .send(&make_service(auth, ensuring_users()))
            .await;

        assert_eq!(location(&res).as_deref(), Some("/update-password"));
    }

    #[tokio::test]
    async fn test_token_pair_is_validated() {
        let mut auth = MockAuthService::new();

        auth.expect_session_from_tokens()
            .once()
            .withf(|access, refresh| access == "at" && refresh == "rt")
            .return_once(|_, _| Ok(test_session()));

        let res = TestClient::get(
            "http://example.com/auth/callback?access_token=at&refresh_token=rt&next=//evil.example.com",
        )
        .send(&make_service(auth, ensuring_users()))
        .await;

        assert_eq!(location(&res).as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_failed_exchange_redirects_with_auth_error() {
        let mut auth = MockAuthService::new();
        let mut users = MockUsersService::new();

        auth.expect_exchange_code().once().return_once(|_, _| {
            Err(AuthError::Rejected {
                status: 400,
                message: "invalid grant".to_string(),
            })
        });
        users.expect_ensure_user().never();

        let res = TestClient::get("http://example.com/auth/callback?code=expired")
            .send(&make_service(auth, users))
            .await;

        assert_eq!(location(&res).as_deref(), Some("/login?error=auth_error"));
        assert!(written_cookie(&res, ACCESS_TOKEN_COOKIE).is_none(), "no session cookie");
    }

    #[tokio::test]
    async fn test_user_row_failure_redirects_with_database_error() {
        let mut auth = MockAuthService::new();
        let mut users = MockUsersService::new();

        auth.expect_exchange_code()
            .once()
            .return_once(|_, _| Ok(test_session()));
        users
            .expect_ensure_user()
            .once()
            .return_once(|_| Err(UsersServiceError::MissingRequiredData));

        let res = TestClient::get("http://example.com/auth/callback?code=abc")
            .send(&make_service(auth, users))
            .await;

        assert_eq!(location(&res).as_deref(), Some("/login?error=Database%20error"));
    }

    #[tokio::test]
    async fn test_without_parameters_redirects_to_login() {
        let res = TestClient::get("http://example.com/auth/callback")
            .send(&make_service(MockAuthService::new(), MockUsersService::new()))
            .await;

        assert_eq!(location(&res).as_deref(), Some("/login"));
    }
}
