//! HTTP client for the hosted auth (GoTrue) service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use uuid::Uuid;

use crate::{
    auth::{
        AuthError, AuthService, AuthUser, Credentials, NewAccount, SecretToken, Session,
        SignUpOutcome,
    },
    backend::BackendConfig,
    domain::users::records::UserUuid,
};

const USER_PATH: &str = "auth/v1/user";
const TOKEN_PATH: &str = "auth/v1/token";
const SIGNUP_PATH: &str = "auth/v1/signup";
const RECOVER_PATH: &str = "auth/v1/recover";
const LOGOUT_PATH: &str = "auth/v1/logout";

/// Auth service client authenticating with the project's anon key.
#[derive(Debug, Clone)]
pub struct GoTrueClient {
    backend: BackendConfig,
    http: Client,
}

impl GoTrueClient {
    #[must_use]
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            backend,
            http: Client::new(),
        }
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.backend.anon_key)
    }

    async fn token_grant<B: Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<Session, AuthError> {
        let response = self
            .request(self.http.post(self.backend.endpoint(TOKEN_PATH)))
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await?;

        let parsed: SessionResponse = parse_json(response, grant_type).await?;

        parsed.into_session()
    }
}

#[async_trait]
impl AuthService for GoTrueClient {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .request(self.http.get(self.backend.endpoint(USER_PATH)))
            .bearer_auth(access_token)
            .send()
            .await?;

        let parsed: UserResponse = parse_json(response, "get user").await?;

        Ok(parsed.into())
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Session, AuthError> {
        self.token_grant(
            "password",
            &json!({
                "email": credentials.email,
                "password": credentials.password,
            }),
        )
        .await
    }

    async fn sign_up(&self, account: NewAccount) -> Result<SignUpOutcome, AuthError> {
        let body = json!({
            "email": account.email,
            "password": account.password,
            "data": { "full_name": account.full_name },
        });

        let response = self
            .request(self.http.post(self.backend.endpoint(SIGNUP_PATH)))
            .json(&body)
            .send()
            .await?;

        let parsed: SignUpResponse = parse_json(response, "sign up").await?;

        match parsed {
            SignUpResponse::Session(session) => {
                let session = session.into_session()?;

                Ok(SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                })
            }
            SignUpResponse::User(user) => Ok(SignUpOutcome {
                user: user.into(),
                session: None,
            }),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.token_grant("refresh_token", &json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: Option<String>,
    ) -> Result<Session, AuthError> {
        self.token_grant(
            "pkce",
            &json!({
                "auth_code": code,
                "code_verifier": code_verifier,
            }),
        )
        .await
    }

    async fn session_from_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, AuthError> {
        let user = self.get_user(access_token).await?;

        Ok(Session {
            access_token: SecretToken::new(access_token),
            refresh_token: SecretToken::new(refresh_token),
            expires_at: None,
            user,
        })
    }

    async fn send_password_recovery(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), AuthError> {
        let response = self
            .request(self.http.post(self.backend.endpoint(RECOVER_PATH)))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }))
            .send()
            .await?;

        ensure_success(response, "recover").await
    }

    async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let response = self
            .request(self.http.put(self.backend.endpoint(USER_PATH)))
            .bearer_auth(access_token)
            .json(&json!({ "password": password }))
            .send()
            .await?;

        let parsed: UserResponse = parse_json(response, "update password").await?;

        Ok(parsed.into())
    }

    async fn update_full_name(
        &self,
        access_token: &str,
        full_name: &str,
    ) -> Result<AuthUser, AuthError> {
        let response = self
            .request(self.http.put(self.backend.endpoint(USER_PATH)))
            .bearer_auth(access_token)
            .json(&json!({ "data": { "full_name": full_name } }))
            .send()
            .await?;

        let parsed: UserResponse = parse_json(response, "update user").await?;

        Ok(parsed.into())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .request(self.http.post(self.backend.endpoint(LOGOUT_PATH)))
            .bearer_auth(access_token)
            .send()
            .await?;

        ensure_success(response, "logout").await
    }
}

async fn ensure_success(response: Response, operation: &str) -> Result<(), AuthError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    let text = response.text().await.unwrap_or_default();

    Err(error_from_body(status, &text, operation))
}

async fn parse_json<T: DeserializeOwned>(
    response: Response,
    operation: &str,
) -> Result<T, AuthError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();

        return Err(error_from_body(status, &text, operation));
    }

    Ok(response.json().await?)
}

fn error_from_body(status: reqwest::StatusCode, text: &str, operation: &str) -> AuthError {
    if status.is_client_error() {
        let message = serde_json::from_str::<ErrorResponse>(text)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| text.to_string());

        return AuthError::Rejected {
            status: status.as_u16(),
            message,
        };
    }

    AuthError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {text}"
    ))
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

impl From<UserResponse> for AuthUser {
    fn from(value: UserResponse) -> Self {
        Self {
            uuid: UserUuid::from_uuid(value.id),
            email: value.email.filter(|email| !email.is_empty()),
            full_name: value.user_metadata.full_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: UserResponse,
}

impl SessionResponse {
    fn into_session(self) -> Result<Session, AuthError> {
        let expires_at = match (self.expires_at, self.expires_in) {
            (Some(at), _) => Some(Timestamp::from_second(at).map_err(|e| {
                AuthError::UnexpectedResponse(format!("invalid expires_at {at}: {e}"))
            })?),
            (None, Some(seconds)) => Timestamp::now()
                .checked_add(SignedDuration::from_secs(seconds))
                .ok(),
            (None, None) => None,
        };

        Ok(Session {
            access_token: SecretToken::new(self.access_token),
            refresh_token: SecretToken::new(self.refresh_token),
            expires_at,
            user: self.user.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(SessionResponse),
    User(UserResponse),
}
