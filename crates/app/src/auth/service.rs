//! Auth service.

use async_trait::async_trait;
use mockall::automock;

use crate::auth::{AuthError, AuthUser, Credentials, NewAccount, Session, SignUpOutcome};

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolves the user behind an access token.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;

    /// Signs in with e-mail and password.
    async fn sign_in(&self, credentials: Credentials) -> Result<Session, AuthError>;

    /// Registers a new account with `full_name` metadata.
    async fn sign_up(&self, account: NewAccount) -> Result<SignUpOutcome, AuthError>;

    /// Exchanges a refresh token for a new session.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError>;

    /// Exchanges an OAuth or magic-link `code` for a session.
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: Option<String>,
    ) -> Result<Session, AuthError>;

    /// Validates a token pair delivered by an implicit-flow redirect.
    async fn session_from_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, AuthError>;

    /// Sends a password-recovery e-mail linking back to `redirect_to`.
    async fn send_password_recovery(&self, email: &str, redirect_to: &str)
    -> Result<(), AuthError>;

    /// Replaces the password of the token's user.
    async fn update_password(&self, access_token: &str, password: &str)
    -> Result<AuthUser, AuthError>;

    /// Replaces the `full_name` metadata of the token's user.
    async fn update_full_name(
        &self,
        access_token: &str,
        full_name: &str,
    ) -> Result<AuthUser, AuthError>;

    /// Revokes the session behind the token.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
