//! Auth data models.

use jiff::Timestamp;

use crate::{auth::SecretToken, domain::users::records::UserUuid};

/// The user behind a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uuid: UserUuid,
    pub email: Option<String>,

    /// `full_name` from the auth user metadata.
    pub full_name: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: SecretToken,
    pub refresh_token: SecretToken,
    pub expires_at: Option<Timestamp>,
    pub user: AuthUser,
}

/// E-mail and password sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Result of a sign-up. `session` is absent while e-mail confirmation is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<Session>,
}
