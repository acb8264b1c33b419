//! Users Data

use crate::{auth::AuthUser, domain::users::records::UserUuid};

/// Fallback display name when neither metadata nor e-mail yield one.
pub const DEFAULT_FULL_NAME: &str = "User";

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub full_name: String,
    pub email: Option<String>,
}

impl From<&AuthUser> for NewUser {
    fn from(user: &AuthUser) -> Self {
        let full_name = user
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| {
                user.email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
            })
            .unwrap_or(DEFAULT_FULL_NAME)
            .to_string();

        Self {
            uuid: user.uuid,
            full_name,
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(email: Option<&str>, full_name: Option<&str>) -> AuthUser {
        AuthUser {
            uuid: UserUuid::new(),
            email: email.map(str::to_string),
            full_name: full_name.map(str::to_string),
        }
    }

    #[test]
    fn metadata_name_wins() {
        let user = NewUser::from(&auth_user(Some("ani@example.com"), Some("Ani Wijaya")));

        assert_eq!(user.full_name, "Ani Wijaya");
    }

    #[test]
    fn falls_back_to_email_local_part() {
        let user = NewUser::from(&auth_user(Some("budi@example.com"), Some("  ")));

        assert_eq!(user.full_name, "budi");
    }

    #[test]
    fn falls_back_to_default_name() {
        let user = NewUser::from(&auth_user(None, None));

        assert_eq!(user.full_name, DEFAULT_FULL_NAME);
    }
}
