//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::AuthUser,
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{Profile, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn ensure_user(&self, user: &AuthUser) -> Result<bool, UsersServiceError> {
        let mut tx = self.db.begin_user_transaction(user.uuid).await?;

        let created = self
            .repository
            .ensure_user(&mut tx, &NewUser::from(user))
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn is_admin(&self, user: UserUuid) -> Result<bool, UsersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let is_admin = self.repository.is_admin(&mut tx, user).await?;

        tx.commit().await?;

        Ok(is_admin)
    }

    async fn get_profile(&self, user: &AuthUser) -> Result<Profile, UsersServiceError> {
        let mut tx = self.db.begin_user_transaction(user.uuid).await?;

        let record = match self.repository.get_user(&mut tx, user.uuid).await {
            Ok(record) => Some(record),
            Err(sqlx::Error::RowNotFound) => None,
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        let full_name = record
            .and_then(|record| record.full_name)
            .unwrap_or_else(|| NewUser::from(user).full_name);

        Ok(Profile {
            full_name,
            email: user.email.clone(),
        })
    }

    async fn update_full_name(
        &self,
        user: UserUuid,
        full_name: &str,
    ) -> Result<String, UsersServiceError> {
        let full_name = full_name.trim();

        if full_name.is_empty() {
            return Err(UsersServiceError::EmptyFullName);
        }

        let mut tx = self.db.begin_user_transaction(user).await?;

        let rows_affected = self
            .repository
            .update_full_name(&mut tx, user, full_name)
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(full_name.to_string())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates the user row for an authenticated user when it is missing.
    ///
    /// Returns `true` when a row was inserted.
    async fn ensure_user(&self, user: &AuthUser) -> Result<bool, UsersServiceError>;

    /// Whether the user carries the admin flag. A missing row is not an admin.
    async fn is_admin(&self, user: UserUuid) -> Result<bool, UsersServiceError>;

    /// Profile shown on the profile page.
    async fn get_profile(&self, user: &AuthUser) -> Result<Profile, UsersServiceError>;

    /// Replaces the stored full name, returning the trimmed value.
    async fn update_full_name(
        &self,
        user: UserUuid,
        full_name: &str,
    ) -> Result<String, UsersServiceError>;
}
