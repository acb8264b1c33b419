//! Database connection management

use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction, query};

use crate::domain::users::records::UserUuid;

/// SQL used to expose the caller's identity to row-level security policies.
pub const SET_USER_CONTEXT_SQL: &str = "SELECT set_config('request.jwt.claims', $1, true)";

/// Embedded migrations for the tables this service owns.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction acting on behalf of `user`.
    ///
    /// The claims mirror what the hosted auth gateway would forward, so policies
    /// and procedures reading `auth.uid()` see the same caller.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the claims fails.
    pub async fn begin_user_transaction(
        &self,
        user: UserUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let claims = json!({
            "sub": user.to_string(),
            "role": "authenticated",
        });

        query(SET_USER_CONTEXT_SQL)
            .bind(claims.to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Begin a transaction without a caller identity.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction on behalf of `actor`, or without an identity for operator tools.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the claims fails.
    pub async fn begin_transaction_as(
        &self,
        actor: Option<UserUuid>,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        match actor {
            Some(user) => self.begin_user_transaction(user).await,
            None => self.begin_transaction().await,
        }
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
