//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::users::{
    data::NewUser,
    records::{UserRecord, UserUuid},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const ENSURE_USER_SQL: &str = include_str!("sql/ensure_user.sql");
const IS_ADMIN_SQL: &str = include_str!("sql/is_admin.sql");
const UPDATE_FULL_NAME_SQL: &str = include_str!("sql/update_full_name.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert the user row unless one already exists. Returns whether a row was created.
    pub(crate) async fn ensure_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(ENSURE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.full_name)
            .bind(user.email.as_deref())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(crate) async fn is_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<bool, sqlx::Error> {
        let is_admin: Option<Option<bool>> = query_scalar(IS_ADMIN_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(is_admin.flatten().unwrap_or(false))
    }

    pub(crate) async fn update_full_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        full_name: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_FULL_NAME_SQL)
            .bind(user.into_uuid())
            .bind(full_name)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("id")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            is_admin: row.try_get::<Option<bool>, _>("is_admin")?.unwrap_or(false),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
