//! Deposit Boxes Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::boxes::records::{BoxStatus, BoxUuid, DepositBoxRecord};

const LIST_BOXES_SQL: &str = include_str!("sql/list_boxes.sql");
const GET_BOX_SQL: &str = include_str!("sql/get_box.sql");
const LOCK_BOX_SQL: &str = include_str!("sql/lock_box.sql");
const CREATE_BOX_SQL: &str = include_str!("sql/create_box.sql");
const UPDATE_BOX_STATUS_SQL: &str = include_str!("sql/update_box_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBoxesRepository;

impl PgBoxesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_boxes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<DepositBoxRecord>, sqlx::Error> {
        query_as::<Postgres, DepositBoxRecord>(LIST_BOXES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_box(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        deposit_box: BoxUuid,
    ) -> Result<DepositBoxRecord, sqlx::Error> {
        query_as::<Postgres, DepositBoxRecord>(GET_BOX_SQL)
            .bind(deposit_box.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch the box and hold its row lock until the transaction ends.
    pub(crate) async fn lock_box(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        deposit_box: BoxUuid,
    ) -> Result<DepositBoxRecord, sqlx::Error> {
        query_as::<Postgres, DepositBoxRecord>(LOCK_BOX_SQL)
            .bind(deposit_box.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_box(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        deposit_box: BoxUuid,
        box_code: &str,
    ) -> Result<DepositBoxRecord, sqlx::Error> {
        query_as::<Postgres, DepositBoxRecord>(CREATE_BOX_SQL)
            .bind(deposit_box.into_uuid())
            .bind(box_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        deposit_box: BoxUuid,
        status: BoxStatus,
    ) -> Result<DepositBoxRecord, sqlx::Error> {
        query_as::<Postgres, DepositBoxRecord>(UPDATE_BOX_STATUS_SQL)
            .bind(deposit_box.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DepositBoxRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<BoxStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: BoxUuid::from_uuid(row.try_get("id")?),
            box_code: row.try_get("box_code")?,
            status,
        })
    }
}
