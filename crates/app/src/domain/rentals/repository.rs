//! Rentals Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    boxes::records::{BoxStatus, BoxUuid},
    rentals::{
        data::{SubmissionAction, SubmissionClaim},
        pin::PinHash,
        pricing::RentDuration,
        records::{
            PaymentMethod, PaymentStatus, RentalOverview, RentalRecord, RentalStatus, RentalUuid,
        },
    },
    users::records::UserUuid,
};

const GET_RENTAL_SQL: &str = include_str!("sql/get_rental.sql");
const LOCK_RENTAL_SQL: &str = include_str!("sql/lock_rental.sql");
const CREATE_RENTAL_SQL: &str = include_str!("sql/create_rental.sql");
const SET_PIN_SQL: &str = include_str!("sql/set_pin.sql");
const GET_RENTAL_OVERVIEW_SQL: &str = include_str!("sql/get_rental_overview.sql");
const LIST_RENTAL_OVERVIEWS_SQL: &str = include_str!("sql/list_rental_overviews.sql");
const CLAIM_SUBMISSION_KEY_SQL: &str = include_str!("sql/claim_submission_key.sql");
const GET_SUBMISSION_KEY_SQL: &str = include_str!("sql/get_submission_key.sql");
const HANDLE_SUCCESSFUL_PAYMENT_SQL: &str = include_str!("sql/handle_successful_payment.sql");
const HANDLE_RENTAL_EXTENSION_SQL: &str = include_str!("sql/handle_rental_extension.sql");

/// Rental row about to be inserted.
#[derive(Debug, Clone)]
pub(crate) struct NewRental<'a> {
    pub uuid: RentalUuid,
    pub user: UserUuid,
    pub deposit_box: BoxUuid,
    pub price: Decimal,
    pub barcode: String,
    pub items_type: &'a str,
    pub rent_duration: RentDuration,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRentalsRepository;

impl PgRentalsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        user: UserUuid,
    ) -> Result<RentalRecord, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(GET_RENTAL_SQL)
            .bind(rental.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch the rental and hold its row lock until the transaction ends.
    pub(crate) async fn lock_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        user: UserUuid,
    ) -> Result<RentalRecord, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(LOCK_RENTAL_SQL)
            .bind(rental.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: NewRental<'_>,
    ) -> Result<RentalRecord, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(CREATE_RENTAL_SQL)
            .bind(rental.uuid.into_uuid())
            .bind(rental.user.into_uuid())
            .bind(rental.deposit_box.into_uuid())
            .bind(rental.price)
            .bind(rental.barcode)
            .bind(rental.items_type)
            .bind(rental.rent_duration.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_pin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        user: UserUuid,
        pin: &PinHash,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PIN_SQL)
            .bind(rental.into_uuid())
            .bind(user.into_uuid())
            .bind(pin.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_overview(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        user: UserUuid,
    ) -> Result<RentalOverview, sqlx::Error> {
        query_as::<Postgres, RentalOverview>(GET_RENTAL_OVERVIEW_SQL)
            .bind(rental.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_overviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<RentalOverview>, sqlx::Error> {
        query_as::<Postgres, RentalOverview>(LIST_RENTAL_OVERVIEWS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Record a submission key, or compare it with the submission that already holds it.
    pub(crate) async fn claim_submission_key(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        submission_key: Uuid,
        action: SubmissionAction,
        rental: RentalUuid,
    ) -> Result<SubmissionClaim, sqlx::Error> {
        let rows_affected = query(CLAIM_SUBMISSION_KEY_SQL)
            .bind(user.into_uuid())
            .bind(submission_key)
            .bind(action.as_str())
            .bind(rental.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 1 {
            return Ok(SubmissionClaim::Claimed);
        }

        let row = query(GET_SUBMISSION_KEY_SQL)
            .bind(user.into_uuid())
            .bind(submission_key)
            .fetch_one(&mut **tx)
            .await?;

        let stored_action: String = row.try_get("action")?;
        let stored_rental = RentalUuid::from_uuid(row.try_get("rental_id")?);

        Ok(SubmissionClaim::for_existing(
            (
                decode_column("action", stored_action.parse::<SubmissionAction>())?,
                stored_rental,
            ),
            (action, rental),
        ))
    }

    pub(crate) async fn handle_successful_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        deposit_box: BoxUuid,
        method: PaymentMethod,
    ) -> Result<(), sqlx::Error> {
        query(HANDLE_SUCCESSFUL_PAYMENT_SQL)
            .bind(rental.into_uuid())
            .bind(deposit_box.into_uuid())
            .bind(method.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn handle_rental_extension(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        duration: RentDuration,
        method: PaymentMethod,
        price: Decimal,
    ) -> Result<(), sqlx::Error> {
        query(HANDLE_RENTAL_EXTENSION_SQL)
            .bind(rental.into_uuid())
            .bind(duration.as_str())
            .bind(method.as_str())
            .bind(price)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn decode_column<T, E>(column: &str, value: Result<T, E>) -> sqlx::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    value.map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for RentalRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: Option<String> = row.try_get("status")?;
        let payment_status: Option<String> = row.try_get("payment_status")?;

        Ok(Self {
            uuid: RentalUuid::from_uuid(row.try_get("id")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_id")?),
            box_uuid: BoxUuid::from_uuid(row.try_get("box_id")?),
            status: decode_column(
                "status",
                status.as_deref().unwrap_or_default().parse::<RentalStatus>(),
            )?,
            price: row.try_get::<Option<Decimal>, _>("price")?.unwrap_or_default(),
            payment_status: payment_status.map_or(Ok(PaymentStatus::Pending), |value| {
                decode_column("payment_status", value.parse::<PaymentStatus>())
            })?,
            pin: PinHash::from_stored(row.try_get("pin_code")?),
            barcode: row
                .try_get::<Option<String>, _>("barcode")?
                .unwrap_or_default(),
            items_type: row
                .try_get::<Option<String>, _>("items_type")?
                .unwrap_or_default(),
            rent_duration: row
                .try_get::<Option<String>, _>("rent_duration")?
                .unwrap_or_default(),
            start_date: row
                .try_get::<Option<SqlxTimestamp>, _>("start_date")?
                .map(SqlxTimestamp::to_jiff),
            end_date: row
                .try_get::<Option<SqlxTimestamp>, _>("end_date")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for RentalOverview {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let box_status: Option<String> = row.try_get("box_status")?;

        Ok(Self {
            rental: RentalRecord::from_row(row)?,
            box_code: row.try_get("box_code")?,
            box_status: box_status
                .map(|value| decode_column("box_status", value.parse::<BoxStatus>()))
                .transpose()?,
            total_paid: row.try_get("total_paid")?,
        })
    }
}
