//! Admin Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    admin::records::{
        AdminRentalRecord, BoxSummary, CustomerRecord, DailyCount, MethodCount, PaymentRecord,
        PaymentSummary, ReportOption, ReportUuid, RevenueSummary, SignupRange, WeeklyReport,
    },
    boxes::records::DepositBoxRecord,
    rentals::records::RentalUuid,
    users::records::UserUuid,
};

const REVENUE_SUMMARY_SQL: &str = include_str!("sql/revenue_summary.sql");
const BOX_SUMMARY_SQL: &str = include_str!("sql/box_summary.sql");
const WEEKLY_ACTIVITY_SQL: &str = include_str!("sql/weekly_activity.sql");
const ALL_CUSTOMERS_SQL: &str = include_str!("sql/all_customers.sql");
const DAILY_SIGNUPS_SQL: &str = include_str!("sql/daily_signups.sql");
const DELETE_USER_AND_DATA_SQL: &str = include_str!("sql/delete_user_and_data.sql");
const ALL_BOXES_SQL: &str = include_str!("sql/all_boxes.sql");
const ALL_RENTALS_SQL: &str = include_str!("sql/all_rentals.sql");
const ADMIN_END_RENTAL_SQL: &str = include_str!("sql/admin_end_rental.sql");
const PAYMENT_SUMMARY_SQL: &str = include_str!("sql/payment_summary.sql");
const ALL_PAYMENTS_SQL: &str = include_str!("sql/all_payments.sql");
const PAYMENT_METHOD_DISTRIBUTION_SQL: &str =
    include_str!("sql/payment_method_distribution.sql");
const AVAILABLE_REPORTS_SQL: &str = include_str!("sql/available_reports.sql");
const GET_WEEKLY_REPORT_SQL: &str = include_str!("sql/get_weekly_report.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAdminRepository;

impl PgAdminRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Revenue totals; a procedure returning no row counts as zero revenue.
    pub(crate) async fn revenue_summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<RevenueSummary, sqlx::Error> {
        let summary = query_as::<Postgres, RevenueSummary>(REVENUE_SUMMARY_SQL)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(summary.unwrap_or_default())
    }

    pub(crate) async fn box_summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<BoxSummary, sqlx::Error> {
        let summary = query_as::<Postgres, BoxSummary>(BOX_SUMMARY_SQL)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(summary.unwrap_or_default())
    }

    pub(crate) async fn weekly_activity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<DailyCount>, sqlx::Error> {
        query_as::<Postgres, DailyCount>(WEEKLY_ACTIVITY_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn all_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(ALL_CUSTOMERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn daily_signups(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        range: SignupRange,
    ) -> Result<Vec<DailyCount>, sqlx::Error> {
        query_as::<Postgres, DailyCount>(DAILY_SIGNUPS_SQL)
            .bind(range.days())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user_and_data(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_USER_AND_DATA_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn all_boxes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<DepositBoxRecord>, sqlx::Error> {
        query_as::<Postgres, DepositBoxRecord>(ALL_BOXES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn all_rentals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AdminRentalRecord>, sqlx::Error> {
        query_as::<Postgres, AdminRentalRecord>(ALL_RENTALS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn end_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
    ) -> Result<(), sqlx::Error> {
        query(ADMIN_END_RENTAL_SQL)
            .bind(rental.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn payment_summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<PaymentSummary, sqlx::Error> {
        let summary = query_as::<Postgres, PaymentSummary>(PAYMENT_SUMMARY_SQL)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(summary.unwrap_or_default())
    }

    pub(crate) async fn all_payments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(ALL_PAYMENTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn payment_method_distribution(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<MethodCount>, sqlx::Error> {
        query_as::<Postgres, MethodCount>(PAYMENT_METHOD_DISTRIBUTION_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn available_reports(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ReportOption>, sqlx::Error> {
        query_as::<Postgres, ReportOption>(AVAILABLE_REPORTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_report(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        report: ReportUuid,
    ) -> Result<WeeklyReport, sqlx::Error> {
        query_as::<Postgres, WeeklyReport>(GET_WEEKLY_REPORT_SQL)
            .bind(report.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

fn optional_timestamp(row: &PgRow, column: &str) -> sqlx::Result<Option<jiff::Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(SqlxTimestamp::to_jiff))
}

impl<'r> FromRow<'r, PgRow> for RevenueSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            last_7_days_revenue: row.try_get("last_7_days_revenue")?,
            last_30_days_revenue: row.try_get("last_30_days_revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BoxSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_boxes: row.try_get("total_boxes")?,
            rented_boxes: row.try_get("rented_boxes")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DailyCount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            day: row.try_get::<Option<String>, _>("day")?.unwrap_or_default(),
            count: row.try_get("count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("id")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AdminRentalRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            rental_uuid: RentalUuid::from_uuid(row.try_get("rental_id")?),
            user_email: row.try_get("user_email")?,
            box_code: row.try_get("box_code")?,
            status: row.try_get("status")?,
            start_date: optional_timestamp(row, "start_date")?,
            end_date: optional_timestamp(row, "end_date")?,
            rent_duration: row.try_get("rent_duration")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_revenue: row.try_get("total_revenue")?,
            total_transactions: row.try_get("total_transactions")?,
            average_transaction_value: row.try_get("average_transaction_value")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            payment_uuid: row.try_get("payment_id")?,
            payment_date: optional_timestamp(row, "payment_date")?,
            user_email: row.try_get("user_email")?,
            amount: row.try_get::<Option<Decimal>, _>("amount")?.unwrap_or_default(),
            method: row.try_get("method")?,
            rental_uuid: row
                .try_get::<Option<Uuid>, _>("rental_id")?
                .map(RentalUuid::from_uuid),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MethodCount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            method: row.try_get::<Option<String>, _>("method")?.unwrap_or_default(),
            count: row.try_get("count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ReportOption {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReportUuid::from_uuid(row.try_get("id")?),
            start_date: row.try_get::<SqlxTimestamp, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxTimestamp, _>("end_date")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for WeeklyReport {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReportUuid::from_uuid(row.try_get("id")?),
            start_date: row.try_get::<SqlxTimestamp, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxTimestamp, _>("end_date")?.to_jiff(),
            total_revenue: row.try_get("total_revenue")?,
            new_rental_revenue: row.try_get("new_rental_revenue")?,
            extension_revenue: row.try_get("extension_revenue")?,
            total_transactions: row.try_get("total_transactions")?,
            new_rentals: row.try_get("new_rentals")?,
            busiest_day: row.try_get("busiest_day")?,
            new_user_signups: row.try_get("new_user_signups")?,
        })
    }
}
