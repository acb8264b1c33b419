//! Admin service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        admin::{
            errors::AdminServiceError,
            records::{
                AdminRentalRecord, BoxSummary, CustomerRecord, CustomersOverview, DailyCount,
                Dashboard, MethodCount, PaymentRecord, PaymentSummary, PaymentsOverview,
                RentalsOverview, ReportOption, ReportUuid, ReportsOverview, RevenueSummary,
                SignupRange, WeeklyReport,
            },
            repository::PgAdminRepository,
        },
        boxes::records::DepositBoxRecord,
        rentals::records::RentalUuid,
        users::records::UserUuid,
    },
};

/// Admin back-office backed by the hosted reporting procedures.
///
/// Every call runs with the acting admin's identity so the procedures can
/// authorise it. Pages that need several data sets fetch them concurrently,
/// each on its own connection, and fail as a whole if any one fails.
#[derive(Debug, Clone)]
pub struct PgAdminService {
    db: Db,
    repository: PgAdminRepository,
}

impl PgAdminService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAdminRepository::new(),
        }
    }

    async fn revenue_summary(&self, admin: UserUuid) -> Result<RevenueSummary, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let summary = self.repository.revenue_summary(&mut tx).await?;
        tx.commit().await?;

        Ok(summary)
    }

    async fn box_summary(&self, admin: UserUuid) -> Result<BoxSummary, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let summary = self.repository.box_summary(&mut tx).await?;
        tx.commit().await?;

        Ok(summary)
    }

    async fn weekly_activity(&self, admin: UserUuid) -> Result<Vec<DailyCount>, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let activity = self.repository.weekly_activity(&mut tx).await?;
        tx.commit().await?;

        Ok(activity)
    }

    async fn all_customers(
        &self,
        admin: UserUuid,
    ) -> Result<Vec<CustomerRecord>, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let customers = self.repository.all_customers(&mut tx).await?;
        tx.commit().await?;

        Ok(customers)
    }

    async fn daily_signups(
        &self,
        admin: UserUuid,
        range: SignupRange,
    ) -> Result<Vec<DailyCount>, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let signups = self.repository.daily_signups(&mut tx, range).await?;
        tx.commit().await?;

        Ok(signups)
    }

    async fn all_boxes(&self, admin: UserUuid) -> Result<Vec<DepositBoxRecord>, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let boxes = self.repository.all_boxes(&mut tx).await?;
        tx.commit().await?;

        Ok(boxes)
    }

    async fn all_rentals(
        &self,
        admin: UserUuid,
    ) -> Result<Vec<AdminRentalRecord>, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let rentals = self.repository.all_rentals(&mut tx).await?;
        tx.commit().await?;

        Ok(rentals)
    }

    async fn payment_summary(&self, admin: UserUuid) -> Result<PaymentSummary, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let summary = self.repository.payment_summary(&mut tx).await?;
        tx.commit().await?;

        Ok(summary)
    }

    async fn all_payments(&self, admin: UserUuid) -> Result<Vec<PaymentRecord>, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let payments = self.repository.all_payments(&mut tx).await?;
        tx.commit().await?;

        Ok(payments)
    }

    async fn method_distribution(
        &self,
        admin: UserUuid,
    ) -> Result<Vec<MethodCount>, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;
        let methods = self.repository.payment_method_distribution(&mut tx).await?;
        tx.commit().await?;

        Ok(methods)
    }
}

#[async_trait]
impl AdminService for PgAdminService {
    async fn dashboard(&self, admin: UserUuid) -> Result<Dashboard, AdminServiceError> {
        let (revenue, boxes, weekly_activity) = tokio::try_join!(
            self.revenue_summary(admin),
            self.box_summary(admin),
            self.weekly_activity(admin),
        )?;

        Ok(Dashboard {
            revenue,
            boxes,
            weekly_activity,
        })
    }

    async fn customers(
        &self,
        admin: UserUuid,
        range: SignupRange,
    ) -> Result<CustomersOverview, AdminServiceError> {
        let (customers, signups) =
            tokio::try_join!(self.all_customers(admin), self.daily_signups(admin, range))?;

        Ok(CustomersOverview { customers, signups })
    }

    async fn delete_customer(
        &self,
        admin: UserUuid,
        customer: UserUuid,
    ) -> Result<(), AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;

        self.repository
            .delete_user_and_data(&mut tx, customer)
            .await
            .map_err(AdminServiceError::from_procedure)?;

        tx.commit().await?;

        info!(%admin, %customer, "deleted customer and their data");

        Ok(())
    }

    async fn rentals(&self, admin: UserUuid) -> Result<RentalsOverview, AdminServiceError> {
        let (boxes, rentals) = tokio::try_join!(self.all_boxes(admin), self.all_rentals(admin))?;

        Ok(RentalsOverview { boxes, rentals })
    }

    async fn end_rental(
        &self,
        admin: UserUuid,
        rental: RentalUuid,
    ) -> Result<(), AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;

        self.repository
            .end_rental(&mut tx, rental)
            .await
            .map_err(AdminServiceError::from_procedure)?;

        tx.commit().await?;

        info!(%admin, %rental, "ended rental");

        Ok(())
    }

    async fn payments(&self, admin: UserUuid) -> Result<PaymentsOverview, AdminServiceError> {
        let (summary, payments, methods) = tokio::try_join!(
            self.payment_summary(admin),
            self.all_payments(admin),
            self.method_distribution(admin),
        )?;

        Ok(PaymentsOverview {
            summary,
            payments,
            methods,
        })
    }

    async fn reports(&self, admin: UserUuid) -> Result<ReportsOverview, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;

        let reports: Vec<ReportOption> = self.repository.available_reports(&mut tx).await?;

        let selected = match reports.first() {
            Some(first) => Some(self.repository.get_report(&mut tx, first.uuid).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(ReportsOverview { reports, selected })
    }

    async fn report(
        &self,
        admin: UserUuid,
        report: ReportUuid,
    ) -> Result<WeeklyReport, AdminServiceError> {
        let mut tx = self.db.begin_user_transaction(admin).await?;

        let record = self.repository.get_report(&mut tx, report).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Revenue, box occupancy and the last week's rental activity.
    async fn dashboard(&self, admin: UserUuid) -> Result<Dashboard, AdminServiceError>;

    /// All customers and the sign-up chart for `range`.
    async fn customers(
        &self,
        admin: UserUuid,
        range: SignupRange,
    ) -> Result<CustomersOverview, AdminServiceError>;

    /// Deletes a customer with all their rentals and payments.
    async fn delete_customer(
        &self,
        admin: UserUuid,
        customer: UserUuid,
    ) -> Result<(), AdminServiceError>;

    /// All boxes and all rentals.
    async fn rentals(&self, admin: UserUuid) -> Result<RentalsOverview, AdminServiceError>;

    /// Ends a rental early.
    async fn end_rental(&self, admin: UserUuid, rental: RentalUuid)
    -> Result<(), AdminServiceError>;

    /// Payment totals, the payment ledger and the method distribution.
    async fn payments(&self, admin: UserUuid) -> Result<PaymentsOverview, AdminServiceError>;

    /// Available weekly reports, newest first, with the newest one loaded.
    async fn reports(&self, admin: UserUuid) -> Result<ReportsOverview, AdminServiceError>;

    /// A single weekly report.
    async fn report(
        &self,
        admin: UserUuid,
        report: ReportUuid,
    ) -> Result<WeeklyReport, AdminServiceError>;
}
