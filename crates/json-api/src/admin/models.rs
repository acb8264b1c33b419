//! Admin Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::admin::records::{
    AdminRentalRecord, CustomerRecord, CustomersOverview, DailyCount, Dashboard, MethodCount,
    PaymentRecord, PaymentsOverview, ReportOption, ReportsOverview, RentalsOverview,
    WeeklyReport,
};

use crate::{
    boxes::models::DepositBoxResponse,
    rentals::models::{money, timestamp},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailyCountResponse {
    pub day: String,
    pub count: i64,
}

impl From<DailyCount> for DailyCountResponse {
    fn from(count: DailyCount) -> Self {
        Self {
            day: count.day,
            count: count.count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardResponse {
    pub last_7_days_revenue: String,
    pub last_30_days_revenue: String,
    pub total_boxes: i64,
    pub rented_boxes: i64,
    pub weekly_activity: Vec<DailyCountResponse>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            last_7_days_revenue: money(dashboard.revenue.last_7_days_revenue),
            last_30_days_revenue: money(dashboard.revenue.last_30_days_revenue),
            total_boxes: dashboard.boxes.total_boxes,
            rented_boxes: dashboard.boxes.rented_boxes,
            weekly_activity: dashboard.weekly_activity.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerResponse {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            id: customer.uuid.into(),
            full_name: customer.full_name,
            email: customer.email,
            created_at: customer.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomersResponse {
    pub customers: Vec<CustomerResponse>,

    /// Sign-ups per day over the requested range
    pub signups: Vec<DailyCountResponse>,

    pub range_days: i32,
}

impl CustomersResponse {
    pub(crate) fn new(overview: CustomersOverview, range_days: i32) -> Self {
        Self {
            customers: overview.customers.into_iter().map(Into::into).collect(),
            signups: overview.signups.into_iter().map(Into::into).collect(),
            range_days,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminRentalResponse {
    pub rental_id: Uuid,
    pub user_email: Option<String>,
    pub box_code: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub rent_duration: Option<String>,
}

impl From<AdminRentalRecord> for AdminRentalResponse {
    fn from(rental: AdminRentalRecord) -> Self {
        Self {
            rental_id: rental.rental_uuid.into(),
            user_email: rental.user_email,
            box_code: rental.box_code,
            status: rental.status,
            start_date: timestamp(rental.start_date),
            end_date: timestamp(rental.end_date),
            rent_duration: rental.rent_duration,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RentalsOverviewResponse {
    pub boxes: Vec<DepositBoxResponse>,
    pub rentals: Vec<AdminRentalResponse>,
}

impl From<RentalsOverview> for RentalsOverviewResponse {
    fn from(overview: RentalsOverview) -> Self {
        Self {
            boxes: overview.boxes.into_iter().map(Into::into).collect(),
            rentals: overview.rentals.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentResponse {
    pub payment_id: Uuid,
    pub payment_date: Option<String>,
    pub user_email: Option<String>,
    pub amount: String,
    pub method: Option<String>,
    pub rental_id: Option<Uuid>,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(payment: PaymentRecord) -> Self {
        Self {
            payment_id: payment.payment_uuid,
            payment_date: timestamp(payment.payment_date),
            user_email: payment.user_email,
            amount: money(payment.amount),
            method: payment.method,
            rental_id: payment.rental_uuid.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MethodCountResponse {
    pub method: String,
    pub count: i64,
}

impl From<MethodCount> for MethodCountResponse {
    fn from(count: MethodCount) -> Self {
        Self {
            method: count.method,
            count: count.count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentsResponse {
    pub total_revenue: String,
    pub total_transactions: i64,
    pub average_transaction_value: String,
    pub payments: Vec<PaymentResponse>,
    pub methods: Vec<MethodCountResponse>,
}

impl From<PaymentsOverview> for PaymentsResponse {
    fn from(overview: PaymentsOverview) -> Self {
        Self {
            total_revenue: money(overview.summary.total_revenue),
            total_transactions: overview.summary.total_transactions,
            average_transaction_value: money(overview.summary.average_transaction_value),
            payments: overview.payments.into_iter().map(Into::into).collect(),
            methods: overview.methods.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportOptionResponse {
    pub id: Uuid,
    pub start_date: String,
    pub end_date: String,
}

impl From<ReportOption> for ReportOptionResponse {
    fn from(option: ReportOption) -> Self {
        Self {
            id: option.uuid.into(),
            start_date: option.start_date.to_string(),
            end_date: option.end_date.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WeeklyReportResponse {
    pub id: Uuid,
    pub start_date: String,
    pub end_date: String,
    pub total_revenue: String,
    pub new_rental_revenue: String,
    pub extension_revenue: String,
    pub total_transactions: i64,
    pub new_rentals: i64,
    pub busiest_day: Option<String>,
    pub new_user_signups: i64,
}

impl From<WeeklyReport> for WeeklyReportResponse {
    fn from(report: WeeklyReport) -> Self {
        Self {
            id: report.uuid.into(),
            start_date: report.start_date.to_string(),
            end_date: report.end_date.to_string(),
            total_revenue: money(report.total_revenue),
            new_rental_revenue: money(report.new_rental_revenue),
            extension_revenue: money(report.extension_revenue),
            total_transactions: report.total_transactions,
            new_rentals: report.new_rentals,
            busiest_day: report.busiest_day,
            new_user_signups: report.new_user_signups,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReportsResponse {
    /// Newest first
    pub reports: Vec<ReportOptionResponse>,

    /// Details of the newest report
    pub selected: Option<WeeklyReportResponse>,
}

impl From<ReportsOverview> for ReportsResponse {
    fn from(overview: ReportsOverview) -> Self {
        Self {
            reports: overview.reports.into_iter().map(Into::into).collect(),
            selected: overview.selected.map(Into::into),
        }
    }
}
