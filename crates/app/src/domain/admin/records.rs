//! Admin Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    domain::{
        boxes::records::DepositBoxRecord, rentals::records::RentalUuid, users::records::UserUuid,
    },
    uuids::TypedUuid,
};

pub type ReportUuid = TypedUuid<WeeklyReport>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueSummary {
    pub last_7_days_revenue: Decimal,
    pub last_30_days_revenue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxSummary {
    pub total_boxes: i64,
    pub rented_boxes: i64,
}

/// One bar of an activity chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub day: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub revenue: RevenueSummary,
    pub boxes: BoxSummary,
    pub weekly_activity: Vec<DailyCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub uuid: UserUuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
}

/// Window of the sign-up chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignupRange {
    #[default]
    LastWeek,
    LastMonth,
}

impl SignupRange {
    #[must_use]
    pub const fn days(self) -> i32 {
        match self {
            Self::LastWeek => 7,
            Self::LastMonth => 30,
        }
    }

    /// Accepts only the two offered windows, 7 and 30 days.
    #[must_use]
    pub const fn from_days(days: i64) -> Option<Self> {
        match days {
            7 => Some(Self::LastWeek),
            30 => Some(Self::LastMonth),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomersOverview {
    pub customers: Vec<CustomerRecord>,
    pub signups: Vec<DailyCount>,
}

/// Rental row of the back-office rentals table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRentalRecord {
    pub rental_uuid: RentalUuid,
    pub user_email: Option<String>,
    pub box_code: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub rent_duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalsOverview {
    pub boxes: Vec<DepositBoxRecord>,
    pub rentals: Vec<AdminRentalRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSummary {
    pub total_revenue: Decimal,
    pub total_transactions: i64,
    pub average_transaction_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub payment_uuid: Uuid,
    pub payment_date: Option<Timestamp>,
    pub user_email: Option<String>,
    pub amount: Decimal,
    pub method: Option<String>,
    pub rental_uuid: Option<RentalUuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCount {
    pub method: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentsOverview {
    pub summary: PaymentSummary,
    pub payments: Vec<PaymentRecord>,
    pub methods: Vec<MethodCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOption {
    pub uuid: ReportUuid,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

/// Precomputed weekly aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyReport {
    pub uuid: ReportUuid,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub total_revenue: Decimal,
    pub new_rental_revenue: Decimal,
    pub extension_revenue: Decimal,
    pub total_transactions: i64,
    pub new_rentals: i64,
    pub busiest_day: Option<String>,
    pub new_user_signups: i64,
}

/// Report picker options (newest first) and the details of the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportsOverview {
    pub reports: Vec<ReportOption>,
    pub selected: Option<WeeklyReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_range_accepts_offered_windows_only() {
        assert_eq!(SignupRange::from_days(7), Some(SignupRange::LastWeek));
        assert_eq!(SignupRange::from_days(30), Some(SignupRange::LastMonth));
        assert_eq!(SignupRange::from_days(14), None);
        assert_eq!(SignupRange::default().days(), 7);
    }
}
