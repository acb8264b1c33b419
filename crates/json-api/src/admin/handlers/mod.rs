//! Admin Handlers

pub(crate) mod customers;
pub(crate) mod dashboard;
pub(crate) mod delete_customer;
pub(crate) mod end_rental;
pub(crate) mod payments;
pub(crate) mod report;
pub(crate) mod reports;
pub(crate) mod rentals;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use brankas_app::domain::admin::records::{ReportUuid, WeeklyReport};

    pub(crate) fn make_report(uuid: ReportUuid) -> WeeklyReport {
        WeeklyReport {
            uuid,
            start_date: Timestamp::UNIX_EPOCH,
            end_date: Timestamp::UNIX_EPOCH,
            total_revenue: Decimal::new(4497, 2),
            new_rental_revenue: Decimal::new(2998, 2),
            extension_revenue: Decimal::new(1499, 2),
            total_transactions: 3,
            new_rentals: 2,
            busiest_day: Some("Monday".to_string()),
            new_user_signups: 4,
        }
    }
}
