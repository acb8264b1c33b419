//! Order list presentation rules.

use jiff::Timestamp;

use crate::domain::rentals::records::{RentalRecord, RentalStatus};

/// How often the order list is expected to be refetched.
pub const ORDERS_REFRESH_INTERVAL_SECONDS: u64 = 60;

const MILLIS_PER_MINUTE: i128 = 60 * 1000;
const MILLIS_PER_HOUR: i128 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i128 = 24 * MILLIS_PER_HOUR;

/// Remaining rental time as shown on an order card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeLeft {
    /// No end date recorded.
    Unknown,
    Expired,
    Remaining { days: i128, hours: i128, minutes: i128 },
}

impl TimeLeft {
    #[must_use]
    pub fn compute(end_date: Option<Timestamp>, now: Timestamp) -> Self {
        let Some(end_date) = end_date else {
            return Self::Unknown;
        };

        let diff = end_date.duration_since(now).as_millis();

        if diff <= 0 {
            return Self::Expired;
        }

        Self::Remaining {
            days: diff / MILLIS_PER_DAY,
            hours: (diff % MILLIS_PER_DAY) / MILLIS_PER_HOUR,
            minutes: (diff % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }

    /// `2d 5h left`; minutes are only shown when less than a day remains.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Unknown => "N/A".to_string(),
            Self::Expired => "Expired".to_string(),
            Self::Remaining {
                days,
                hours,
                minutes,
            } => {
                let mut parts = Vec::with_capacity(3);

                if *days > 0 {
                    parts.push(format!("{days}d"));
                }

                if *hours > 0 {
                    parts.push(format!("{hours}h"));
                }

                if *days == 0 {
                    parts.push(format!("{minutes}m"));
                }

                format!("{} left", parts.join(" "))
            }
        }
    }
}

/// Order card status: expiry overrides whatever status is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Expired,
    Stored(RentalStatus),
}

impl DisplayStatus {
    #[must_use]
    pub fn of(rental: &RentalRecord, now: Timestamp) -> Self {
        if TimeLeft::compute(rental.end_date, now).is_expired() {
            Self::Expired
        } else {
            Self::Stored(rental.status)
        }
    }

    /// Only an unexpired `active` rental may show its barcode or be extended.
    #[must_use]
    pub fn is_currently_active(self) -> bool {
        self == Self::Stored(RentalStatus::Active)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Stored(status) => status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rust_decimal::Decimal;

    use crate::domain::{
        boxes::records::BoxUuid,
        rentals::records::{PaymentStatus, RentalUuid},
        users::records::UserUuid,
    };

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_second(1_750_000_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    fn after(duration: SignedDuration) -> Option<Timestamp> {
        now().checked_add(duration).ok()
    }

    fn rental(status: RentalStatus, end_date: Option<Timestamp>) -> RentalRecord {
        RentalRecord {
            uuid: RentalUuid::new(),
            user_uuid: UserUuid::new(),
            box_uuid: BoxUuid::new(),
            status,
            price: Decimal::new(2999, 2),
            payment_status: PaymentStatus::Paid,
            pin: None,
            barcode: "barcode".to_string(),
            items_type: "Documents".to_string(),
            rent_duration: "one_week".to_string(),
            start_date: Some(now()),
            end_date,
            created_at: now(),
        }
    }

    #[test]
    fn days_and_hours_without_minutes() {
        let left = TimeLeft::compute(after(SignedDuration::from_mins(2 * 1440 + 5 * 60 + 30)), now());

        assert_eq!(left.label(), "2d 5h left");
    }

    #[test]
    fn whole_days_omit_zero_hours() {
        let left = TimeLeft::compute(after(SignedDuration::from_hours(72)), now());

        assert_eq!(left.label(), "3d left");
    }

    #[test]
    fn under_a_day_shows_minutes() {
        let left = TimeLeft::compute(after(SignedDuration::from_mins(3 * 60 + 7)), now());

        assert_eq!(left.label(), "3h 7m left");
    }

    #[test]
    fn under_an_hour_shows_only_minutes() {
        let left = TimeLeft::compute(after(SignedDuration::from_secs(59)), now());

        assert_eq!(left.label(), "0m left");
    }

    #[test]
    fn past_end_date_is_expired() {
        let left = TimeLeft::compute(after(SignedDuration::from_secs(-1)), now());

        assert_eq!(left, TimeLeft::Expired);
        assert_eq!(left.label(), "Expired");
    }

    #[test]
    fn missing_end_date_is_not_applicable() {
        assert_eq!(TimeLeft::compute(None, now()).label(), "N/A");
    }

    #[test]
    fn expiry_overrides_active_status() {
        let expired = rental(RentalStatus::Active, after(SignedDuration::from_hours(-1)));

        let status = DisplayStatus::of(&expired, now());

        assert_eq!(status, DisplayStatus::Expired);
        assert!(!status.is_currently_active());
    }

    #[test]
    fn active_rental_without_end_date_stays_active() {
        let open_ended = rental(RentalStatus::Active, None);

        assert!(DisplayStatus::of(&open_ended, now()).is_currently_active());
    }

    #[test]
    fn completed_rental_is_not_active() {
        let completed = rental(RentalStatus::Completed, after(SignedDuration::from_hours(5)));

        let status = DisplayStatus::of(&completed, now());

        assert_eq!(status.as_str(), "completed");
        assert!(!status.is_currently_active());
    }
}
