//! Rental duration price tables.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::rentals::records::UnknownVariant;

/// Rental duration codes offered at booking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentDuration {
    OneDay,
    ThreeDays,
    OneWeek,
    OneMonth,
}

impl RentDuration {
    /// Booking options in display order.
    pub const BOOKING: [Self; 4] = [Self::OneDay, Self::ThreeDays, Self::OneWeek, Self::OneMonth];

    /// Extension options in display order.
    pub const EXTENSION: [Self; 3] = [Self::OneDay, Self::ThreeDays, Self::OneWeek];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "one_day",
            Self::ThreeDays => "three_days",
            Self::OneWeek => "one_week",
            Self::OneMonth => "one_month",
        }
    }

    #[must_use]
    pub const fn booking_label(self) -> &'static str {
        match self {
            Self::OneDay => "One day",
            Self::ThreeDays => "Three days",
            Self::OneWeek => "One week",
            Self::OneMonth => "One month",
        }
    }

    #[must_use]
    pub const fn extension_label(self) -> &'static str {
        match self {
            Self::OneDay => "Add One Day",
            Self::ThreeDays => "Add Three Days",
            Self::OneWeek => "Add One Week",
            Self::OneMonth => "Add One Month",
        }
    }

    /// Flat booking price.
    #[must_use]
    pub fn booking_price(self) -> Decimal {
        match self {
            Self::OneDay => Decimal::new(599, 2),
            Self::ThreeDays => Decimal::new(1499, 2),
            Self::OneWeek => Decimal::new(2999, 2),
            Self::OneMonth => Decimal::new(9999, 2),
        }
    }

    /// Flat extension price, `None` when the duration cannot be added to a rental.
    #[must_use]
    pub fn extension_price(self) -> Option<Decimal> {
        match self {
            Self::OneDay => Some(Decimal::new(599, 2)),
            Self::ThreeDays => Some(Decimal::new(1499, 2)),
            Self::OneWeek => Some(Decimal::new(2999, 2)),
            Self::OneMonth => None,
        }
    }
}

impl fmt::Display for RentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentDuration {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::BOOKING
            .into_iter()
            .find(|duration| duration.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "rent duration",
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn booking_prices_match_table() -> TestResult {
        let expected = [
            ("one_day", "5.99"),
            ("three_days", "14.99"),
            ("one_week", "29.99"),
            ("one_month", "99.99"),
        ];

        for (code, price) in expected {
            let duration: RentDuration = code.parse()?;

            assert_eq!(duration.booking_price(), Decimal::from_str(price)?, "{code}");
        }

        Ok(())
    }

    #[test]
    fn extension_prices_match_table() {
        assert_eq!(RentDuration::OneDay.extension_price(), Some(Decimal::new(599, 2)));
        assert_eq!(RentDuration::ThreeDays.extension_price(), Some(Decimal::new(1499, 2)));
        assert_eq!(RentDuration::OneWeek.extension_price(), Some(Decimal::new(2999, 2)));
        assert_eq!(RentDuration::OneMonth.extension_price(), None);
    }

    #[test]
    fn unknown_duration_is_rejected() {
        assert!("two_weeks".parse::<RentDuration>().is_err());
        assert!("ONE_DAY".parse::<RentDuration>().is_err());
    }
}
