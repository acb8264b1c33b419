//! Rental Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        boxes::records::{BoxStatus, BoxUuid, DepositBoxRecord},
        rentals::pin::PinHash,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Rental UUID
pub type RentalUuid = TypedUuid<RentalRecord>;

/// Rental Record
#[derive(Debug, Clone)]
pub struct RentalRecord {
    pub uuid: RentalUuid,
    pub user_uuid: UserUuid,
    pub box_uuid: BoxUuid,
    pub status: RentalStatus,
    pub price: Decimal,
    pub payment_status: PaymentStatus,
    pub pin: Option<PinHash>,
    pub barcode: String,
    pub items_type: String,
    pub rent_duration: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl RentalRecord {
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    #[must_use]
    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

/// Rental lifecycle status. Newly booked rentals may carry an empty status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Unset,
    Pending,
    Active,
    Completed,
    Cancelled,
}

string_enum!(RentalStatus, "rental status", {
    Unset => "",
    Pending => "pending",
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

/// Settlement status of a rental's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Completed,
    Failed,
    Refunded,
}

string_enum!(PaymentStatus, "payment status", {
    Pending => "pending",
    Paid => "paid",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    DigitalWallet,
    Cash,
}

string_enum!(PaymentMethod, "payment method", {
    CreditCard => "credit_card",
    BankTransfer => "bank_transfer",
    DigitalWallet => "digital_wallet",
    Cash => "cash",
});

impl PaymentMethod {
    /// Methods offered on the payment form. Cash is only recorded by staff.
    pub const OFFERED: [Self; 3] = [Self::CreditCard, Self::BankTransfer, Self::DigitalWallet];
}

/// Box and customer details for the booking form.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub deposit_box: DepositBoxRecord,
    pub full_name: String,
    pub email: Option<String>,
}

/// Rental together with its box and the sum of recorded payments.
#[derive(Debug, Clone)]
pub struct RentalOverview {
    pub rental: RentalRecord,
    pub box_code: String,
    pub box_status: Option<BoxStatus>,
    pub total_paid: Decimal,
}

/// Unpaid rental shown on the payment form.
#[derive(Debug, Clone)]
pub struct PaymentView {
    pub rental: RentalRecord,
    pub box_code: String,
    pub customer_name: String,
}

/// Result of a payment or extension submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub rental: RentalUuid,

    /// The submission key had already been processed; nothing was invoked.
    pub replayed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rental_status_is_unset() {
        assert_eq!("".parse::<RentalStatus>(), Ok(RentalStatus::Unset));
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        let result = "cheque".parse::<PaymentMethod>();

        assert_eq!(
            result,
            Err(UnknownVariant {
                kind: "payment method",
                value: "cheque".to_string(),
            })
        );
    }

    #[test]
    fn offered_methods_exclude_cash() {
        assert!(!PaymentMethod::OFFERED.contains(&PaymentMethod::Cash));
        assert_eq!(PaymentMethod::OFFERED.len(), 3);
    }
}
