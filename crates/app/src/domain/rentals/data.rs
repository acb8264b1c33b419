//! Rentals Data

use std::str::FromStr;

use uuid::Uuid;

use crate::domain::{
    boxes::records::BoxUuid,
    rentals::{
        pricing::RentDuration,
        records::{PaymentMethod, RentalUuid, UnknownVariant},
    },
};

/// Booking form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub box_uuid: BoxUuid,
    pub rent_duration: RentDuration,
    pub items_type: String,
}

/// Payment form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSubmission {
    pub rental: RentalUuid,
    pub method: PaymentMethod,

    /// Client-generated key identifying this submission attempt.
    pub submission_key: Uuid,
}

/// Extension form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSubmission {
    pub rental: RentalUuid,
    pub duration: RentDuration,
    pub method: PaymentMethod,
    pub submission_key: Uuid,
}

/// Kind of submission recorded in the idempotency ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionAction {
    Payment,
    Extension,
}

impl SubmissionAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Extension => "extension",
        }
    }
}

impl FromStr for SubmissionAction {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "payment" => Ok(Self::Payment),
            "extension" => Ok(Self::Extension),
            _ => Err(UnknownVariant {
                kind: "submission action",
                value: value.to_string(),
            }),
        }
    }
}

/// Result of recording a submission key in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionClaim {
    /// First use of the key; the submission should be processed.
    Claimed,

    /// The key was already processed for this same action and rental.
    Replay,

    /// The key was already used for a different action or rental.
    Conflict,
}

impl SubmissionClaim {
    /// Compare the ledger row already holding a key with the incoming submission.
    #[must_use]
    pub fn for_existing(
        stored: (SubmissionAction, RentalUuid),
        requested: (SubmissionAction, RentalUuid),
    ) -> Self {
        if stored == requested {
            Self::Replay
        } else {
            Self::Conflict
        }
    }
}
