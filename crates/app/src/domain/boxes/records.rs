//! Deposit Box Records

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Deposit Box UUID
pub type BoxUuid = TypedUuid<DepositBoxRecord>;

/// Deposit Box Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositBoxRecord {
    pub uuid: BoxUuid,
    pub box_code: String,
    pub status: BoxStatus,
}

impl DepositBoxRecord {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == BoxStatus::Available
    }
}

/// Lifecycle status of a deposit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxStatus {
    Available,
    Pending,
    Rented,
    Unavailable,
    Maintenance,
}

impl BoxStatus {
    pub const ALL: [Self; 5] = [
        Self::Available,
        Self::Pending,
        Self::Rented,
        Self::Unavailable,
        Self::Maintenance,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Rented => "rented",
            Self::Unavailable => "unavailable",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for BoxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown box status `{0}`")]
pub struct UnknownBoxStatus(pub String);

impl FromStr for BoxStatus {
    type Err = UnknownBoxStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownBoxStatus(value.to_string()))
    }
}
