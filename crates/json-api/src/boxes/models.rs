//! Deposit Box Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::boxes::records::DepositBoxRecord;

pub(crate) const UNAVAILABLE_MESSAGE: &str =
    "This box is currently unavailable. Please choose another box.";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DepositBoxResponse {
    pub id: Uuid,

    /// Human-facing code, e.g. `A-01`
    pub box_code: String,

    pub status: String,

    pub available: bool,

    /// Booking page for an available box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Shown instead of a link when the box cannot be booked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<DepositBoxRecord> for DepositBoxResponse {
    fn from(record: DepositBoxRecord) -> Self {
        let available = record.is_available();

        Self {
            id: record.uuid.into(),
            box_code: record.box_code,
            status: record.status.to_string(),
            available,
            next: available.then(|| format!("/booking?boxId={}", record.uuid)),
            message: (!available).then(|| UNAVAILABLE_MESSAGE.to_string()),
        }
    }
}
