//! Rental Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{http::HeaderMap, oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::rentals::{
    pin::MASKED_PIN,
    pricing::RentDuration,
    records::{PaymentMethod, RentalOverview, RentalUuid},
};

use crate::extensions::*;

/// Client-chosen key that makes a payment or extension submission idempotent.
pub(crate) const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Decimal amount with two places, e.g. `"14.99"`.
pub(crate) fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

pub(crate) fn timestamp(value: Option<Timestamp>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

pub(crate) fn masked_pin(overview: &RentalOverview) -> Option<String> {
    overview.rental.has_pin().then(|| MASKED_PIN.to_string())
}

pub(crate) fn offered_payment_methods() -> Vec<String> {
    PaymentMethod::OFFERED
        .iter()
        .map(|method| method.as_str().to_string())
        .collect()
}

/// The submission key from the `Idempotency-Key` header, else the body, else a
/// fresh one.
pub(crate) fn submission_key(
    headers: &HeaderMap,
    from_body: Option<Uuid>,
) -> Result<Uuid, StatusError> {
    let Some(header) = headers.get(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(from_body.unwrap_or_else(Uuid::new_v4));
    };

    header
        .to_str()
        .map_err(|error| error.to_string())
        .and_then(|value| Uuid::parse_str(value.trim()).map_err(|error| error.to_string()))
        .or_400("Idempotency-Key must be a UUID")
}

/// A priced duration choice.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DurationOption {
    /// Duration code, e.g. `three_days`
    pub code: String,

    pub label: String,

    pub price: String,
}

impl DurationOption {
    pub(crate) fn booking(duration: RentDuration) -> Self {
        Self {
            code: duration.as_str().to_string(),
            label: duration.booking_label().to_string(),
            price: money(duration.booking_price()),
        }
    }

    pub(crate) fn extension(duration: RentDuration) -> Option<Self> {
        duration.extension_price().map(|price| Self {
            code: duration.as_str().to_string(),
            label: duration.extension_label().to_string(),
            price: money(price),
        })
    }
}

/// Where the client goes after a successful submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NextStepResponse {
    pub rental_id: Uuid,

    pub next: String,

    /// `true` when the submission key was already processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replayed: Option<bool>,

    /// Delay before navigating to `next`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_after_ms: Option<u64>,
}

impl NextStepResponse {
    pub(crate) fn new(rental: RentalUuid, next: String) -> Self {
        Self {
            rental_id: rental.into(),
            next,
            replayed: None,
            redirect_after_ms: None,
        }
    }
}
