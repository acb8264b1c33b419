//! My Orders Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brankas_app::domain::{
    boxes::records::BoxStatus,
    rentals::{
        orders::{DisplayStatus, ORDERS_REFRESH_INTERVAL_SECONDS, TimeLeft},
        records::RentalOverview,
    },
};

use crate::{
    extensions::*,
    rentals::{
        errors::into_status_error,
        models::{money, timestamp},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderCard {
    pub rental_id: Uuid,
    pub box_code: String,
    pub box_status: Option<String>,

    /// `expired` once the end date has passed, else the stored status
    pub status: String,

    /// e.g. `2d 5h left`
    pub time_left: String,

    pub rent_duration: String,
    pub items_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_paid: String,

    /// Present only while the barcode may be shown
    pub barcode: Option<String>,

    pub can_show_barcode: bool,
    pub can_extend: bool,
}

impl OrderCard {
    fn new(overview: RentalOverview, now: Timestamp) -> Self {
        let status = DisplayStatus::of(&overview.rental, now);
        let active = status.is_currently_active();
        let rental = overview.rental;

        Self {
            rental_id: rental.uuid.into(),
            box_code: overview.box_code,
            box_status: overview.box_status.map(BoxStatus::as_str).map(str::to_owned),
            status: status.as_str().to_string(),
            time_left: TimeLeft::compute(rental.end_date, now).label(),
            rent_duration: rental.rent_duration,
            items_type: rental.items_type,
            start_date: timestamp(rental.start_date),
            end_date: timestamp(rental.end_date),
            total_paid: money(overview.total_paid),
            barcode: active.then_some(rental.barcode),
            can_show_barcode: active,
            can_extend: active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrdersResponse {
    /// Newest first
    pub orders: Vec<OrderCard>,

    /// How often the list should be refetched
    pub refresh_interval_seconds: u64,
}

/// My Orders Handler
///
/// Lists the current user's rentals with time left and available actions.
#[endpoint(
    tags("rentals"),
    summary = "My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let overviews = state
        .app
        .rentals
        .list_orders(user.uuid)
        .await
        .map_err(into_status_error)?;

    let now = Timestamp::now();

    Ok(Json(OrdersResponse {
        orders: overviews
            .into_iter()
            .map(|overview| OrderCard::new(overview, now))
            .collect(),
        refresh_interval_seconds: ORDERS_REFRESH_INTERVAL_SECONDS,
    }))
}
