//! Rentals
//!
//! The customer journey from booking a box to extending an active rental:
//! booking, payment, PIN, confirmation, order list, details and extension.

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod models;
