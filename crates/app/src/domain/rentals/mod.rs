//! Rentals
//!
//! Booking, payment settlement, PIN setting and extension of deposit box
//! rentals, plus the read projections shown to the renting customer.

pub mod data;
pub mod errors;
pub mod orders;
pub mod pin;
pub mod pricing;
pub mod records;
mod repository;
pub mod service;

pub use errors::RentalsServiceError;
pub use service::*;
