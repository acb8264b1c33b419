//! Admin back-office
//!
//! Read models backed by the hosted reporting procedures, plus the two
//! destructive admin actions (deleting a customer, ending a rental).

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::AdminServiceError;
pub use service::*;
