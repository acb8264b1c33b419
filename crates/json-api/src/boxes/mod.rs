//! Deposit Boxes

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod models;
