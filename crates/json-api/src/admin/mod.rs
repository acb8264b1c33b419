//! Admin back-office
//!
//! Every route here sits behind the admin check of the route guard.

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod models;
