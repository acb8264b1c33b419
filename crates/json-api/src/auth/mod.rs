//! Authentication pages
//!
//! Sign-in, registration, password recovery and the auth-service callback.
//! Handlers only record session changes on the request's session holder; the
//! session middleware turns those into cookies.

pub(crate) mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
