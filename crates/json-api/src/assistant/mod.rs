//! AI assistant endpoints
//!
//! Both endpoints answer with their own JSON error bodies instead of the
//! default status error page, so handlers render the status themselves.

pub(crate) mod handlers;
pub(crate) mod models;
