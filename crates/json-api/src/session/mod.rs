//! Per-request sessions.
//!
//! The session middleware resolves the caller's session from the bearer
//! header or the auth cookies, places a [`SessionHolder`] in the depot and,
//! once the handler has run, writes the holder's latest session back into
//! cookies when it changed. The guard middleware then decides, per path,
//! whether the request may proceed.
//!
//! [`SessionHolder`]: brankas_app::auth::SessionHolder

pub(crate) mod cookies;
pub(crate) mod guard;
pub(crate) mod middleware;
