//! Authentication
//!
//! Client for the hosted auth service, the per-request session holder and the
//! route guard deciding which pages require a session.

mod errors;
pub mod gotrue;
pub mod guard;
mod models;
mod service;
pub mod session;
mod tokens;

pub use errors::*;
pub use gotrue::GoTrueClient;
pub use guard::{RouteDecision, guard_route, is_guarded_path};
pub use models::*;
pub use service::*;
pub use session::{AuthEvent, SessionHolder, SessionSubscription};
pub use tokens::SecretToken;
