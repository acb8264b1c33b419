//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use brankas_app::auth::{AuthEvent, guard::LOGIN_PATH};

use crate::{auth::models::MessageResponse, extensions::*, state::State};

/// Sign Out Handler
///
/// Revokes the session upstream and clears it locally. A failed revocation
/// still signs the caller out.
#[endpoint(
    tags("auth"),
    summary = "Sign Out",
    responses(
        (status_code = StatusCode::OK, description = "Signed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let holder = depot.session_holder_or_500()?;

    if let Some(session) = holder.current()
        && let Err(source) = state.app.auth.sign_out(session.access_token.expose()).await
    {
        warn!("failed to revoke session: {source}");
    }

    holder.apply(AuthEvent::SignedOut);

    Ok(Json(MessageResponse {
        message: "Signed out.".to_string(),
        next: Some(LOGIN_PATH.to_string()),
        redirect_after_ms: None,
    }))
}
