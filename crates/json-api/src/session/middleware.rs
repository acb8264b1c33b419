//! Session middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{info, warn};

use brankas_app::auth::{AuthEvent, AuthService, SecretToken, Session, SessionHolder};

use crate::{
    extensions::*,
    observability::{RefreshOutcome, observe_session_refresh},
    session::cookies::{self, PresentedTokens},
    state::State,
};

/// How the presented tokens resolved.
#[derive(Debug)]
pub(crate) enum Resolution {
    /// Nothing presented.
    Anonymous,

    /// The access token is valid as presented.
    Valid(Session),

    /// The access token was rejected but the refresh token produced a new session.
    Refreshed(Session),

    /// The tokens were rejected; any auth cookies are stale.
    Rejected,

    /// The auth service could not be reached; the request proceeds anonymously
    /// and the cookies are kept.
    Unavailable,
}

/// Validate the presented tokens, making at most one refresh attempt.
pub(crate) async fn resolve(auth: &dyn AuthService, tokens: PresentedTokens) -> Resolution {
    if tokens.is_empty() {
        return Resolution::Anonymous;
    }

    if let Some(access) = tokens.access {
        match auth.get_user(access.expose()).await {
            Ok(user) => {
                return Resolution::Valid(Session {
                    access_token: access,
                    refresh_token: tokens.refresh.unwrap_or_else(|| SecretToken::new("")),
                    expires_at: None,
                    user,
                });
            }
            Err(error) if !error.is_rejection() => {
                warn!("could not validate access token: {error}");

                return Resolution::Unavailable;
            }
            Err(_) => {}
        }
    }

    let Some(refresh) = tokens.refresh else {
        return Resolution::Rejected;
    };

    match auth.refresh_session(refresh.expose()).await {
        Ok(session) => {
            observe_session_refresh(RefreshOutcome::Refreshed);

            Resolution::Refreshed(session)
        }
        Err(error) => {
            observe_session_refresh(RefreshOutcome::SignedOut);
            info!("session refresh failed: {error}");

            Resolution::Rejected
        }
    }
}

#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let tokens = PresentedTokens::from_request(req);
    let stale_cookies = tokens.from_cookies;

    let (initial, event) = match resolve(state.app.auth.as_ref(), tokens).await {
        Resolution::Valid(session) => (Some(session), None),
        Resolution::Refreshed(session) => (None, Some(AuthEvent::TokenRefreshed(session))),
        Resolution::Rejected => (None, Some(AuthEvent::SignedOut)),
        Resolution::Anonymous | Resolution::Unavailable => (None, None),
    };

    let clear_on_exit = stale_cookies && matches!(event, Some(AuthEvent::SignedOut));

    let holder = SessionHolder::new(initial);
    let mut subscription = holder.subscribe();

    if let Some(event) = event {
        holder.apply(event);
    }

    depot.inject(holder.clone());

    ctrl.call_next(req, depot, res).await;

    let secure = state.web.secure_cookies;

    if subscription.has_changed() {
        cookies::persist(res, subscription.latest().as_ref(), secure);
    } else if clear_on_exit {
        cookies::clear(res, secure);
    }
}
