//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use brankas_app::auth::{AuthUser, Session, SessionHolder};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The request's session holder, installed by the session middleware.
    fn session_holder_or_500(&self) -> Result<&SessionHolder, StatusError>;

    fn session_or_401(&self) -> Result<Session, StatusError>;

    fn user_or_401(&self) -> Result<AuthUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn session_holder_or_500(&self) -> Result<&SessionHolder, StatusError> {
        self.obtain_or_500::<SessionHolder>()
    }

    fn session_or_401(&self) -> Result<Session, StatusError> {
        self.session_holder_or_500()?
            .current()
            .ok_or_else(|| StatusError::unauthorized().brief("Please sign in to continue."))
    }

    fn user_or_401(&self) -> Result<AuthUser, StatusError> {
        self.session_or_401().map(|session| session.user)
    }
}
