//! Session holder
//!
//! One holder is created per request. It is the only owner of the current
//! session; the auth flows report changes through [`SessionHolder::apply`] and
//! interested parties observe them through a [`SessionSubscription`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::auth::{AuthUser, Session};

/// A change reported by an auth flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    TokenRefreshed(Session),
    UserUpdated(AuthUser),
    SignedOut,
}

/// Single source of truth for the current session.
#[derive(Debug, Clone)]
pub struct SessionHolder {
    sender: Arc<watch::Sender<Option<Session>>>,
}

impl SessionHolder {
    #[must_use]
    pub fn new(initial: Option<Session>) -> Self {
        let (sender, _receiver) = watch::channel(initial);

        Self {
            sender: Arc::new(sender),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<AuthUser> {
        self.sender
            .borrow()
            .as_ref()
            .map(|session| session.user.clone())
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Apply an auth event. Returns whether the stored session changed.
    ///
    /// `UserUpdated` without a session is ignored.
    pub fn apply(&self, event: AuthEvent) -> bool {
        self.sender.send_if_modified(|current| match event {
            AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => {
                if current.as_ref() == Some(&session) {
                    return false;
                }

                *current = Some(session);

                true
            }
            AuthEvent::UserUpdated(user) => match current {
                Some(session) if session.user != user => {
                    session.user = user;

                    true
                }
                _ => false,
            },
            AuthEvent::SignedOut => current.take().is_some(),
        })
    }

    /// Observe future changes. Dropping the subscription unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SessionHolder {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[derive(Debug)]
pub struct SessionSubscription {
    receiver: watch::Receiver<Option<Session>>,
}

impl SessionSubscription {
    /// Whether the session changed since the subscription was created or last read.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Latest session, marking it as seen.
    pub fn latest(&mut self) -> Option<Session> {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next change. Returns `None` once the holder is gone.
    pub async fn changed(&mut self) -> Option<Option<Session>> {
        self.receiver.changed().await.ok()?;

        Some(self.latest())
    }
}
