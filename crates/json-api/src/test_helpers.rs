//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use brankas_app::{
    assistant::MockAssistantService,
    auth::{AuthUser, MockAuthService, SecretToken, Session, SessionHolder},
    context::AppContext,
    domain::{
        admin::MockAdminService, boxes::MockBoxesService,
        notifications::MockNotificationsService, rentals::MockRentalsService,
        users::{MockUsersService, records::UserUuid},
    },
};

use crate::{
    session,
    state::{State, WebSettings},
};

pub(crate) const TEST_USER_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0x0190_f3a4_3c5e_7b6a_9d2e_1f4c_8b7a_6e5d));

pub(crate) fn test_user() -> AuthUser {
    AuthUser {
        uuid: TEST_USER_UUID,
        email: Some("customer@example.com".to_string()),
        full_name: Some("Siti Rahma".to_string()),
    }
}

/// Value a response sets for cookie `name`; `""` for a removal.
///
/// Only cookies added while handling the request count, not the ones the
/// request itself carried.
pub(crate) fn written_cookie(res: &Response, name: &str) -> Option<String> {
    res.cookies()
        .delta()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
}

pub(crate) fn test_session() -> Session {
    Session {
        access_token: SecretToken::new("access-token"),
        refresh_token: SecretToken::new("refresh-token"),
        expires_at: None,
        user: test_user(),
    }
}

#[handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.inject(SessionHolder::new(Some(test_session())));
    ctrl.call_next(req, depot, res).await;
}

#[handler]
pub(crate) async fn inject_anonymous(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.inject(SessionHolder::anonymous());
    ctrl.call_next(req, depot, res).await;
}

/// Builds a [`State`] from mocks. Services left unset have no expectations,
/// so any call to them fails the test.
pub(crate) struct StateBuilder {
    users: MockUsersService,
    boxes: MockBoxesService,
    rentals: MockRentalsService,
    notifications: MockNotificationsService,
    admin: MockAdminService,
    auth: MockAuthService,
    assistant: MockAssistantService,
    web: WebSettings,
}

impl StateBuilder {
    pub(crate) fn new() -> Self {
        Self {
            users: MockUsersService::new(),
            boxes: MockBoxesService::new(),
            rentals: MockRentalsService::new(),
            notifications: MockNotificationsService::new(),
            admin: MockAdminService::new(),
            auth: MockAuthService::new(),
            assistant: MockAssistantService::new(),
            web: WebSettings::default(),
        }
    }

    pub(crate) fn users(mut self, users: MockUsersService) -> Self {
        self.users = users;
        self
    }

    pub(crate) fn boxes(mut self, boxes: MockBoxesService) -> Self {
        self.boxes = boxes;
        self
    }

    pub(crate) fn rentals(mut self, rentals: MockRentalsService) -> Self {
        self.rentals = rentals;
        self
    }

    pub(crate) fn notifications(mut self, notifications: MockNotificationsService) -> Self {
        self.notifications = notifications;
        self
    }

    pub(crate) fn admin(mut self, admin: MockAdminService) -> Self {
        self.admin = admin;
        self
    }

    pub(crate) fn auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn assistant(mut self, assistant: MockAssistantService) -> Self {
        self.assistant = assistant;
        self
    }

    pub(crate) fn build(self) -> Arc<State> {
        let app = AppContext {
            users: Arc::new(self.users),
            boxes: Arc::new(self.boxes),
            rentals: Arc::new(self.rentals),
            notifications: Arc::new(self.notifications),
            admin: Arc::new(self.admin),
            auth: Arc::new(self.auth),
            assistant: Arc::new(self.assistant),
        };

        State::from_app_context(app, self.web)
    }

    /// Serve `route` to a signed-in test user.
    pub(crate) fn signed_in(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.build()))
                .hoop(inject_session)
                .push(route),
        )
    }

    /// Serve `route` to an anonymous caller.
    pub(crate) fn anonymous(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.build()))
                .hoop(inject_anonymous)
                .push(route),
        )
    }

    /// Serve `route` behind the real session middleware, so session changes
    /// show up as cookies on the response.
    pub(crate) fn with_session_middleware(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.build()))
                .hoop(session::middleware::handler)
                .push(route),
        )
    }
}
