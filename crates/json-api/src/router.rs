//! App Router

use salvo::Router;

use crate::{admin, assistant, auth, boxes, notifications, profile, rentals, session};

fn auth_routes() -> Vec<Router> {
    vec![
        Router::with_path("login").post(auth::login::handler),
        Router::with_path("register").post(auth::register::handler),
        Router::with_path("forgot-password").post(auth::forgot_password::handler),
        Router::with_path("update-password").post(auth::update_password::handler),
        Router::with_path("logout").post(auth::logout::handler),
        Router::with_path("auth/callback").get(auth::callback::handler),
    ]
}

fn rental_routes() -> Vec<Router> {
    use rentals::handlers as r;

    vec![
        Router::with_path("booking")
            .get(r::booking_form::handler)
            .post(r::book::handler),
        Router::with_path("payment")
            .get(r::payment_form::handler)
            .post(r::pay::handler),
        Router::with_path("set-pin")
            .get(r::pin_form::handler)
            .post(r::set_pin::handler),
        Router::with_path("confirmation").get(r::confirmation::handler),
        Router::with_path("my-orders").get(r::orders::handler),
        Router::with_path("see-details").get(r::details::handler),
        Router::with_path("extend-duration")
            .get(r::extension_form::handler)
            .post(r::extend::handler),
    ]
}

fn admin_router() -> Router {
    use admin::handlers as a;

    Router::with_path("admin")
        .push(Router::with_path("login").post(auth::admin_login::handler))
        .push(Router::with_path("dashboard").get(a::dashboard::handler))
        .push(
            Router::with_path("customers")
                .get(a::customers::handler)
                .push(Router::with_path("{customer}").delete(a::delete_customer::handler)),
        )
        .push(
            Router::with_path("rentals")
                .get(a::rentals::handler)
                .push(Router::with_path("{rental}/end").post(a::end_rental::handler)),
        )
        .push(
            Router::with_path("boxes")
                .post(boxes::handlers::create::handler)
                .push(Router::with_path("{deposit_box}").put(boxes::handlers::update::handler)),
        )
        .push(Router::with_path("payments").get(a::payments::handler))
        .push(
            Router::with_path("report")
                .get(a::reports::handler)
                .push(Router::with_path("{report}").get(a::report::handler)),
        )
}

/// Every application route, behind the session middleware and the route guard.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(session::middleware::handler)
        .hoop(session::guard::handler)
        .get(boxes::handlers::index::handler)
        .append(&mut auth_routes())
        .append(&mut rental_routes())
        .push(
            Router::with_path("notifications")
                .get(notifications::handlers::index::handler)
                .push(
                    Router::with_path("{notification}/read")
                        .post(notifications::handlers::read::handler),
                ),
        )
        .push(
            Router::with_path("my-profile")
                .get(profile::handlers::get::handler)
                .put(profile::handlers::update::handler),
        )
        .push(admin_router())
        .push(
            Router::with_path("api")
                .push(Router::with_path("gemini").post(assistant::handlers::help_chat::handler))
                .push(
                    Router::with_path("report-ai").post(assistant::handlers::report_chat::handler),
                ),
        )
}
