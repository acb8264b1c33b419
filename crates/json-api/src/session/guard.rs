//! Route guard middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{error, info};

use brankas_app::auth::{
    AuthUser, RouteDecision, guard::ADMIN_LOGIN_PATH, guard_route, is_guarded_path,
};

use crate::{extensions::*, state::State};

#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let path = req.uri().path().to_owned();

    if !is_guarded_path(&path) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let user = match depot.session_holder_or_500() {
        Ok(holder) => holder.user(),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let admitted = match guard_route(&path, user.is_some()) {
        RouteDecision::Allow => true,
        RouteDecision::Redirect(target) => {
            info!(path = %path, target, "guard redirect");
            redirect(res, target);

            false
        }
        RouteDecision::RequireAdmin => match admin_check(depot, user).await {
            Ok(true) => true,
            Ok(false) => {
                info!(path = %path, "non-admin session refused");
                redirect(res, ADMIN_LOGIN_PATH);

                false
            }
            Err(error) => {
                res.render(error);

                false
            }
        },
    };

    if admitted {
        ctrl.call_next(req, depot, res).await;
    } else {
        ctrl.skip_rest();
    }
}

async fn admin_check(depot: &Depot, user: Option<AuthUser>) -> Result<bool, StatusError> {
    let Some(user) = user else {
        return Ok(false);
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state.app.users.is_admin(user.uuid).await.map_err(|source| {
        error!("failed to check admin flag: {source}");

        StatusError::internal_server_error()
    })
}

fn redirect(res: &mut Response, target: &str) {
    if let Err(error) = res.redirect_found(target) {
        res.render(error);
    }
}
