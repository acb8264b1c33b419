//! Route guard

/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/forgot-password",
    "/update-password",
    "/auth/callback",
    "/admin/login",
];

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const HOME_PATH: &str = "/";

const UNGUARDED_PREFIXES: &[&str] = &["/api/", "/docs", "/api-doc"];
const UNGUARDED_PATHS: &[&str] = &["/healthcheck", "/metrics"];

/// What to do with a request before it reaches its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),

    /// The caller has a session, but the path also needs the admin flag.
    RequireAdmin,
}

/// Whether the guard applies to `path` at all.
///
/// API routes, operational endpoints and static assets are left alone.
#[must_use]
pub fn is_guarded_path(path: &str) -> bool {
    if UNGUARDED_PATHS.contains(&path)
        || UNGUARDED_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
    {
        return false;
    }

    let last_segment = path.rsplit('/').next().unwrap_or_default();

    !last_segment.contains('.')
}

/// Decide access for `path` given whether the caller has a session.
#[must_use]
pub fn guard_route(path: &str, has_session: bool) -> RouteDecision {
    let path = normalize(path);
    let public = PUBLIC_PATHS.contains(&path);

    if has_session && (path == "/login" || path == "/register") {
        return RouteDecision::Redirect(HOME_PATH);
    }

    if public {
        return RouteDecision::Allow;
    }

    match (has_session, is_admin_path(path)) {
        (false, true) => RouteDecision::Redirect(ADMIN_LOGIN_PATH),
        (false, false) => RouteDecision::Redirect(LOGIN_PATH),
        (true, true) => RouteDecision::RequireAdmin,
        (true, false) => RouteDecision::Allow,
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() { "/" } else { trimmed }
}

fn is_admin_path(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}
