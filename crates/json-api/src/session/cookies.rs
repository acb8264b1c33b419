//! Auth cookies.

use salvo::{
    http::cookie::{Cookie, SameSite},
    prelude::{Request, Response},
};

use brankas_app::auth::{SecretToken, Session};

pub(crate) const ACCESS_TOKEN_COOKIE: &str = "brankas-access-token";
pub(crate) const REFRESH_TOKEN_COOKIE: &str = "brankas-refresh-token";

/// Tokens presented by the client.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PresentedTokens {
    pub(crate) access: Option<SecretToken>,
    pub(crate) refresh: Option<SecretToken>,

    /// Whether any auth cookie was sent, i.e. whether there is something to clear.
    pub(crate) from_cookies: bool,
}

impl PresentedTokens {
    /// Bearer header first, then the access-token cookie.
    pub(crate) fn from_request(req: &Request) -> Self {
        let cookie_access = cookie_token(req, ACCESS_TOKEN_COOKIE);
        let refresh = cookie_token(req, REFRESH_TOKEN_COOKIE);
        let from_cookies = cookie_access.is_some() || refresh.is_some();

        Self {
            access: bearer_token(req).or(cookie_access),
            refresh,
            from_cookies,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

fn cookie_token(req: &Request, name: &str) -> Option<SecretToken> {
    req.cookie(name)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(SecretToken::new)
}

fn bearer_token(req: &Request) -> Option<SecretToken> {
    let value = req.header::<String>("authorization")?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(SecretToken::new(token))
}

/// Write `session` into the auth cookies, or clear them when it is `None`.
pub(crate) fn persist(res: &mut Response, session: Option<&Session>, secure: bool) {
    match session {
        Some(session) => {
            res.add_cookie(auth_cookie(
                ACCESS_TOKEN_COOKIE,
                session.access_token.expose(),
                secure,
            ));

            if !session.refresh_token.is_empty() {
                res.add_cookie(auth_cookie(
                    REFRESH_TOKEN_COOKIE,
                    session.refresh_token.expose(),
                    secure,
                ));
            }
        }
        None => clear(res, secure),
    }
}

pub(crate) fn clear(res: &mut Response, secure: bool) {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = auth_cookie(name, "", secure);
        cookie.make_removal();

        res.add_cookie(cookie);
    }
}

fn auth_cookie(name: &'static str, value: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value.to_owned()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}
