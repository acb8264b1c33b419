//! State

use std::sync::Arc;

use brankas_app::context::AppContext;

use crate::config::ServerConfig;

/// Settings of the web layer itself, outside the application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WebSettings {
    /// Public origin, e.g. `"https://brankas.example.com"`.
    pub(crate) site_url: String,

    /// Whether auth cookies carry the `Secure` attribute.
    pub(crate) secure_cookies: bool,
}

impl WebSettings {
    pub(crate) fn from_config(config: &ServerConfig) -> Self {
        Self {
            site_url: config.backend.site_url.clone(),
            secure_cookies: config.backend.session_cookie_secure,
        }
    }

    /// Absolute URL of a page on this site.
    pub(crate) fn page_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            secure_cookies: true,
        }
    }
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) web: WebSettings,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, web: WebSettings) -> Self {
        Self { app, web }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, web: WebSettings) -> Arc<Self> {
        Arc::new(Self::new(app, web))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_joins_origin_and_path() {
        let web = WebSettings {
            site_url: "https://brankas.example.com/".to_string(),
            secure_cookies: true,
        };

        assert_eq!(
            web.page_url("/update-password"),
            "https://brankas.example.com/update-password"
        );
    }
}
