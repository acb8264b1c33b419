//! Hosted backend endpoints.

/// Connection details for the hosted backend's HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project URL, e.g. `"https://abc.supabase.co"`.
    pub url: String,

    /// Public (anon) API key sent with every gateway request.
    pub anon_key: String,
}

impl BackendConfig {
    /// Join `path` onto the project URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = BackendConfig {
            url: "https://project.example.com/".to_string(),
            anon_key: "anon".to_string(),
        };

        assert_eq!(
            config.endpoint("/auth/v1/user"),
            "https://project.example.com/auth/v1/user"
        );
        assert_eq!(
            config.endpoint("functions/v1/send-email"),
            "https://project.example.com/functions/v1/send-email"
        );
    }
}
