//! Server configuration module

use clap::Parser;

use brankas_app::{assistant::GeminiConfig, backend::BackendConfig, context::AppConfig};

use crate::config::{
    assistant::AssistantConfig,
    backend::BackendSettings,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod assistant;
pub(crate) mod backend;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Brankas Kita JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "brankas-json", about = "Brankas Kita JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Hosted database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Hosted auth and edge-function gateway settings.
    #[command(flatten)]
    pub backend: BackendSettings,

    /// Generative assistant settings.
    #[command(flatten)]
    pub assistant: AssistantConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings needed to wire the application services.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            backend: BackendConfig {
                url: self.backend.supabase_url.clone(),
                anon_key: self.backend.supabase_anon_key.clone(),
            },
            gemini: GeminiConfig {
                api_url: self.assistant.gemini_api_url.clone(),
                model: self.assistant.gemini_model.clone(),
                api_key: self
                    .assistant
                    .gemini_api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty()),
            },
            knowledge_base: self.assistant.knowledge_base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 7] = [
        "brankas-json",
        "--database-url",
        "postgres://localhost/brankas",
        "--supabase-url",
        "https://project.example.com",
        "--supabase-anon-key",
        "anon",
    ];

    #[test]
    fn defaults_apply_when_only_required_settings_given() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.backend.site_url, "http://localhost:3000");
        assert!(config.backend.session_cookie_secure);
        assert_eq!(config.assistant.gemini_model, "gemini-2.0-flash");

        Ok(())
    }

    #[test]
    fn blank_gemini_key_counts_as_missing() -> TestResult {
        let args = REQUIRED.into_iter().chain(["--gemini-api-key", "  "]);

        let config = ServerConfig::try_parse_from(args)?;

        assert_eq!(config.app_config().gemini.api_key, None);

        Ok(())
    }

    #[test]
    fn app_config_carries_backend_settings() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        let app = config.app_config();

        assert_eq!(app.database_url, "postgres://localhost/brankas");
        assert_eq!(app.backend.url, "https://project.example.com");
        assert_eq!(app.backend.anon_key, "anon");

        Ok(())
    }
}
