//! Backend Config

use clap::Args;

/// Hosted auth service and edge-function gateway settings.
#[derive(Debug, Args)]
pub struct BackendSettings {
    /// Hosted backend project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// Public (anon) API key of the hosted backend
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: String,

    /// Public origin of the site, used for password-recovery redirects
    #[arg(long, env = "SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: String,

    /// Mark session cookies `Secure`
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub session_cookie_secure: bool,
}
