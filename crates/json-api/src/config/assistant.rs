//! Assistant Config

use std::path::PathBuf;

use clap::Args;

/// Generative-language API settings.
#[derive(Debug, Args)]
pub struct AssistantConfig {
    /// API key; the assistant endpoints report an error without one
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Model name
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    /// API base URL
    #[arg(
        long,
        env = "GEMINI_API_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_api_url: String,

    /// Help-desk knowledge base file
    #[arg(long = "knowledge-base", env = "ASSISTANT_KNOWLEDGE_BASE")]
    pub knowledge_base: Option<PathBuf>,
}
