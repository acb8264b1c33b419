//! Generative-language API client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::assistant::{AssistantError, Content};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "**redacted**"))
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

#[automock]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn is_configured(&self) -> bool;

    /// Generate a reply. `None` when the API returned no usable candidate.
    async fn generate(&self, contents: Vec<Content>) -> Result<Option<String>, AssistantError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_reply(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    async fn generate(&self, contents: Vec<Content>) -> Result<Option<String>, AssistantError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AssistantError::NotConfigured)?;

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", key)])
            .json(&GenerateContentRequest { contents })
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(AssistantError::Upstream(text));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        Ok(parsed.into_reply())
    }
}
