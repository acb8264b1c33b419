//! Assistant service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::assistant::{
    AssistantError, ChatMessage, Content, ContentPart, ContentRole, GenerativeModel,
    KnowledgeBase, ReportReply, markdown::render_markdown,
};

/// Reply used when the help chat gets no candidate back.
pub const HELP_FALLBACK_REPLY: &str = "Maaf, terjadi kesalahan.";

/// Reply used when the report analyst gets no candidate back.
pub const REPORT_FALLBACK_REPLY: &str = "Sorry, I could not process that request.";

/// Opening question the report page asks when a report is loaded.
pub const REPORT_SUMMARY_PROMPT: &str =
    "Please provide a concise summary of this weekly report with one key recommendation.";

#[automock]
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Whether a generative API key is available.
    fn is_configured(&self) -> bool;

    /// Answer a customer's help-desk conversation.
    ///
    /// System messages supplied by the client are discarded.
    async fn help_chat(&self, messages: Vec<ChatMessage>) -> Result<String, AssistantError>;

    /// Answer an admin's questions about a weekly report.
    async fn report_chat(
        &self,
        report: Value,
        messages: Vec<ChatMessage>,
    ) -> Result<ReportReply, AssistantError>;
}

pub struct GeminiAssistantService {
    model: Arc<dyn GenerativeModel>,
    knowledge: KnowledgeBase,
}

impl GeminiAssistantService {
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>, knowledge: KnowledgeBase) -> Self {
        Self { model, knowledge }
    }

    fn help_prompt(&self) -> String {
        format!(
            "Here is the BrankasKita knowledge base:\n{}\n\
             Study this data and use it to answer the user's questions. For every \
             question, first understand its context, then give a relevant answer based \
             on the data above. Reply in clear and correct English.",
            self.knowledge.as_str()
        )
    }
}

impl std::fmt::Debug for GeminiAssistantService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAssistantService")
            .field("knowledge_len", &self.knowledge.as_str().len())
            .finish_non_exhaustive()
    }
}

fn report_prompt(report: &Value) -> String {
    format!(
        "You are a helpful business analyst for \"Brankas Kita\". Analyze this weekly \
         report and answer questions.\nReport Data: {report}"
    )
}

fn system_content(text: String) -> Content {
    Content {
        role: ContentRole::from_chat_role("system"),
        parts: vec![ContentPart { text }],
    }
}

#[async_trait]
impl AssistantService for GeminiAssistantService {
    fn is_configured(&self) -> bool {
        self.model.is_configured()
    }

    async fn help_chat(&self, messages: Vec<ChatMessage>) -> Result<String, AssistantError> {
        let contents = std::iter::once(system_content(self.help_prompt()))
            .chain(
                messages
                    .iter()
                    .filter(|message| !message.is_system())
                    .map(Content::from),
            )
            .collect();

        let reply = self.model.generate(contents).await?;

        Ok(reply.unwrap_or_else(|| HELP_FALLBACK_REPLY.to_string()))
    }

    async fn report_chat(
        &self,
        report: Value,
        messages: Vec<ChatMessage>,
    ) -> Result<ReportReply, AssistantError> {
        let contents = std::iter::once(system_content(report_prompt(&report)))
            .chain(messages.iter().map(Content::from))
            .collect();

        let reply = self
            .model
            .generate(contents)
            .await?
            .unwrap_or_else(|| REPORT_FALLBACK_REPLY.to_string());

        Ok(ReportReply {
            reply_html: render_markdown(&reply),
            reply,
        })
    }
}
