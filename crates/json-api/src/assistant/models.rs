//! Assistant Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use brankas_app::assistant::ChatMessage;

/// Help-desk reply, also used for its error messages.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    pub(crate) fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Report analyst reply with a sanitised HTML rendering.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportChatReply {
    pub reply: String,
    pub reply_html: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AssistantErrorBody {
    pub error: String,
}

impl AssistantErrorBody {
    pub(crate) fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// The `messages` array of a request body, `None` when missing or malformed.
pub(crate) fn chat_messages(body: &Value) -> Option<Vec<ChatMessage>> {
    body.get("messages")
        .filter(|messages| messages.is_array())
        .and_then(|messages| serde_json::from_value(messages.clone()).ok())
}
