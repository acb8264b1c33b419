//! Assistant chat models.

use serde::{Deserialize, Serialize};

/// A chat turn as sent by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        self.role == "system"
    }
}

/// Role understood by the generative API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    User,
    Model,
}

impl ContentRole {
    /// `user` stays `user`; every other role is sent as `model`.
    #[must_use]
    pub fn from_chat_role(role: &str) -> Self {
        if role == "user" { Self::User } else { Self::Model }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    pub text: String,
}

/// One entry of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: ContentRole,
    pub parts: Vec<ContentPart>,
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: ContentRole::from_chat_role(&message.role),
            parts: vec![ContentPart {
                text: message.content.clone(),
            }],
        }
    }
}

/// Report analyst reply, rendered for display as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportReply {
    pub reply: String,
    pub reply_html: String,
}
