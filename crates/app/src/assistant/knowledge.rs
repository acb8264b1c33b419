//! Help-desk knowledge base.

use std::{fs, io::ErrorKind, path::Path};

use tracing::warn;

/// Raw knowledge-base text embedded into the help-chat prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase(String);

impl KnowledgeBase {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Read the knowledge base from `path`. An unreadable file yields an empty base.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self(text),
            Err(error) if error.kind() == ErrorKind::NotFound => Self::default(),
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to read knowledge base");

                Self::default()
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
