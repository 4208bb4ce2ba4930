use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use super::message::{Message, Role};

/// Maximum length (in characters) of the first-user-message preview
pub const PREVIEW_MAX_CHARS: usize = 100;

const PREVIEW_ELLIPSIS: &str = "...";

/// One session file: its messages in source order plus session-level metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub session_id: String,
    pub project_path: String,
    pub file_path: PathBuf,
    pub summary: Option<String>,
    pub leaf_id: Option<String>,
    pub messages: Vec<Message>,
    pub metadata: BTreeMap<String, Value>,
}

impl Conversation {
    pub fn new(
        session_id: impl Into<String>,
        project_path: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            project_path: project_path.into(),
            file_path: file_path.into(),
            summary: None,
            leaf_id: None,
            messages: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Timestamp of the first message in source order
    pub fn started(&self) -> Option<DateTime<FixedOffset>> {
        self.messages.first().map(|m| m.timestamp)
    }

    /// Timestamp of the last message in source order
    pub fn last_activity(&self) -> Option<DateTime<FixedOffset>> {
        self.messages.last().map(|m| m.timestamp)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn user_message_count(&self) -> usize {
        self.count_role(Role::User)
    }

    pub fn assistant_message_count(&self) -> usize {
        self.count_role(Role::Assistant)
    }

    fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }

    /// Text of the first user message, cut to [`PREVIEW_MAX_CHARS`] characters
    /// with `...` appended when it was longer
    pub fn first_user_preview(&self) -> Option<String> {
        let message = self.messages.iter().find(|m| m.role == Role::User)?;
        let text = message.text_content();

        match text.char_indices().nth(PREVIEW_MAX_CHARS) {
            Some((cut, _)) => Some(format!("{}{}", &text[..cut], PREVIEW_ELLIPSIS)),
            None => Some(text.into_owned()),
        }
    }
}
