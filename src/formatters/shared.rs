//! Serializable records built from conversations
//!
//! JSON and YAML renderers serialize these directly; the text renderer reads
//! the same data so every format shows the same messages.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{Conversation, Message, Role};

/// Timestamps render as RFC 3339 with only as many fractional digits as needed
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Session-level fields shared by list and detail output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub session_id: String,
    pub project: String,
    pub summary: Option<String>,
    pub started: Option<String>,
    pub last_activity: Option<String>,
    pub message_count: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
}

impl ConversationRecord {
    pub fn from_conversation(conversation: &Conversation) -> Self {
        Self {
            session_id: conversation.session_id.clone(),
            project: conversation.project_path.clone(),
            summary: conversation.summary.clone(),
            started: conversation.started().as_ref().map(format_timestamp),
            last_activity: conversation.last_activity().as_ref().map(format_timestamp),
            message_count: conversation.message_count(),
            user_messages: conversation.user_message_count(),
            assistant_messages: conversation.assistant_message_count(),
        }
    }
}

/// One row of `list`/`search` output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationListEntry {
    #[serde(flatten)]
    pub record: ConversationRecord,
    pub first_user_message: Option<String>,
}

impl ConversationListEntry {
    pub fn from_conversation(conversation: &Conversation) -> Self {
        Self {
            record: ConversationRecord::from_conversation(conversation),
            first_user_message: conversation.first_user_preview(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationList {
    pub total: usize,
    pub conversations: Vec<ConversationListEntry>,
}

impl ConversationList {
    pub fn new(conversations: &[&Conversation]) -> Self {
        Self {
            total: conversations.len(),
            conversations: conversations
                .iter()
                .map(|c| ConversationListEntry::from_conversation(c))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub timestamp: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<Map<String, Value>>,
}

impl MessageRecord {
    pub fn from_message(message: &Message) -> Self {
        Self {
            timestamp: format_timestamp(&message.timestamp),
            role: message.role,
            content: message.text_content().into_owned(),
            thinking: message.thinking_metadata.clone().filter(|thinking| !thinking.is_empty()),
        }
    }
}

/// Output of `get`, `export` and each element of `batch`
///
/// `messages` is absent when messages were not requested; the filter fields
/// appear only when a role filter was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub record: ConversationRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<MessageRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_message_count: Option<usize>,
}

impl ConversationDetail {
    pub fn new(conversation: &Conversation, options: &SingleOptions) -> Self {
        let record = ConversationRecord::from_conversation(conversation);
        if !options.include_messages {
            return Self { record, messages: None, filtered_role: None, filtered_message_count: None };
        }

        let messages: Vec<MessageRecord> = select_messages(conversation, options.role_filter)
            .into_iter()
            .map(MessageRecord::from_message)
            .collect();

        Self {
            record,
            filtered_role: options.role_filter,
            filtered_message_count: options.role_filter.map(|_| messages.len()),
            messages: Some(messages),
        }
    }
}

/// What to render for a single conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleOptions {
    pub include_messages: bool,
    pub role_filter: Option<Role>,
}

impl Default for SingleOptions {
    fn default() -> Self {
        Self { include_messages: true, role_filter: None }
    }
}

/// Messages matching `role_filter`, in source order
///
/// Filtering to [`Role::User`] keeps only human-authored messages: noise and
/// meta messages are dropped as well.
pub fn select_messages(conversation: &Conversation, role_filter: Option<Role>) -> Vec<&Message> {
    conversation
        .messages
        .iter()
        .filter(|message| match role_filter {
            None => true,
            Some(Role::User) => message.is_human_authored(),
            Some(role) => message.role == role,
        })
        .collect()
}
