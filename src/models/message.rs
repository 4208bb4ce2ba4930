use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Substrings that mark system-generated content in user-role messages
const NOISE_MARKERS: [&str; 7] = [
    "<command-message>",
    "<command-name>",
    "<command-args>",
    "<system-reminder>",
    "<local-command-stdout>",
    "<local-command-stderr>",
    "[Request interrupted by user",
];

/// Prefixes of handoff prompts, continuation summaries and compaction notices
const META_PREFIXES: [&str; 8] = [
    "Context window compaction imminent",
    "This session is being continued from a previous conversation",
    "The conversation is summarized below:",
    "Analysis:",
    "Looking at this conversation chronologically:",
    "## Immediate Handoff",
    "## Relevant Context",
    "Summary:",
];

/// Section headers of generated handoff documents
const HANDOFF_MARKERS: [&str; 3] = ["## Immediate Handoff", "## Relevant Context", "## Key Details"];

/// Messages longer than this (in characters) are checked for handoff markers
const HANDOFF_MIN_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Parse the role names used in session files (`user` / `assistant`)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a block-sequence message body
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// `{"type":"text","text":...}`
    Text { text: String },
    /// `{"type":"tool_use","name":...}`
    ToolUse { name: Option<String> },
    /// `{"type":"tool_result",...}`, payload kept as-is
    ToolResult(Value),
    /// A bare string element inside the block array
    Bare(String),
    /// Any other block (thinking, image, ...)
    Opaque(Value),
}

impl ContentBlock {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => ContentBlock::Bare(s),
            Value::Object(map) => match map.get("type").and_then(Value::as_str) {
                Some("text") => ContentBlock::Text {
                    text: map.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
                },
                Some("tool_use") => ContentBlock::ToolUse {
                    name: map.get("name").and_then(Value::as_str).map(str::to_string),
                },
                Some("tool_result") => ContentBlock::ToolResult(Value::Object(map)),
                _ => ContentBlock::Opaque(Value::Object(map)),
            },
            other => ContentBlock::Opaque(other),
        }
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, ContentBlock::ToolResult(_))
    }

    /// Text this block contributes to the flattened message, if any
    fn text_part(&self) -> Option<Cow<'_, str>> {
        match self {
            ContentBlock::Text { text } => Some(Cow::Borrowed(text)),
            ContentBlock::ToolUse { name } => {
                Some(Cow::Owned(format!("[Tool: {}]", name.as_deref().unwrap_or("unknown"))))
            }
            ContentBlock::Bare(s) => Some(Cow::Borrowed(s)),
            ContentBlock::ToolResult(_) | ContentBlock::Opaque(_) => None,
        }
    }
}

/// Message body: either a plain string or an ordered list of typed blocks
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    /// Any other JSON shape, rendered through its JSON representation
    Other(Value),
}

impl MessageContent {
    /// Build content from the raw `message.content` value
    ///
    /// `null` is treated like a missing body (empty text).
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => MessageContent::Text(String::new()),
            Value::String(s) => MessageContent::Text(s),
            Value::Array(items) => {
                MessageContent::Blocks(items.into_iter().map(ContentBlock::from_value).collect())
            }
            other => MessageContent::Other(other),
        }
    }

    /// Flattened textual representation of the body
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            MessageContent::Text(s) => Cow::Borrowed(s),
            MessageContent::Blocks(blocks) => Cow::Owned(
                blocks.iter().filter_map(ContentBlock::text_part).collect::<Vec<_>>().join("\n"),
            ),
            MessageContent::Other(value) => Cow::Owned(value.to_string()),
        }
    }

    pub fn has_tool_result(&self) -> bool {
        match self {
            MessageContent::Blocks(blocks) => blocks.iter().any(ContentBlock::is_tool_result),
            _ => false,
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

/// A single conversational turn reconstructed from a session file
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub timestamp: DateTime<FixedOffset>,
    pub role: Role,
    pub content: MessageContent,
    pub id: Option<String>,
    pub parent_id: Option<String>,
    pub request_id: Option<String>,
    pub thinking_metadata: Option<Map<String, Value>>,
}

impl Message {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        role: Role,
        content: impl Into<MessageContent>,
    ) -> Self {
        Self {
            timestamp,
            role,
            content: content.into(),
            id: None,
            parent_id: None,
            request_id: None,
            thinking_metadata: None,
        }
    }

    /// Flattened text: plain strings verbatim, block text joined by newlines,
    /// tool calls as `[Tool: <name>]`
    pub fn text_content(&self) -> Cow<'_, str> {
        self.content.text()
    }

    /// System-generated content: tool results, slash-command expansions,
    /// system reminders, local command output and interruption notices
    pub fn is_noise(&self) -> bool {
        if self.content.has_tool_result() {
            return true;
        }

        let text = self.text_content();
        NOISE_MARKERS.iter().any(|marker| text.contains(marker))
    }

    /// Meta-communication about the conversation itself: slash commands,
    /// handoff prompts and continuation summaries
    pub fn is_meta(&self) -> bool {
        let text = self.text_content();
        let trimmed = text.trim();

        if trimmed.starts_with('/') {
            return true;
        }

        if META_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
            return true;
        }

        trimmed.chars().count() > HANDOFF_MIN_CHARS
            && HANDOFF_MARKERS.iter().any(|marker| trimmed.contains(marker))
    }

    /// A user message typed by a human (neither noise nor meta)
    pub fn is_human_authored(&self) -> bool {
        self.role == Role::User && !self.is_noise() && !self.is_meta()
    }
}
