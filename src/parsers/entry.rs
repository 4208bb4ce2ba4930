//! Single-record dispatch: one decoded JSONL line updates one [`Conversation`].

use serde::Deserialize;
use serde_json::{Map, Value};

use super::deserializers::{lenient_flag, lenient_string, timestamp_from_value};
use crate::models::{Conversation, Message, MessageContent, Role};

const ENTRY_TYPE_SUMMARY: &str = "summary";
const ENTRY_TYPE_SNAPSHOT: &str = "snapshot";
const SNAPSHOT_METADATA_KEY: &str = "snapshot";

/// One line of a session file, with every field optional and loosely typed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntry {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub entry_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub leaf_uuid: Option<String>,
    pub snapshot: Option<Value>,
    #[serde(deserialize_with = "lenient_flag")]
    pub is_meta: bool,
    pub message: Option<Value>,
    pub timestamp: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub uuid: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub parent_uuid: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub request_id: Option<String>,
    pub thinking_metadata: Option<Value>,
}

/// What [`apply_entry`] did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    SummaryUpdated,
    SnapshotStored,
    MessageAppended,
    /// `isMeta` records (injected docs and context)
    SkippedMeta,
    /// user/assistant record without a usable timestamp
    DroppedNoTimestamp,
    /// Unknown or missing `type`
    Ignored,
}

/// Apply one record to the conversation being built
///
/// - `summary`: replaces summary and leaf id (last one wins)
/// - `snapshot`: stored under `metadata["snapshot"]`
/// - `user` / `assistant`: appended as a [`Message`] unless flagged `isMeta` or
///   missing a parseable timestamp
/// - anything else: ignored
pub fn apply_entry(conversation: &mut Conversation, entry: RawEntry) -> EntryOutcome {
    let entry_type = match entry.entry_type.as_deref() {
        Some(t) => t,
        None => return EntryOutcome::Ignored,
    };

    if entry_type == ENTRY_TYPE_SUMMARY {
        conversation.summary = entry.summary;
        conversation.leaf_id = entry.leaf_uuid;
        return EntryOutcome::SummaryUpdated;
    }

    if entry_type == ENTRY_TYPE_SNAPSHOT {
        let snapshot = entry.snapshot.unwrap_or_else(|| Value::Object(Map::new()));
        conversation.metadata.insert(SNAPSHOT_METADATA_KEY.to_string(), snapshot);
        return EntryOutcome::SnapshotStored;
    }

    let Some(entry_role) = Role::parse(entry_type) else {
        return EntryOutcome::Ignored;
    };

    if entry.is_meta {
        return EntryOutcome::SkippedMeta;
    }

    let Some(timestamp) = timestamp_from_value(entry.timestamp.as_ref()) else {
        return EntryOutcome::DroppedNoTimestamp;
    };

    let mut payload = match entry.message {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let role =
        payload.get("role").and_then(Value::as_str).and_then(Role::parse).unwrap_or(entry_role);
    let content = payload.remove("content").map(MessageContent::from_value).unwrap_or_default();

    let thinking_metadata = match entry.thinking_metadata {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    };

    conversation.push_message(Message {
        timestamp,
        role,
        content,
        id: entry.uuid,
        parent_id: entry.parent_uuid,
        request_id: entry.request_id,
        thinking_metadata,
    });

    EntryOutcome::MessageAppended
}
