//! JSONL parsers for Claude Code session files
//!
//! # Error Handling Strategy
//!
//! Parsing degrades gracefully, one level at a time:
//!
//! - **Line level**: a line that is not valid UTF-8, not valid JSON, or not a JSON
//!   object is logged with `tracing::warn!` (file and line number) and skipped. The
//!   conversation built from earlier lines stays valid.
//!
//! - **Record level**: user/assistant records without a parseable timestamp are dropped
//!   silently; they are treated as partial writes, not errors.
//!
//! - **File level**: only failing to open or read the file returns an error
//!   (`anyhow::Result` with context). The loader logs it and moves on to the next file.

pub mod conversation;
pub mod deserializers;
pub mod entry;

pub use conversation::{ParseStats, parse_conversation_file, parse_conversation_reader};
pub use entry::{EntryOutcome, RawEntry, apply_entry};
