//! Data models for Claude Code conversation logs.
//!
//! - [`Message`] - One turn, with text extraction and noise/meta classification
//! - [`Conversation`] - All messages of one session file plus derived statistics
//! - [`ProjectInfo`] - Discovered project directory and its session files
//!
//! Message bodies are modelled as [`MessageContent`] (plain text or a list of
//! [`ContentBlock`]s) so every consumer matches on variants instead of probing JSON.

pub mod conversation;
pub mod message;
pub mod project;

pub use conversation::{Conversation, PREVIEW_MAX_CHARS};
pub use message::{ContentBlock, Message, MessageContent, Role};
pub use project::ProjectInfo;
