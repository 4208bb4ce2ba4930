//! AI History Query - filter, search and export Claude Code conversation logs
//!
//! Claude Code stores every session as a JSONL file under
//! `~/.claude/projects/<encoded-project>/<session-id>.jsonl`. This library:
//!
//! - Parses session files into [`Conversation`]s of typed [`Message`]s
//! - Classifies user messages as human-authored, system noise or meta-communication
//! - Filters, searches and sorts conversations with [`QueryEngine`]
//! - Renders results as JSON, YAML or text
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use ai_history_query::{ProjectPathDecoder, QueryEngine, load_conversations};
//!
//! let projects_dir = Path::new("/Users/alice/.claude/projects");
//! let conversations = load_conversations(projects_dir, &ProjectPathDecoder::from_env())?;
//!
//! let engine = QueryEngine::new(&conversations);
//! for conversation in engine.search_content("git hooks", false) {
//!     println!("{} ({} messages)", conversation.session_id, conversation.message_count());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod formatters;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod query;
pub mod utils;

pub use error::QueryError;
pub use formatters::{Formatter, OutputFormat, get_formatter};
pub use loader::load_conversations;
pub use models::{Conversation, Message, MessageContent, Role};
pub use parsers::parse_conversation_file;
pub use query::{ConversationQuery, QueryEngine};
pub use utils::paths::{ProjectPathDecoder, encode_project_dir_name};
