//! Filtering, searching and sorting of loaded conversations
//!
//! [`QueryEngine`] provides the individual operations; [`ConversationQuery`]
//! combines them the way the `list` and `search` commands need.

pub mod criteria;
pub mod dates;
pub mod engine;

pub use criteria::{ConversationQuery, SearchTerm};
pub use dates::parse_date_bound;
pub use engine::QueryEngine;
