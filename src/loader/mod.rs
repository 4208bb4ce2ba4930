//! Discovery and loading of session files
//!
//! # Error Handling Strategy
//!
//! - **Missing root**: a projects directory that does not exist is the only fatal
//!   condition here ([`crate::QueryError::ProjectsDirNotFound`]).
//!
//! - **Project-level failures**: unreadable directory entries are logged and skipped.
//!
//! - **File-level failures**: a session file that cannot be opened or read is logged
//!   with `tracing::warn!` and omitted; the remaining files still load.
//!
//! - **Parser integration**: line-level problems are handled inside
//!   [`crate::parsers`] and never reach the loader.

pub mod builder;
pub mod project_discovery;

pub use builder::load_conversations;
pub use project_discovery::discover_projects;
