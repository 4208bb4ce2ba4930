//! Error types surfaced to callers of the query layer and the CLI.
//!
//! Line- and file-level parse problems never reach this type: they are logged
//! and skipped by the parsers and the loader. `QueryError` covers the outcomes a
//! caller must act on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    /// The projects root does not exist.
    #[error("Projects directory not found: {}", path.display())]
    ProjectsDirNotFound { path: PathBuf },

    /// The projects root exists but produced no conversations.
    #[error("No conversations found in {}", path.display())]
    NoConversations { path: PathBuf },

    /// Lookup by session id found nothing.
    #[error("Conversation not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Output format name that is not one of the known formats.
    #[error("Unknown format: {name}. Valid options: yaml, json, text")]
    UnknownFormat { name: String },

    /// Output format compiled out of this build.
    #[error("{format} output is not available in this build (cargo feature `{feature}` disabled)")]
    FormatUnavailable { format: &'static str, feature: &'static str },

    /// User-supplied date bound that could not be parsed.
    #[error("Invalid date '{input}': expected YYYY-MM-DD, YYYY-MM-DD HH:MM:SS or RFC 3339")]
    InvalidDate { input: String },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("Failed to serialize output: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl QueryError {
    /// Follow-up advice printed under the error message
    pub fn hint(&self) -> Option<String> {
        match self {
            QueryError::ProjectsDirNotFound { .. } | QueryError::NoConversations { .. } => {
                Some("Set --projects-dir or check that conversations exist".to_string())
            }
            QueryError::FormatUnavailable { feature, .. } => {
                Some(format!("Rebuild with `--features {feature}` or pick another --format"))
            }
            QueryError::SessionNotFound { .. } => {
                Some("Use the `list` command to see available session ids".to_string())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_hints() {
        let err = QueryError::ProjectsDirNotFound { path: PathBuf::from("/nope") };
        assert_eq!(err.to_string(), "Projects directory not found: /nope");
        assert!(err.hint().unwrap().contains("--projects-dir"));

        let err = QueryError::FormatUnavailable { format: "yaml", feature: "yaml" };
        assert!(err.to_string().contains("yaml output is not available"));
        assert!(err.hint().unwrap().contains("--features yaml"));

        let err = QueryError::UnknownFormat { name: "xml".to_string() };
        assert_eq!(err.to_string(), "Unknown format: xml. Valid options: yaml, json, text");
        assert!(err.hint().is_none());
    }
}
