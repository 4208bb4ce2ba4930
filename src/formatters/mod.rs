//! Output renderers for conversation lists and single conversations
//!
//! Every renderer builds on the records in [`shared`], so role filtering and
//! field selection are identical across formats.

pub mod json;
pub mod shared;
pub mod text;
#[cfg(feature = "yaml")]
pub mod yaml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;

pub use json::JsonFormatter;
pub use shared::{
    ConversationDetail, ConversationList, ConversationListEntry, ConversationRecord,
    MessageRecord, SingleOptions, select_messages,
};
pub use text::TextFormatter;
#[cfg(feature = "yaml")]
pub use yaml::YamlFormatter;

use crate::error::{QueryError, Result};
use crate::models::Conversation;

/// Renders conversations into a printable string
pub trait Formatter {
    fn render_list(&self, conversations: &[&Conversation]) -> Result<String>;

    fn render_single(&self, conversation: &Conversation, options: &SingleOptions)
    -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML (requires the `yaml` cargo feature)
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Format implied by a file name: `.json`, `.yaml` or `.yml`
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// Resolve the renderer, failing early when it was compiled out
    pub fn formatter(self) -> Result<Box<dyn Formatter>> {
        match self {
            OutputFormat::Text => Ok(Box::new(TextFormatter)),
            OutputFormat::Json => Ok(Box::new(JsonFormatter)),
            #[cfg(feature = "yaml")]
            OutputFormat::Yaml => Ok(Box::new(YamlFormatter)),
            #[cfg(not(feature = "yaml"))]
            OutputFormat::Yaml => {
                Err(QueryError::FormatUnavailable { format: "yaml", feature: "yaml" })
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(QueryError::UnknownFormat { name: s.to_string() }),
        }
    }
}

/// Look up a renderer by name (`json`, `yaml` or `text`, any case)
pub fn get_formatter(name: &str) -> Result<Box<dyn Formatter>> {
    name.parse::<OutputFormat>()?.formatter()
}
