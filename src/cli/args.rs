use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use crate::formatters::OutputFormat;
use crate::models::Role;
use crate::query::parse_date_bound;

const AFTER_HELP: &str = "\
Examples:
  ai-history-query list
  ai-history-query list --format yaml --since 2025-11-01 --min-messages 30
  ai-history-query get abc123-session-id --format json
  ai-history-query get abc123-session-id --user-only --format yaml
  ai-history-query search \"git hooks\" --format yaml
  ai-history-query export abc123-session-id output.txt
  ai-history-query batch output.json --session-file sessions.txt --user-only

Sentiment analysis workflow:
  ai-history-query list --since 2025-11-01 --min-messages 30 --format json \\
    | jq -r '.conversations[].session_id' | head -20 > sessions.txt
  ai-history-query batch user_messages.json --session-file sessions.txt --user-only";

#[derive(Parser, Debug)]
#[command(name = "ai-history-query")]
#[command(version)]
#[command(about = "Query Claude Code conversation history from JSONL session files", long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Projects directory [default: ~/.claude/projects]
    #[arg(long, global = true, env = "CLAUDE_PROJECTS_DIR", value_name = "DIR")]
    pub projects_dir: Option<PathBuf>,

    /// Log level; RUST_LOG takes precedence when set
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Worker threads for parsing session files (default: number of CPUs)
    #[arg(long, global = true, value_name = "N")]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List conversations, newest first
    List(ListArgs),
    /// Display a specific conversation
    Get(GetArgs),
    /// Search conversations for a term
    Search(SearchArgs),
    /// Export a conversation to a file
    Export(ExportArgs),
    /// Export several conversations to a JSON array
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone, Copy)]
pub struct FormatArg {
    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DateRangeArgs {
    /// Only conversations started at or after this date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date_bound)]
    pub since: Option<DateTime<FixedOffset>>,

    /// Only conversations started at or before this date
    #[arg(long, value_parser = parse_date_bound)]
    pub until: Option<DateTime<FixedOffset>>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RoleFilterArgs {
    /// Only messages typed by the user (drops tool output and meta messages)
    #[arg(long, conflicts_with = "assistant_only")]
    pub user_only: bool,

    /// Only assistant messages
    #[arg(long)]
    pub assistant_only: bool,
}

impl RoleFilterArgs {
    pub fn role_filter(&self) -> Option<Role> {
        if self.user_only {
            Some(Role::User)
        } else if self.assistant_only {
            Some(Role::Assistant)
        } else {
            None
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub format: FormatArg,

    #[command(flatten)]
    pub dates: DateRangeArgs,

    /// Case-insensitive substring of the project path
    #[arg(long)]
    pub project: Option<String>,

    /// Only conversations with at least N messages
    #[arg(long, value_name = "N")]
    pub min_messages: Option<usize>,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub session_id: String,

    #[command(flatten)]
    pub format: FormatArg,

    /// Show only metadata, not messages
    #[arg(long)]
    pub no_messages: bool,

    #[command(flatten)]
    pub roles: RoleFilterArgs,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub term: String,

    #[command(flatten)]
    pub format: FormatArg,

    #[arg(long)]
    pub case_sensitive: bool,

    #[command(flatten)]
    pub dates: DateRangeArgs,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    pub session_id: String,

    /// Output file [default: claude_conversation_<SESSION_ID>.txt]; a .json,
    /// .yaml or .yml extension overrides --format
    pub output_file: Option<PathBuf>,

    #[command(flatten)]
    pub format: FormatArg,

    #[command(flatten)]
    pub roles: RoleFilterArgs,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("sessions").required(true).args(["session_ids", "session_file"])))]
pub struct BatchArgs {
    pub output_file: PathBuf,

    /// Comma-separated session ids
    #[arg(long, value_delimiter = ',')]
    pub session_ids: Option<Vec<String>>,

    /// File with one session id per line
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    #[command(flatten)]
    pub roles: RoleFilterArgs,
}
