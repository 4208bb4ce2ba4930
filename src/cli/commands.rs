use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};

use super::args::{BatchArgs, Cli, Commands, ExportArgs, GetArgs, ListArgs, SearchArgs};
use super::logging::init_logging;
use crate::error::QueryError;
use crate::formatters::{ConversationDetail, OutputFormat, SingleOptions};
use crate::loader::load_conversations;
use crate::models::Conversation;
use crate::query::{ConversationQuery, QueryEngine};
use crate::utils::{ProjectPathDecoder, default_projects_dir};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    execute(cli)
}

/// Run an already-parsed command line
pub fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // A compiled-out format must fail before any input is read
    if let Some(format) = output_format(&command) {
        format.formatter()?;
    }

    let projects_dir = match cli.projects_dir {
        Some(dir) => dir,
        None => default_projects_dir()?,
    };
    init_thread_pool(cli.threads);

    let conversations = load_conversations(&projects_dir, &ProjectPathDecoder::from_env())?;
    if conversations.is_empty() {
        return Err(QueryError::NoConversations { path: projects_dir }.into());
    }

    match command {
        Commands::List(args) => list(&conversations, &args),
        Commands::Get(args) => get(&conversations, &args),
        Commands::Search(args) => search(&conversations, &args),
        Commands::Export(args) => export(&conversations, &args),
        Commands::Batch(args) => batch(&conversations, &args),
    }
}

fn output_format(command: &Commands) -> Option<OutputFormat> {
    match command {
        Commands::List(args) => Some(args.format.format),
        Commands::Get(args) => Some(args.format.format),
        Commands::Search(args) => Some(args.format.format),
        Commands::Export(args) => Some(export_format(args)),
        Commands::Batch(_) => None,
    }
}

fn init_thread_pool(threads: Option<usize>) {
    let Some(num_threads) = threads.filter(|&n| n > 0) else {
        return;
    };

    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(num_threads).build_global() {
        debug!("Thread pool already initialized: {}", e);
    }
}

fn find_session<'a>(engine: &QueryEngine<'a>, session_id: &str) -> Result<&'a Conversation> {
    engine
        .get_by_session_id(session_id)
        .ok_or_else(|| QueryError::SessionNotFound { session_id: session_id.to_string() }.into())
}

fn list(conversations: &[Conversation], args: &ListArgs) -> Result<()> {
    let results = ConversationQuery::new()
        .since(args.dates.since)
        .until(args.dates.until)
        .project(args.project.clone())
        .min_messages(args.min_messages)
        .limit(args.limit)
        .apply(conversations);

    let formatter = args.format.format.formatter()?;
    println!("{}", formatter.render_list(&results)?);
    Ok(())
}

fn get(conversations: &[Conversation], args: &GetArgs) -> Result<()> {
    let engine = QueryEngine::new(conversations);
    let conversation = find_session(&engine, &args.session_id)?;

    let options = SingleOptions {
        include_messages: !args.no_messages,
        role_filter: args.roles.role_filter(),
    };
    let formatter = args.format.format.formatter()?;
    println!("{}", formatter.render_single(conversation, &options)?);
    Ok(())
}

fn search(conversations: &[Conversation], args: &SearchArgs) -> Result<()> {
    let results = ConversationQuery::new()
        .search(args.term.as_str(), args.case_sensitive)
        .since(args.dates.since)
        .until(args.dates.until)
        .limit(args.limit)
        .apply(conversations);

    if results.is_empty() {
        eprintln!("No conversations found matching '{}'", args.term);
        return Ok(());
    }

    let formatter = args.format.format.formatter()?;
    println!("{}", formatter.render_list(&results)?);
    Ok(())
}

fn default_export_path(session_id: &str) -> PathBuf {
    PathBuf::from(format!("claude_conversation_{session_id}.txt"))
}

fn export_path(args: &ExportArgs) -> PathBuf {
    args.output_file.clone().unwrap_or_else(|| default_export_path(&args.session_id))
}

/// The output file's extension wins over `--format`
fn export_format(args: &ExportArgs) -> OutputFormat {
    OutputFormat::from_extension(&export_path(args)).unwrap_or(args.format.format)
}

fn export(conversations: &[Conversation], args: &ExportArgs) -> Result<()> {
    let engine = QueryEngine::new(conversations);
    let conversation = find_session(&engine, &args.session_id)?;

    let options = SingleOptions { include_messages: true, role_filter: args.roles.role_filter() };
    let rendered = export_format(args).formatter()?.render_single(conversation, &options)?;

    let path = export_path(args);
    fs::write(&path, rendered)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    println!("Conversation exported to: {}", path.display());
    Ok(())
}

fn read_session_ids(args: &BatchArgs) -> Result<Vec<String>> {
    let raw: Vec<String> = match (&args.session_ids, &args.session_file) {
        (Some(ids), _) => ids.clone(),
        (None, Some(file)) => read_session_file(file)?,
        (None, None) => Vec::new(),
    };

    Ok(raw.into_iter().map(|id| id.trim().to_string()).filter(|id| !id.is_empty()).collect())
}

fn read_session_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

fn batch(conversations: &[Conversation], args: &BatchArgs) -> Result<()> {
    let engine = QueryEngine::new(conversations);
    let options = SingleOptions { include_messages: true, role_filter: args.roles.role_filter() };

    let mut details = Vec::new();
    for session_id in read_session_ids(args)? {
        match engine.get_by_session_id(&session_id) {
            Some(conversation) => details.push(ConversationDetail::new(conversation, &options)),
            None => warn!("Session not found, skipping: {}", session_id),
        }
    }

    let json = serde_json::to_string_pretty(&details).context("Failed to serialize batch")?;
    fs::write(&args.output_file, json)
        .with_context(|| format!("Failed to write batch file: {}", args.output_file.display()))?;

    let total_messages: usize = details
        .iter()
        .map(|detail| detail.filtered_message_count.unwrap_or(detail.record.message_count))
        .sum();

    println!(
        "Batch exported {} conversations to: {}",
        details.len(),
        args.output_file.display()
    );
    println!("Total messages: {}", total_messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_args(output_file: Option<&str>, format: OutputFormat) -> ExportArgs {
        let mut argv = vec!["ai-history-query", "export", "abc", "--format", format.as_str()];
        argv.extend(output_file);
        let Some(Commands::Export(args)) = Cli::try_parse_from(argv).unwrap().command else {
            panic!("expected export")
        };
        args
    }

    #[test]
    fn test_export_defaults() {
        let args = export_args(None, OutputFormat::Text);
        assert_eq!(export_path(&args), PathBuf::from("claude_conversation_abc.txt"));
        assert_eq!(export_format(&args), OutputFormat::Text);
    }

    #[test]
    fn test_export_extension_overrides_format() {
        assert_eq!(export_format(&export_args(Some("out.yml"), OutputFormat::Json)), OutputFormat::Yaml);
        assert_eq!(export_format(&export_args(Some("out.json"), OutputFormat::Text)), OutputFormat::Json);
        assert_eq!(export_format(&export_args(Some("out.md"), OutputFormat::Json)), OutputFormat::Json);
    }

    #[test]
    fn test_read_session_ids_trims_and_skips_blank() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("sessions.txt");
        fs::write(&file, "  a  \n\nb\n   \n").unwrap();

        let Some(Commands::Batch(args)) = Cli::try_parse_from([
            "ai-history-query",
            "batch",
            "out.json",
            "--session-file",
            file.to_str().unwrap(),
        ])
        .unwrap()
        .command
        else {
            panic!("expected batch")
        };

        assert_eq!(read_session_ids(&args).unwrap(), vec!["a", "b"]);
    }
}
