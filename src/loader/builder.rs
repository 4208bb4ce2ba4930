//! Loads every session file under a projects directory into memory.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use tracing::{info, warn};

use super::project_discovery::discover_projects;
use crate::error::QueryError;
use crate::models::Conversation;
use crate::parsers::parse_conversation_file;
use crate::utils::ProjectPathDecoder;

/// Parse all conversations found under `projects_dir`
///
/// Files are parsed in parallel; the result keeps discovery order (projects,
/// then files, by name). A file that cannot be opened or read is logged and
/// left out.
///
/// # Errors
///
/// Returns [`QueryError::ProjectsDirNotFound`] when `projects_dir` does not exist.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ai_history_query::{ProjectPathDecoder, load_conversations};
///
/// let decoder = ProjectPathDecoder::from_env();
/// let conversations = load_conversations(Path::new("/Users/alice/.claude/projects"), &decoder)?;
/// println!("Loaded {} conversations", conversations.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn load_conversations(
    projects_dir: &Path,
    decoder: &ProjectPathDecoder,
) -> Result<Vec<Conversation>> {
    if !projects_dir.exists() {
        return Err(QueryError::ProjectsDirNotFound { path: projects_dir.to_path_buf() }.into());
    }

    let projects = discover_projects(projects_dir, decoder)?;

    let sessions: Vec<(&str, &PathBuf)> = projects
        .iter()
        .flat_map(|project| {
            project.session_files.iter().map(move |file| (project.project_path.as_str(), file))
        })
        .collect();

    let parsed: Vec<Option<Conversation>> = sessions
        .par_iter()
        .map(|(project_path, file)| match parse_conversation_file(file, project_path) {
            Ok(conversation) => Some(conversation),
            Err(e) => {
                warn!("Failed to parse {}: {:#}", file.display(), e);
                None
            }
        })
        .collect();

    let total_files = parsed.len();
    let conversations: Vec<Conversation> = parsed.into_iter().flatten().collect();

    info!(
        "Loaded {} conversations from {} projects ({} files failed)",
        conversations.len(),
        projects.len(),
        total_files - conversations.len()
    );

    Ok(conversations)
}
