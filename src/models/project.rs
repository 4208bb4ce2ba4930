use std::path::PathBuf;

/// A project directory under the projects root and the session files it holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub encoded_name: String,
    /// Human-readable path decoded from `encoded_name`
    pub project_path: String,
    pub project_dir: PathBuf,
    pub session_files: Vec<PathBuf>,
}
