use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::warn;
use walkdir::WalkDir;

use crate::models::ProjectInfo;
use crate::utils::ProjectPathDecoder;

const SESSION_FILE_EXTENSION: &str = "jsonl";

/// Discover every project directory under `projects_dir` and its session files
///
/// Each immediate subdirectory is a project; each `*.jsonl` file directly inside
/// it is one session. Projects and files are returned in file-name order.
/// Entries that cannot be read are logged and skipped.
///
/// # Errors
///
/// Returns an error if `projects_dir` is not a directory.
pub fn discover_projects(
    projects_dir: &Path,
    decoder: &ProjectPathDecoder,
) -> Result<Vec<ProjectInfo>> {
    if !projects_dir.is_dir() {
        bail!("Not a directory: {}", projects_dir.display());
    }

    let mut projects = Vec::new();

    let walker =
        WalkDir::new(projects_dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", projects_dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let encoded_name = entry.file_name().to_string_lossy().into_owned();
        let project_dir = entry.into_path();
        let session_files = find_session_files(&project_dir);

        projects.push(ProjectInfo {
            project_path: decoder.decode(&encoded_name),
            encoded_name,
            project_dir,
            session_files,
        });
    }

    Ok(projects)
}

fn find_session_files(project_dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker =
        WalkDir::new(project_dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                let is_session = entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == SESSION_FILE_EXTENSION);
                if is_session {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!("Failed to read project directory {}: {}", project_dir.display(), e);
            }
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Helper to create a project directory containing empty files
    fn create_project_dir(projects_dir: &Path, encoded_name: &str, files: &[&str]) -> PathBuf {
        let project_dir = projects_dir.join(encoded_name);
        fs::create_dir(&project_dir).expect("Failed to create project dir");

        for filename in files {
            fs::write(project_dir.join(filename), "").expect("Failed to create file");
        }

        project_dir
    }

    fn decoder() -> ProjectPathDecoder {
        ProjectPathDecoder::new("-Users-test-")
    }

    #[test]
    fn test_discover_projects_with_valid_structure() {
        let root = TempDir::new().unwrap();
        create_project_dir(root.path(), "-Users-test-beta", &["s2.jsonl"]);
        create_project_dir(root.path(), "-Users-test-alpha", &["s1.jsonl", "s0.jsonl"]);

        let projects = discover_projects(root.path(), &decoder()).unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].encoded_name, "-Users-test-alpha");
        assert_eq!(projects[0].project_path, "~/alpha");
        assert_eq!(projects[0].project_dir, root.path().join("-Users-test-alpha"));
        assert!(projects[0].session_files[0].ends_with("s0.jsonl"));
        assert!(projects[0].session_files[1].ends_with("s1.jsonl"));
        assert_eq!(projects[1].project_path, "~/beta");
    }

    #[test]
    fn test_discover_projects_only_jsonl_files() {
        let root = TempDir::new().unwrap();
        let project = create_project_dir(
            root.path(),
            "-Users-test-app",
            &["a.jsonl", "notes.txt", "b.jsonl.bak", "c.json"],
        );
        fs::create_dir(project.join("nested.jsonl")).unwrap();

        let projects = discover_projects(root.path(), &decoder()).unwrap();
        assert_eq!(projects[0].session_files.len(), 1);
        assert!(projects[0].session_files[0].ends_with("a.jsonl"));
    }

    #[test]
    fn test_discover_projects_does_not_recurse() {
        let root = TempDir::new().unwrap();
        let project = create_project_dir(root.path(), "-Users-test-app", &[]);
        let nested = project.join("subagents");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.jsonl"), "").unwrap();

        let projects = discover_projects(root.path(), &decoder()).unwrap();
        assert_eq!(projects.len(), 1);
        assert!(projects[0].session_files.is_empty());
    }

    #[test]
    fn test_discover_projects_skips_files_at_root() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("stray.jsonl"), "").unwrap();
        create_project_dir(root.path(), "-Users-test-app", &["s.jsonl"]);

        let projects = discover_projects(root.path(), &decoder()).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].encoded_name, "-Users-test-app");
    }

    #[test]
    fn test_discover_projects_empty_directory() {
        let root = TempDir::new().unwrap();
        assert!(discover_projects(root.path(), &decoder()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_projects_missing_directory() {
        let root = TempDir::new().unwrap();
        let result = discover_projects(&root.path().join("missing"), &decoder());
        assert!(result.unwrap_err().to_string().contains("Not a directory"));
    }
}
