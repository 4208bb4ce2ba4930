//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a temporary Claude projects directory
pub struct ProjectsDirBuilder {
    temp_dir: TempDir,
}

impl ProjectsDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a project directory with the given encoded name and session files
    pub fn with_project(self, encoded_name: &str, sessions: &[SessionFileBuilder]) -> Self {
        let project_dir = self.temp_dir.path().join(encoded_name);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        for session in sessions {
            session.create_in(&project_dir);
        }

        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ProjectsDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `<session-id>.jsonl` file
pub struct SessionFileBuilder {
    session_id: String,
    lines: Vec<String>,
}

impl SessionFileBuilder {
    pub fn new(session_id: &str) -> Self {
        Self { session_id: session_id.to_string(), lines: Vec::new() }
    }

    pub fn with_entry(mut self, entry: EntryBuilder) -> Self {
        self.lines.push(entry.to_json());
        self
    }

    /// Append a line verbatim (malformed input, blank lines)
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn create_in(&self, dir: &Path) -> PathBuf {
        let file_path = dir.join(format!("{}.jsonl", self.session_id));
        fs::write(&file_path, self.lines.join("\n")).expect("Failed to write session file");
        file_path
    }
}

/// Builder for one JSONL record
pub struct EntryBuilder {
    value: Value,
}

impl EntryBuilder {
    pub fn user(text: &str, timestamp: &str) -> Self {
        Self::message("user", json!(text), timestamp)
    }

    pub fn assistant(text: &str, timestamp: &str) -> Self {
        Self::message("assistant", json!(text), timestamp)
    }

    /// A message record with arbitrary `content` (string or block list)
    pub fn message(role: &str, content: Value, timestamp: &str) -> Self {
        Self {
            value: json!({
                "type": role,
                "message": {"role": role, "content": content},
                "timestamp": timestamp,
            }),
        }
    }

    pub fn summary(text: &str) -> Self {
        Self { value: json!({"type": "summary", "summary": text, "leafUuid": "leaf-1"}) }
    }

    /// Mark the record as transport-level meta (`isMeta: true`)
    pub fn meta(mut self) -> Self {
        self.value["isMeta"] = json!(true);
        self
    }

    pub fn thinking(mut self, metadata: Value) -> Self {
        self.value["thinkingMetadata"] = metadata;
        self
    }

    pub fn to_json(&self) -> String {
        self.value.to_string()
    }
}

/// Home token used by tests that decode project names
pub const TEST_HOME_TOKEN: &str = "-Users-test-";
