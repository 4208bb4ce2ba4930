use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, warn};

use super::entry::{EntryOutcome, RawEntry, apply_entry};
use crate::models::Conversation;

/// Line counters collected while reading one session file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines that decoded into a record
    pub records: usize,
    /// Lines skipped because of invalid UTF-8 or JSON
    pub skipped_lines: usize,
    /// Records that became messages
    pub messages: usize,
    /// user/assistant records dropped for lack of a timestamp
    pub dropped_messages: usize,
}

/// Parse one session file into a [`Conversation`]
///
/// The session id is the file stem; `project_path` is the already-decoded
/// project directory name. Malformed lines are logged and skipped, so a file
/// only fails as a whole when it cannot be opened or read.
pub fn parse_conversation_file(path: &Path, project_path: &str) -> Result<Conversation> {
    let session_id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .with_context(|| format!("Conversation file has no file name: {}", path.display()))?;

    let file = File::open(path)
        .with_context(|| format!("Failed to open conversation file: {}", path.display()))?;

    let mut conversation = Conversation::new(session_id, project_path, path);
    let stats = parse_conversation_reader(BufReader::new(file), path, &mut conversation)?;

    if stats.skipped_lines > 0 || stats.dropped_messages > 0 {
        debug!(
            "Parsed {}: {} messages ({} lines skipped, {} records without timestamp)",
            path.display(),
            stats.messages,
            stats.skipped_lines,
            stats.dropped_messages
        );
    }

    Ok(conversation)
}

/// Feed every line of `reader` into `conversation` in order
///
/// `source` is only used for log context.
pub fn parse_conversation_reader<R: BufRead>(
    reader: R,
    source: &Path,
    conversation: &mut Conversation,
) -> Result<ParseStats> {
    let mut stats = ParseStats::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line_num = index + 1;
        let bytes = line
            .with_context(|| format!("Failed to read line {} of {}", line_num, source.display()))?;

        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!("Invalid UTF-8 at {}:{}: {}", source.display(), line_num, e);
                stats.skipped_lines += 1;
                continue;
            }
        };

        if line.is_empty() {
            continue;
        }

        let entry = match decode_entry(line) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Invalid JSON at {}:{}: {}", source.display(), line_num, e);
                stats.skipped_lines += 1;
                continue;
            }
        };

        stats.records += 1;
        match apply_entry(conversation, entry) {
            EntryOutcome::MessageAppended => stats.messages += 1,
            EntryOutcome::DroppedNoTimestamp => stats.dropped_messages += 1,
            _ => {}
        }
    }

    Ok(stats)
}

/// Records must be JSON objects; arrays and scalars are rejected
fn decode_entry(line: &str) -> Result<RawEntry> {
    match serde_json::from_str::<Value>(line)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => bail!("expected an object, found {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
