//! Seed task loading.
//!
//! Seeds are trusted: no validation or deduplication is applied. Any unreadable
//! file, malformed line or missing instance aborts the load.

use std::path::Path;

use tokio::fs;

use crate::error::DatasetError;

use super::types::{InstructionRecord, SeedTask};

/// Load a newline-delimited JSON seed file and flatten each task into a record
/// built from its first instance.
///
/// Whitespace-only lines are skipped; line numbers in errors are 1-based.
pub async fn load_seed_tasks(path: impl AsRef<Path>) -> Result<Vec<InstructionRecord>, DatasetError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_seed_lines(&contents)
}

/// Parse seed tasks from already-read file contents.
pub fn parse_seed_lines(contents: &str) -> Result<Vec<InstructionRecord>, DatasetError> {
    let mut records = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let task: SeedTask = serde_json::from_str(line).map_err(|source| {
            DatasetError::MalformedSeed {
                line: line_no,
                source,
            }
        })?;

        let first = task
            .instances
            .into_iter()
            .next()
            .ok_or(DatasetError::MissingInstance { line: line_no })?;

        records.push(InstructionRecord {
            instruction: task.instruction,
            input: first.input,
            output: first.output,
        });
    }

    Ok(records)
}
