//! Dataset file persistence.
//!
//! The dataset is always written as one complete, indented JSON array. Writes
//! are plain overwrites: a crash mid-write can leave a truncated file behind.

use std::path::Path;

use tokio::fs;

use crate::error::DatasetError;

use super::types::InstructionRecord;

/// Write every record to `path` as a pretty-printed JSON array, creating the
/// parent directory if needed.
pub async fn save_dataset(
    path: impl AsRef<Path>,
    records: &[InstructionRecord],
) -> Result<(), DatasetError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| DatasetError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)
        .await
        .map_err(|source| DatasetError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a dataset previously written by [`save_dataset`].
pub async fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<InstructionRecord>, DatasetError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(serde_json::from_str(&contents)?)
}
