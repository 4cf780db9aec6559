//! Accepted-record accumulation with periodic checkpoints.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::dataset::{save_dataset, InstructionRecord};
use crate::error::DatasetError;

/// Grows the accepted dataset and persists it.
///
/// The full list is written every time its length reaches a multiple of the
/// checkpoint interval, and once more by [`DatasetAccumulator::finish`].
#[derive(Debug)]
pub struct DatasetAccumulator {
    records: Vec<InstructionRecord>,
    target: usize,
    checkpoint_interval: usize,
    output_file: PathBuf,
    checkpoints: usize,
}

impl DatasetAccumulator {
    pub fn new(target: usize, checkpoint_interval: usize, output_file: impl Into<PathBuf>) -> Self {
        Self {
            records: Vec::new(),
            target,
            checkpoint_interval: checkpoint_interval.max(1),
            output_file: output_file.into(),
            checkpoints: 0,
        }
    }

    /// Appends an accepted record, checkpointing if the new length is a
    /// multiple of the interval. Returns whether a checkpoint was written.
    pub async fn push(&mut self, record: InstructionRecord) -> Result<bool, DatasetError> {
        self.records.push(record);

        if self.records.len() % self.checkpoint_interval != 0 {
            return Ok(false);
        }

        save_dataset(&self.output_file, &self.records).await?;
        self.checkpoints += 1;
        info!(
            accepted = self.records.len(),
            target = self.target,
            path = %self.output_file.display(),
            "Checkpoint saved"
        );
        Ok(true)
    }

    /// True once the target count has been reached.
    pub fn is_complete(&self) -> bool {
        self.records.len() >= self.target
    }

    /// Records still needed to reach the target.
    pub fn remaining(&self) -> usize {
        self.target.saturating_sub(self.records.len())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InstructionRecord] {
        &self.records
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Writes the final dataset unconditionally and returns the records.
    pub async fn finish(self) -> Result<Vec<InstructionRecord>, DatasetError> {
        save_dataset(&self.output_file, &self.records).await?;
        info!(
            accepted = self.records.len(),
            path = %self.output_file.display(),
            "Dataset saved"
        );
        Ok(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_dataset;
    use tempfile::TempDir;

    fn record(i: usize) -> InstructionRecord {
        InstructionRecord::new(format!("Instruction number {}", i), "", "out")
    }

    #[tokio::test]
    async fn test_checkpoints_on_interval_multiples() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("out").join("data.json");
        let mut acc = DatasetAccumulator::new(10, 3, &path);

        let mut written = Vec::new();
        for i in 0..7 {
            written.push(acc.push(record(i)).await.expect("push"));
        }

        assert_eq!(
            written,
            vec![false, false, true, false, false, true, false]
        );
        assert_eq!(acc.checkpoints(), 2);

        // The file holds the state as of the last checkpoint.
        let on_disk = load_dataset(&path).await.expect("load");
        assert_eq!(on_disk.len(), 6);
    }

    #[tokio::test]
    async fn test_finish_writes_everything() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data.json");
        let mut acc = DatasetAccumulator::new(2, 100, &path);

        assert!(!acc.is_complete());
        acc.push(record(0)).await.expect("push");
        assert_eq!(acc.remaining(), 1);
        acc.push(record(1)).await.expect("push");
        assert!(acc.is_complete());
        assert!(!path.exists());

        let records = acc.finish().await.expect("finish");
        assert_eq!(records.len(), 2);
        assert_eq!(load_dataset(&path).await.expect("load"), records);
    }
}
