//! Supervised fine-tuning train/test split.
//!
//! Each record becomes an `{instruction, output}` pair, with a non-empty
//! input folded into the instruction as `"\nInput: <input>"`. The pairs are
//! shuffled with a seeded RNG and cut at `floor(len * (1 - test_ratio))`.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::dataset::{load_dataset, InstructionRecord};
use crate::error::ExportError;

/// Default fraction of examples held out for testing.
pub const DEFAULT_TEST_RATIO: f64 = 0.1;

/// Default shuffle seed.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

pub const TRAIN_FILE: &str = "train.json";
pub const TEST_FILE: &str = "test.json";

/// One fine-tuning example. Field order is alphabetical so the written JSON
/// has sorted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SftExample {
    pub instruction: String,
    pub output: String,
}

impl From<&InstructionRecord> for SftExample {
    fn from(record: &InstructionRecord) -> Self {
        let instruction = if record.has_input() {
            format!("{}\nInput: {}", record.instruction, record.input)
        } else {
            record.instruction.clone()
        };
        Self {
            instruction,
            output: record.output.clone(),
        }
    }
}

/// Converts records into fine-tuning examples, preserving order.
pub fn to_sft_examples(records: &[InstructionRecord]) -> Vec<SftExample> {
    records.iter().map(SftExample::from).collect()
}

/// Shuffles `examples` and splits them into (train, test).
pub fn split_train_test(
    mut examples: Vec<SftExample>,
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<SftExample>, Vec<SftExample>), ExportError> {
    if !(0.0..=1.0).contains(&test_ratio) {
        return Err(ExportError::InvalidRatio(test_ratio));
    }

    let test_start = (examples.len() as f64 * (1.0 - test_ratio)) as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    examples.shuffle(&mut rng);

    let test = examples.split_off(test_start.min(examples.len()));
    Ok((examples, test))
}

/// Counts and paths written by [`write_sft_split`].
#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub train_count: usize,
    pub test_count: usize,
    pub train_file: PathBuf,
    pub test_file: PathBuf,
}

/// Reads a generated dataset and writes `train.json` and `test.json` into
/// `output_dir`, creating it if needed.
pub async fn write_sft_split(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    test_ratio: f64,
    seed: u64,
) -> Result<SplitSummary, ExportError> {
    let records = load_dataset(input.as_ref()).await?;
    let (train, test) = split_train_test(to_sft_examples(&records), test_ratio, seed)?;

    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).await?;

    let train_file = output_dir.join(TRAIN_FILE);
    let test_file = output_dir.join(TEST_FILE);
    fs::write(&train_file, serde_json::to_string_pretty(&train)?).await?;
    fs::write(&test_file, serde_json::to_string_pretty(&test)?).await?;

    info!(
        train = train.len(),
        test = test.len(),
        dir = %output_dir.display(),
        "Wrote SFT split"
    );

    Ok(SplitSummary {
        train_count: train.len(),
        test_count: test.len(),
        train_file,
        test_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::save_dataset;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn records(n: usize) -> Vec<InstructionRecord> {
        (0..n)
            .map(|i| {
                let input = if i % 2 == 0 { String::new() } else { format!("input {}", i) };
                InstructionRecord::new(format!("Instruction {}", i), input, format!("output {}", i))
            })
            .collect()
    }

    #[test]
    fn test_input_folded_into_instruction() {
        let with_input = SftExample::from(&InstructionRecord::new("Translate.", "Hello", "Bonjour"));
        assert_eq!(with_input.instruction, "Translate.\nInput: Hello");
        assert_eq!(with_input.output, "Bonjour");

        let without = SftExample::from(&InstructionRecord::new("Name a color.", "", "Red"));
        assert_eq!(without.instruction, "Name a color.");
    }

    #[test]
    fn test_split_counts_and_union() {
        let examples = to_sft_examples(&records(100));
        let expected: HashSet<String> = examples.iter().map(|e| e.instruction.clone()).collect();

        let (train, test) = split_train_test(examples, 0.1, 42).expect("split");
        assert_eq!(train.len(), 90);
        assert_eq!(test.len(), 10);

        let union: HashSet<String> = train
            .iter()
            .chain(test.iter())
            .map(|e| e.instruction.clone())
            .collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_split_is_deterministic_per_seed() {
        let (a, _) = split_train_test(to_sft_examples(&records(20)), 0.25, 7).expect("split");
        let (b, _) = split_train_test(to_sft_examples(&records(20)), 0.25, 7).expect("split");
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_edge_ratios() {
        let (train, test) = split_train_test(to_sft_examples(&records(5)), 0.0, 1).expect("split");
        assert_eq!((train.len(), test.len()), (5, 0));

        let (train, test) = split_train_test(to_sft_examples(&records(5)), 1.0, 1).expect("split");
        assert_eq!((train.len(), test.len()), (0, 5));

        let (train, test) = split_train_test(Vec::new(), 0.1, 1).expect("split");
        assert!(train.is_empty() && test.is_empty());

        assert!(matches!(
            split_train_test(Vec::new(), 1.5, 1),
            Err(ExportError::InvalidRatio(_))
        ));
    }

    #[tokio::test]
    async fn test_write_sft_split() {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("alpaca_data.json");
        save_dataset(&input, &records(100)).await.expect("save");

        let out = dir.path().join("sft");
        let summary = write_sft_split(&input, &out, 0.1, 42).await.expect("split");
        assert_eq!(summary.train_count, 90);
        assert_eq!(summary.test_count, 10);

        let train: Vec<SftExample> =
            serde_json::from_str(&std::fs::read_to_string(&summary.train_file).expect("read"))
                .expect("json");
        assert_eq!(train.len(), 90);

        let raw = std::fs::read_to_string(&summary.test_file).expect("read");
        assert!(raw.starts_with("[\n  {\n    \"instruction\""));
    }

    #[tokio::test]
    async fn test_write_sft_split_missing_input() {
        let dir = TempDir::new().expect("tempdir");
        let err = write_sft_split(dir.path().join("nope.json"), dir.path(), 0.1, 42)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Dataset(_)));
    }
}
