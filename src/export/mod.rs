//! Post-processing of a generated dataset for fine-tuning.

pub mod sft;

pub use sft::{
    split_train_test, to_sft_examples, write_sft_split, SftExample, SplitSummary,
    DEFAULT_SPLIT_SEED, DEFAULT_TEST_RATIO, TEST_FILE, TRAIN_FILE,
};
