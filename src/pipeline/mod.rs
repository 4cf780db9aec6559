//! Self-instruct generation pipeline.
//!
//! - **Config**: [`GenerationConfig`] layered from defaults, YAML, environment and flags
//! - **Accumulator**: [`DatasetAccumulator`] grows the dataset and checkpoints it
//! - **Runner**: [`SelfInstructRunner`] drives prompt → completion → parse →
//!   validate → novelty rounds until the target is reached
//!
//! # Strategies
//!
//! - **Serial**: one request per round with a fixed pause between rounds.
//!   Candidates are screened against the seeds and everything accepted so far,
//!   and accepted records join the example pool.
//! - **Batched**: `batch_size` concurrent requests per round. Candidates are
//!   screened against a recency window that starts empty, and prompts only
//!   ever sample from the seeds.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use instruct_forge::llm::ChatCompletionClient;
//! use instruct_forge::pipeline::{GenerationConfig, SelfInstructRunner, Strategy};
//!
//! let config = GenerationConfig::from_env()?
//!     .with_strategy(Strategy::Batched)
//!     .with_target_count(1000);
//! let client = ChatCompletionClient::from_env()?;
//! let summary = SelfInstructRunner::new(Arc::new(client), config).run().await?;
//! println!("accepted {} records", summary.accepted);
//! ```

pub mod accumulator;
pub mod config;
pub mod runner;

pub use accumulator::DatasetAccumulator;
pub use config::{ConfigError, GenerationConfig, NoveltyScope, Strategy};
pub use runner::{GenerationError, GenerationSummary, SelfInstructRunner};
