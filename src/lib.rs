//! instruct-forge: self-instruct dataset generation.
//!
//! This library bootstraps an instruction-tuning dataset from a small set of
//! seed tasks by repeatedly prompting a chat-completion API, filtering the
//! generated tasks for validity and novelty, and accumulating the survivors.
//! It also splits the result for fine-tuning and reports on its diversity.

// Core modules
pub mod cli;
pub mod dataset;
pub mod diversity;
pub mod error;
pub mod export;
pub mod generator;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod validation;

// Re-export commonly used error types
pub use error::{DatasetError, ExportError, LlmError, PromptError};
pub use pipeline::{ConfigError, GenerationError};
