//! Error types for instruct-forge operations.
//!
//! Defines error types for the major subsystems:
//! - LLM API interactions
//! - Seed and dataset file handling
//! - Prompt construction
//! - Dataset export (SFT splits)
//!
//! Configuration and run-level errors live next to the pipeline code
//! (`pipeline::ConfigError`, `pipeline::GenerationError`).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API key: set INSTRUCT_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },

    #[error("LLM response contained no completion text")]
    EmptyResponse,
}

/// Errors that can occur while reading seed tasks or reading/writing datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed task on line {line}: {source}")]
    MalformedSeed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Seed task on line {line} has no instances")]
    MissingInstance { line: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while building prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Example pool has {available} records but {required} are needed per prompt")]
    PoolTooSmall { available: usize, required: usize },
}

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid test ratio {0}: must be between 0.0 and 1.0")]
    InvalidRatio(f64),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
