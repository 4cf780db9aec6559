//! Configuration for a generation run.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! `INSTRUCT_*` environment variables, then command-line flags (applied by
//! the CLI through the `with_*` builders).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diversity::{NoveltyMode, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_WINDOW_CAPACITY};
use crate::llm::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::prompts::{DEFAULT_REQUESTED_EXAMPLES, DEFAULT_SAMPLE_SIZE};

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML in '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// How generation requests are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One request per round, pausing between rounds.
    #[default]
    Serial,
    /// A batch of concurrent requests per round.
    Batched,
}

impl Strategy {
    /// Novelty mode used when none is configured explicitly.
    pub fn default_novelty(&self, window_capacity: usize) -> NoveltyMode {
        match self {
            Strategy::Serial => NoveltyMode::FullHistory,
            Strategy::Batched => NoveltyMode::Window {
                capacity: window_capacity,
            },
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Serial => write!(f, "serial"),
            Strategy::Batched => write!(f, "batched"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serial" | "sequential" => Ok(Strategy::Serial),
            "batched" | "batch" | "async" | "concurrent" => Ok(Strategy::Batched),
            other => Err(format!("Unknown strategy: {}", other)),
        }
    }
}

/// Novelty comparison scope as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoveltyScope {
    Full,
    Window,
}

impl std::fmt::Display for NoveltyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoveltyScope::Full => write!(f, "full"),
            NoveltyScope::Window => write!(f, "window"),
        }
    }
}

impl std::str::FromStr for NoveltyScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "full-history" | "history" => Ok(NoveltyScope::Full),
            "window" | "recent" => Ok(NoveltyScope::Window),
            other => Err(format!("Unknown novelty mode: {}", other)),
        }
    }
}

/// Configuration for a self-instruct generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    // LLM settings
    pub model: String,
    pub api_base: String,
    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
    /// Per-request timeout; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,

    // Scheduling
    pub strategy: Strategy,
    /// Requests per round in batched mode.
    pub batch_size: usize,
    /// Cap on in-flight requests in batched mode; `None` issues the whole batch at once.
    pub max_concurrency: Option<usize>,
    /// Pause between serial rounds.
    pub round_delay_ms: u64,
    /// Safety bound on rounds; `None` runs until the target is reached.
    pub max_rounds: Option<u64>,

    // Filtering
    pub similarity_threshold: f64,
    /// `None` uses the strategy's default.
    pub novelty_mode: Option<NoveltyScope>,
    pub window_capacity: usize,

    // Prompting
    pub sample_size: usize,
    pub requested_examples: usize,
    pub rng_seed: Option<u64>,

    // Output
    pub target_count: usize,
    pub checkpoint_interval: usize,
    pub seed_file: PathBuf,
    pub output_file: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            temperature: 1.0,
            top_p: 1.0,
            max_tokens: 3072,
            stop_sequences: vec!["20.".to_string(), "20:".to_string()],
            request_timeout_secs: None,

            strategy: Strategy::Serial,
            batch_size: 500,
            max_concurrency: None,
            round_delay_ms: 1000,
            max_rounds: None,

            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            novelty_mode: None,
            window_capacity: DEFAULT_WINDOW_CAPACITY,

            sample_size: DEFAULT_SAMPLE_SIZE,
            requested_examples: DEFAULT_REQUESTED_EXAMPLES,
            rng_seed: None,

            target_count: 52_000,
            checkpoint_interval: 100,
            seed_file: PathBuf::from("data/seed_tasks.jsonl"),
            output_file: PathBuf::from("data/alpaca_data.json"),
        }
    }
}

impl GenerationConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with environment variables, then validated.
    ///
    /// # Environment Variables
    ///
    /// - `INSTRUCT_MODEL`, `INSTRUCT_API_BASE`
    /// - `INSTRUCT_API_KEY` (falls back to `OPENAI_API_KEY`)
    /// - `INSTRUCT_TEMPERATURE`, `INSTRUCT_TOP_P`, `INSTRUCT_MAX_TOKENS`
    /// - `INSTRUCT_STOP`: comma-separated stop sequences
    /// - `INSTRUCT_REQUEST_TIMEOUT_SECS`
    /// - `INSTRUCT_STRATEGY`: `serial` or `batched`
    /// - `INSTRUCT_BATCH_SIZE`, `INSTRUCT_MAX_CONCURRENCY`
    /// - `INSTRUCT_ROUND_DELAY_MS`, `INSTRUCT_MAX_ROUNDS`
    /// - `INSTRUCT_SIMILARITY_THRESHOLD`
    /// - `INSTRUCT_NOVELTY_MODE`: `full` or `window`
    /// - `INSTRUCT_WINDOW_CAPACITY`
    /// - `INSTRUCT_SAMPLE_SIZE`, `INSTRUCT_REQUESTED_EXAMPLES`, `INSTRUCT_RNG_SEED`
    /// - `INSTRUCT_TARGET_COUNT`, `INSTRUCT_CHECKPOINT_INTERVAL`
    /// - `INSTRUCT_SEED_FILE`, `INSTRUCT_OUTPUT_FILE`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML file; fields it omits keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Overlays any `INSTRUCT_*` variables that are set onto `self`.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Like [`GenerationConfig::apply_env`], reading variables through `var`.
    pub fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        // LLM settings
        if let Some(val) = var("INSTRUCT_MODEL") {
            self.model = val;
        }
        if let Some(val) = var("INSTRUCT_API_BASE") {
            self.api_base = val;
        }
        if let Some(val) = var("INSTRUCT_API_KEY").or_else(|| var("OPENAI_API_KEY")) {
            self.api_key = Some(val);
        }
        if let Some(val) = var("INSTRUCT_TEMPERATURE") {
            self.temperature = parse_env_value(&val, "INSTRUCT_TEMPERATURE")?;
        }
        if let Some(val) = var("INSTRUCT_TOP_P") {
            self.top_p = parse_env_value(&val, "INSTRUCT_TOP_P")?;
        }
        if let Some(val) = var("INSTRUCT_MAX_TOKENS") {
            self.max_tokens = parse_env_value(&val, "INSTRUCT_MAX_TOKENS")?;
        }
        if let Some(val) = var("INSTRUCT_STOP") {
            self.stop_sequences = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(val) = var("INSTRUCT_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs =
                Some(parse_env_value(&val, "INSTRUCT_REQUEST_TIMEOUT_SECS")?);
        }

        // Scheduling
        if let Some(val) = var("INSTRUCT_STRATEGY") {
            self.strategy = parse_env_value(&val, "INSTRUCT_STRATEGY")?;
        }
        if let Some(val) = var("INSTRUCT_BATCH_SIZE") {
            self.batch_size = parse_env_value(&val, "INSTRUCT_BATCH_SIZE")?;
        }
        if let Some(val) = var("INSTRUCT_MAX_CONCURRENCY") {
            self.max_concurrency = Some(parse_env_value(&val, "INSTRUCT_MAX_CONCURRENCY")?);
        }
        if let Some(val) = var("INSTRUCT_ROUND_DELAY_MS") {
            self.round_delay_ms = parse_env_value(&val, "INSTRUCT_ROUND_DELAY_MS")?;
        }
        if let Some(val) = var("INSTRUCT_MAX_ROUNDS") {
            self.max_rounds = Some(parse_env_value(&val, "INSTRUCT_MAX_ROUNDS")?);
        }

        // Filtering
        if let Some(val) = var("INSTRUCT_SIMILARITY_THRESHOLD") {
            self.similarity_threshold = parse_env_value(&val, "INSTRUCT_SIMILARITY_THRESHOLD")?;
        }
        if let Some(val) = var("INSTRUCT_NOVELTY_MODE") {
            self.novelty_mode = Some(parse_env_value(&val, "INSTRUCT_NOVELTY_MODE")?);
        }
        if let Some(val) = var("INSTRUCT_WINDOW_CAPACITY") {
            self.window_capacity = parse_env_value(&val, "INSTRUCT_WINDOW_CAPACITY")?;
        }

        // Prompting
        if let Some(val) = var("INSTRUCT_SAMPLE_SIZE") {
            self.sample_size = parse_env_value(&val, "INSTRUCT_SAMPLE_SIZE")?;
        }
        if let Some(val) = var("INSTRUCT_REQUESTED_EXAMPLES") {
            self.requested_examples = parse_env_value(&val, "INSTRUCT_REQUESTED_EXAMPLES")?;
        }
        if let Some(val) = var("INSTRUCT_RNG_SEED") {
            self.rng_seed = Some(parse_env_value(&val, "INSTRUCT_RNG_SEED")?);
        }

        // Output
        if let Some(val) = var("INSTRUCT_TARGET_COUNT") {
            self.target_count = parse_env_value(&val, "INSTRUCT_TARGET_COUNT")?;
        }
        if let Some(val) = var("INSTRUCT_CHECKPOINT_INTERVAL") {
            self.checkpoint_interval = parse_env_value(&val, "INSTRUCT_CHECKPOINT_INTERVAL")?;
        }
        if let Some(val) = var("INSTRUCT_SEED_FILE") {
            self.seed_file = PathBuf::from(val);
        }
        if let Some(val) = var("INSTRUCT_OUTPUT_FILE") {
            self.output_file = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "model cannot be empty".to_string(),
            ));
        }
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "api_base cannot be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationFailed(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ConfigError::ValidationFailed(
                "top_p must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ValidationFailed(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ValidationFailed(
                "similarity_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.window_capacity == 0 {
            return Err(ConfigError::ValidationFailed(
                "window_capacity must be greater than 0".to_string(),
            ));
        }
        if self.sample_size == 0 {
            return Err(ConfigError::ValidationFailed(
                "sample_size must be greater than 0".to_string(),
            ));
        }
        if self.target_count == 0 {
            return Err(ConfigError::ValidationFailed(
                "target_count must be greater than 0".to_string(),
            ));
        }
        if self.checkpoint_interval == 0 {
            return Err(ConfigError::ValidationFailed(
                "checkpoint_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The novelty mode this run uses.
    pub fn resolved_novelty_mode(&self) -> NoveltyMode {
        match self.novelty_mode {
            Some(NoveltyScope::Full) => NoveltyMode::FullHistory,
            Some(NoveltyScope::Window) => NoveltyMode::Window {
                capacity: self.window_capacity,
            },
            None => self.strategy.default_novelty(self.window_capacity),
        }
    }

    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Builder method to set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder method to set the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Builder method to set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builder method to set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Builder method to set the scheduling strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder method to set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder method to cap in-flight requests.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = Some(max);
        self
    }

    /// Builder method to set the pause between serial rounds.
    pub fn with_round_delay(mut self, delay: Duration) -> Self {
        self.round_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Builder method to bound the number of rounds.
    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Builder method to set the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Builder method to set the novelty scope.
    pub fn with_novelty_mode(mut self, scope: NoveltyScope) -> Self {
        self.novelty_mode = Some(scope);
        self
    }

    /// Builder method to set the novelty window capacity.
    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    /// Builder method to fix the prompt sampling seed.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Builder method to set the target dataset size.
    pub fn with_target_count(mut self, target: usize) -> Self {
        self.target_count = target;
        self
    }

    /// Builder method to set the checkpoint interval.
    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    /// Builder method to set the seed task file.
    pub fn with_seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = path.into();
        self
    }

    /// Builder method to set the output dataset file.
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }
}

/// Parse an environment variable value into a type.
fn parse_env_value<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("could not parse '{}'", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(config: &mut GenerationConfig, vars: &[(&str, &str)]) -> Result<(), ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config.apply_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.api_base, "https://api.deepseek.com");
        assert!((config.temperature - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, 3072);
        assert_eq!(config.stop_sequences, vec!["20.", "20:"]);
        assert_eq!(config.strategy, Strategy::Serial);
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.target_count, 52_000);
        assert!((config.similarity_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.checkpoint_interval, 100);
        assert_eq!(config.round_delay(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_novelty_mode_follows_strategy() {
        let serial = GenerationConfig::default();
        assert_eq!(serial.resolved_novelty_mode(), NoveltyMode::FullHistory);

        let batched = GenerationConfig::default().with_strategy(Strategy::Batched);
        assert_eq!(
            batched.resolved_novelty_mode(),
            NoveltyMode::Window { capacity: 1000 }
        );

        let overridden = batched
            .with_novelty_mode(NoveltyScope::Full)
            .with_window_capacity(10);
        assert_eq!(overridden.resolved_novelty_mode(), NoveltyMode::FullHistory);

        let window = GenerationConfig::default()
            .with_novelty_mode(NoveltyScope::Window)
            .with_window_capacity(10);
        assert_eq!(
            window.resolved_novelty_mode(),
            NoveltyMode::Window { capacity: 10 }
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = GenerationConfig::default();
        apply(
            &mut config,
            &[
                ("INSTRUCT_MODEL", "gpt-4o-mini"),
                ("OPENAI_API_KEY", "sk-fallback"),
                ("INSTRUCT_STRATEGY", "batched"),
                ("INSTRUCT_BATCH_SIZE", "8"),
                ("INSTRUCT_STOP", "20., 20:,"),
                ("INSTRUCT_NOVELTY_MODE", "full"),
                ("INSTRUCT_MAX_ROUNDS", "3"),
            ],
        )
        .expect("valid env");

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.as_deref(), Some("sk-fallback"));
        assert_eq!(config.strategy, Strategy::Batched);
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.stop_sequences, vec!["20.", "20:"]);
        assert_eq!(config.novelty_mode, Some(NoveltyScope::Full));
        assert_eq!(config.max_rounds, Some(3));
    }

    #[test]
    fn test_env_primary_key_wins() {
        let mut config = GenerationConfig::default();
        apply(
            &mut config,
            &[("INSTRUCT_API_KEY", "sk-primary"), ("OPENAI_API_KEY", "sk-other")],
        )
        .expect("valid env");
        assert_eq!(config.api_key.as_deref(), Some("sk-primary"));
    }

    #[test]
    fn test_env_invalid_value() {
        let mut config = GenerationConfig::default();
        let err = apply(&mut config, &[("INSTRUCT_BATCH_SIZE", "many")]).unwrap_err();
        assert!(err.to_string().contains("INSTRUCT_BATCH_SIZE"));

        let err = apply(&mut config, &[("INSTRUCT_STRATEGY", "parallel-ish")]).unwrap_err();
        assert!(err.to_string().contains("INSTRUCT_STRATEGY"));
    }

    #[test]
    fn test_yaml_partial() {
        let yaml = "strategy: batched\nbatch_size: 16\nnovelty_mode: window\nseed_file: seeds.jsonl\n";
        let config = GenerationConfig::from_yaml_str(yaml).expect("valid yaml");

        assert_eq!(config.strategy, Strategy::Batched);
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.novelty_mode, Some(NoveltyScope::Window));
        assert_eq!(config.seed_file, PathBuf::from("seeds.jsonl"));
        assert_eq!(config.model, "deepseek-chat");

        assert_eq!(
            GenerationConfig::from_yaml_str("  \n").expect("empty"),
            GenerationConfig::default()
        );
    }

    #[test]
    fn test_yaml_file_errors() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "batch_size: [1, 2").expect("write");

        let err = GenerationConfig::from_yaml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));

        let err = GenerationConfig::from_yaml_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            (GenerationConfig::default().with_batch_size(0), "batch_size"),
            (GenerationConfig::default().with_target_count(0), "target_count"),
            (GenerationConfig::default().with_checkpoint_interval(0), "checkpoint_interval"),
            (GenerationConfig::default().with_window_capacity(0), "window_capacity"),
            (GenerationConfig::default().with_temperature(2.5), "temperature"),
            (GenerationConfig::default().with_similarity_threshold(1.5), "similarity_threshold"),
            (GenerationConfig::default().with_model(" "), "model"),
            (GenerationConfig::default().with_max_concurrency(0), "max_concurrency"),
        ];

        for (config, field) in cases {
            let err = config.validate().unwrap_err();
            assert!(
                err.to_string().contains(field),
                "expected '{}' in '{}'",
                field,
                err
            );
        }
    }

    #[test]
    fn test_requested_examples_not_tied_to_sample_size() {
        let config = GenerationConfig {
            sample_size: 5,
            requested_examples: 2,
            ..GenerationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("Serial".parse::<Strategy>(), Ok(Strategy::Serial));
        assert_eq!("async".parse::<Strategy>(), Ok(Strategy::Batched));
        assert!("warp".parse::<Strategy>().is_err());
        assert_eq!("window".parse::<NoveltyScope>(), Ok(NoveltyScope::Window));
    }
}
