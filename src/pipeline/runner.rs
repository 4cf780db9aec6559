//! The self-instruct generation loop.
//!
//! Each round builds one prompt (serial) or a batch of prompts (batched),
//! sends them to the completion provider, parses every returned chunk into
//! candidates and admits those that pass validation and the novelty filter.
//! All admission happens after the round's requests have resolved, so the
//! filter and the dataset are only ever touched from one task.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dataset::{load_seed_tasks, InstructionRecord};
use crate::diversity::{NoveltyFilter, NoveltyVerdict};
use crate::error::{DatasetError, LlmError, PromptError};
use crate::generator::ResponseParser;
use crate::llm::{complete, GenerationRequest, LlmProvider, Message};
use crate::prompts::PromptBuilder;
use crate::validation::InstructionValidator;

use super::accumulator::DatasetAccumulator;
use super::config::{ConfigError, GenerationConfig, Strategy};

/// Errors that abort a generation run.
///
/// Failed completion requests are not among them: they are logged and the
/// round simply yields no candidates.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub run_id: Uuid,
    pub strategy: Strategy,
    pub novelty_mode: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rounds: u64,
    pub requests: u64,
    pub failed_requests: u64,
    pub candidates: u64,
    pub rejected_invalid: u64,
    pub rejected_similar: u64,
    pub accepted: usize,
    pub checkpoints: usize,
    pub target: usize,
    pub reached_target: bool,
    pub output_file: PathBuf,
}

#[derive(Debug, Default, Clone, Copy)]
struct RoundStats {
    requests: u64,
    failed_requests: u64,
    candidates: u64,
    rejected_invalid: u64,
    rejected_similar: u64,
    accepted: u64,
}

impl RoundStats {
    fn absorb(&mut self, other: RoundStats) {
        self.requests += other.requests;
        self.failed_requests += other.failed_requests;
        self.candidates += other.candidates;
        self.rejected_invalid += other.rejected_invalid;
        self.rejected_similar += other.rejected_similar;
        self.accepted += other.accepted;
    }
}

/// Drives generation until the target count is reached.
pub struct SelfInstructRunner {
    provider: Arc<dyn LlmProvider>,
    config: GenerationConfig,
    parser: ResponseParser,
    validator: InstructionValidator,
}

impl SelfInstructRunner {
    pub fn new(provider: Arc<dyn LlmProvider>, config: GenerationConfig) -> Self {
        Self {
            provider,
            config,
            parser: ResponseParser::new(),
            validator: InstructionValidator::new(),
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Loads the seed file and runs the loop.
    pub async fn run(&self) -> Result<GenerationSummary, GenerationError> {
        self.config.validate()?;
        let seeds = load_seed_tasks(&self.config.seed_file).await?;
        info!(
            count = seeds.len(),
            path = %self.config.seed_file.display(),
            "Loaded seed tasks"
        );
        self.run_with_seeds(seeds).await
    }

    /// Runs the loop from already-loaded seed records.
    pub async fn run_with_seeds(
        &self,
        seeds: Vec<InstructionRecord>,
    ) -> Result<GenerationSummary, GenerationError> {
        let config = &self.config;
        config.validate()?;

        if seeds.len() < config.sample_size {
            return Err(PromptError::PoolTooSmall {
                available: seeds.len(),
                required: config.sample_size,
            }
            .into());
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mode = config.resolved_novelty_mode();

        // Serial runs compare against the seeds too; batched runs start empty.
        let mut filter = match config.strategy {
            Strategy::Serial => NoveltyFilter::seeded(
                mode,
                config.similarity_threshold,
                seeds.iter().map(|s| s.instruction.as_str()),
            ),
            Strategy::Batched => NoveltyFilter::new(mode, config.similarity_threshold),
        };

        let mut prompts = PromptBuilder::new()
            .with_sample_size(config.sample_size)
            .with_requested_examples(config.requested_examples);
        if let Some(seed) = config.rng_seed {
            prompts = prompts.with_seed(seed);
        }

        let mut pool = seeds;
        let mut accumulator = DatasetAccumulator::new(
            config.target_count,
            config.checkpoint_interval,
            &config.output_file,
        );

        info!(
            %run_id,
            strategy = %config.strategy,
            novelty = %mode,
            target = config.target_count,
            model = %config.model,
            "Starting generation"
        );

        let mut totals = RoundStats::default();
        let mut rounds: u64 = 0;

        while !accumulator.is_complete() {
            if let Some(max_rounds) = config.max_rounds {
                if rounds >= max_rounds {
                    warn!(
                        rounds,
                        accepted = accumulator.len(),
                        target = config.target_count,
                        "Round limit reached before target"
                    );
                    break;
                }
            }
            rounds += 1;

            let request_count = match config.strategy {
                Strategy::Serial => 1,
                Strategy::Batched => config.batch_size,
            };
            let requests = prompts
                .build_batch(&pool, request_count)?
                .into_iter()
                .map(|messages| self.request(messages))
                .collect();
            let responses = self.dispatch(requests).await;

            let mut stats = RoundStats {
                requests: responses.len() as u64,
                ..RoundStats::default()
            };

            'responses: for response in responses {
                let text = match response {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(round = rounds, error = %e, "Completion request failed");
                        stats.failed_requests += 1;
                        continue;
                    }
                };

                for candidate in self.parser.parse(&text, rounds) {
                    if accumulator.is_complete() {
                        break 'responses;
                    }
                    stats.candidates += 1;

                    let record = match self.validator.validate(candidate) {
                        Ok(record) => record,
                        Err(_) => {
                            stats.rejected_invalid += 1;
                            continue;
                        }
                    };

                    if let NoveltyVerdict::Similar(_) = filter.check(&record.instruction) {
                        stats.rejected_similar += 1;
                        continue;
                    }

                    filter.insert(&record.instruction);
                    if config.strategy == Strategy::Serial {
                        pool.push(record.clone());
                    }
                    accumulator.push(record).await?;
                    stats.accepted += 1;
                }
            }

            info!(
                round = rounds,
                accepted = accumulator.len(),
                target = config.target_count,
                "Round complete"
            );
            debug!(
                round = rounds,
                requests = stats.requests,
                failed = stats.failed_requests,
                candidates = stats.candidates,
                rejected_invalid = stats.rejected_invalid,
                rejected_similar = stats.rejected_similar,
                accepted = stats.accepted,
                "Round counters"
            );
            totals.absorb(stats);

            if config.strategy == Strategy::Serial && !accumulator.is_complete() {
                tokio::time::sleep(config.round_delay()).await;
            }
        }

        let reached_target = accumulator.is_complete();
        let checkpoints = accumulator.checkpoints();
        let output_file = accumulator.output_file().to_path_buf();
        let records = accumulator.finish().await?;

        let summary = GenerationSummary {
            run_id,
            strategy: config.strategy,
            novelty_mode: mode.to_string(),
            started_at,
            finished_at: Utc::now(),
            rounds,
            requests: totals.requests,
            failed_requests: totals.failed_requests,
            candidates: totals.candidates,
            rejected_invalid: totals.rejected_invalid,
            rejected_similar: totals.rejected_similar,
            accepted: records.len(),
            checkpoints,
            target: config.target_count,
            reached_target,
            output_file,
        };

        info!(
            %run_id,
            rounds,
            accepted = summary.accepted,
            failed_requests = summary.failed_requests,
            "Generation finished"
        );
        Ok(summary)
    }

    fn request(&self, messages: Vec<Message>) -> GenerationRequest {
        GenerationRequest::new(self.config.model.clone(), messages)
            .with_temperature(self.config.temperature)
            .with_top_p(self.config.top_p)
            .with_max_tokens(self.config.max_tokens)
            .with_stop(self.config.stop_sequences.clone())
    }

    /// Sends every request and waits for all of them, preserving order.
    ///
    /// With `max_concurrency` set, at most that many requests are in flight.
    async fn dispatch(&self, requests: Vec<GenerationRequest>) -> Vec<Result<String, LlmError>> {
        let permits = self.config.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

        let mut calls = Vec::with_capacity(requests.len());
        for request in requests {
            let provider = Arc::clone(&self.provider);
            let permits = permits.clone();
            calls.push(async move {
                // Never closed, so acquire does not fail.
                let _permit = match &permits {
                    Some(sem) => sem.acquire().await.ok(),
                    None => None,
                };
                complete(provider.as_ref(), request).await
            });
        }

        futures::future::join_all(calls).await
    }
}
