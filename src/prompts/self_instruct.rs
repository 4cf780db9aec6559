//! Self-instruct prompt construction.
//!
//! Every request is a fresh three-message conversation: a fixed system prompt,
//! a fixed list of task requirements, and a block of examples drawn uniformly
//! at random (without replacement) from the example pool.

use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::dataset::InstructionRecord;
use crate::error::PromptError;
use crate::llm::Message;

/// Number of examples shown per prompt.
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Number of new tasks requested per completion.
pub const DEFAULT_REQUESTED_EXAMPLES: usize = 20;

/// Marker used in prompts and model output for "this task takes no input".
pub const NO_INPUT_MARKER: &str = "<noinput>";

/// Delimiter between tasks in prompts and model output.
pub const TASK_DELIMITER: &str = "###";

/// System prompt sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates diverse task instructions. These instructions will be used to evaluate language models.";

/// Requirements message sent with every request.
pub const TASK_REQUIREMENTS: &str = r#"Generate diverse task instructions following these requirements:
1. Try not to repeat the verb for each instruction to maximize diversity.
2. The language should be diverse. Combine questions with imperative instructions.
3. Include diverse task types (generation, classification, editing, etc.).
4. Tasks should be completable by a language model (no visual/audio output or real-world actions).
5. Use English and keep instructions to 1-2 sentences.
6. For each instruction, provide:
   - An input (use realistic data, max 100 words)
   - If no specific input needed, use "<noinput>"
   - An appropriate output (max 100 words)

Format each task as:
###
Instruction: [instruction]
Input: [input]
Output: [output]
###"#;

/// Builds randomized self-instruct prompts from an example pool.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    sample_size: usize,
    requested_examples: usize,
    rng: ChaCha8Rng,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// Creates a builder with the default sample size and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            requested_examples: DEFAULT_REQUESTED_EXAMPLES,
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Makes example selection reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_requested_examples(mut self, requested: usize) -> Self {
        self.requested_examples = requested;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Builds one prompt, re-sampling the examples.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::PoolTooSmall`] if the pool holds fewer records
    /// than the sample size.
    pub fn build(&mut self, pool: &[InstructionRecord]) -> Result<Vec<Message>, PromptError> {
        if pool.len() < self.sample_size {
            return Err(PromptError::PoolTooSmall {
                available: pool.len(),
                required: self.sample_size,
            });
        }

        let picked: Vec<&InstructionRecord> =
            index::sample(&mut self.rng, pool.len(), self.sample_size)
                .into_iter()
                .map(|i| &pool[i])
                .collect();

        Ok(vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(TASK_REQUIREMENTS),
            Message::user(self.render_examples(&picked)),
        ])
    }

    /// Builds `count` prompts, each with an independent sample.
    pub fn build_batch(
        &mut self,
        pool: &[InstructionRecord],
        count: usize,
    ) -> Result<Vec<Vec<Message>>, PromptError> {
        (0..count).map(|_| self.build(pool)).collect()
    }

    /// Renders the examples block, closing with the request for new tasks.
    pub fn render_examples(&self, examples: &[&InstructionRecord]) -> String {
        let mut text = String::from("Here are some examples:\n\n");

        for task in examples {
            let input = if task.input.is_empty() {
                NO_INPUT_MARKER
            } else {
                task.input.as_str()
            };

            text.push_str(TASK_DELIMITER);
            text.push('\n');
            text.push_str(&format!(
                "Instruction: {}\n",
                normalize_instruction(&task.instruction)
            ));
            text.push_str(&format!("Input: {}\n", input));
            text.push_str(&format!("Output: {}\n", task.output));
        }

        text.push_str(&format!(
            "\nNow generate {} new, diverse task instructions following the same format:",
            self.requested_examples
        ));
        text
    }
}

/// Collapses whitespace runs to single spaces, trims, and strips trailing colons.
pub fn normalize_instruction(instruction: &str) -> String {
    let collapsed = instruction.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches(':').to_string()
}
