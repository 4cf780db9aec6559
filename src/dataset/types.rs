//! Record types shared by the seed loader, the generation loop and the exporters.

use serde::{Deserialize, Serialize};

/// One line of the seed file as written by hand.
///
/// Extra fields (`id`, `name`, `is_classification`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTask {
    pub instruction: String,
    pub instances: Vec<SeedInstance>,
}

/// An input/output pair attached to a seed task.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedInstance {
    pub input: String,
    pub output: String,
}

/// A flat (instruction, input, output) triple.
///
/// Seeds are loaded into this shape and never mutated; generated candidates
/// take this shape once they pass validation. An empty `input` means the task
/// needs no input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    pub instruction: String,
    pub input: String,
    pub output: String,
}

impl InstructionRecord {
    pub fn new(
        instruction: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            input: input.into(),
            output: output.into(),
        }
    }

    /// Returns true when the record carries a non-empty input.
    pub fn has_input(&self) -> bool {
        !self.input.is_empty()
    }
}
