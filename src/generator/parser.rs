//! Parsing of raw completion text into candidate tasks.
//!
//! The model is asked to emit tasks separated by `###`, each with
//! `Instruction:`, `Input:` and `Output:` lines. Parsing is a small state
//! machine per chunk: a marker line moves the cursor to its field and seeds the
//! field with the text after the marker; any other non-empty line is appended
//! (space-joined) to the field under the cursor, or dropped if no marker has
//! been seen yet.

use serde::{Deserialize, Serialize};

use crate::prompts::TASK_DELIMITER;

const INSTRUCTION_MARKER: &str = "Instruction:";
const INPUT_MARKER: &str = "Input:";
const OUTPUT_MARKER: &str = "Output:";

/// A task parsed out of model output, not yet validated.
///
/// Any field may be missing if its marker never appeared in the chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub instruction: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    /// Generation round that produced this candidate.
    pub round: u64,
}

impl Candidate {
    /// Creates a fully populated candidate.
    pub fn complete(
        instruction: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
        round: u64,
    ) -> Self {
        Self {
            instruction: Some(instruction.into()),
            input: Some(input.into()),
            output: Some(output.into()),
            round,
        }
    }

    fn field_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::None => None,
            Field::Instruction => Some(&mut self.instruction),
            Field::Input => Some(&mut self.input),
            Field::Output => Some(&mut self.output),
        }
    }
}

/// Which field continuation lines are currently appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Instruction,
    Input,
    Output,
}

impl Field {
    /// Classifies a line. Markers are checked in instruction, input, output
    /// order and may appear anywhere in the line.
    fn marker_in(line: &str) -> Option<(Field, &'static str)> {
        [
            (Field::Instruction, INSTRUCTION_MARKER),
            (Field::Input, INPUT_MARKER),
            (Field::Output, OUTPUT_MARKER),
        ]
        .into_iter()
        .find(|(_, marker)| line.contains(marker))
    }
}

/// Splits completion text into chunks and parses each into a [`Candidate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses every non-blank `###`-delimited chunk of `text`.
    pub fn parse(&self, text: &str, round: u64) -> Vec<Candidate> {
        text.split(TASK_DELIMITER)
            .filter(|chunk| !chunk.trim().is_empty())
            .map(|chunk| self.parse_chunk(chunk, round))
            .collect()
    }

    /// Parses a single chunk.
    pub fn parse_chunk(&self, chunk: &str, round: u64) -> Candidate {
        let mut candidate = Candidate {
            round,
            ..Candidate::default()
        };
        let mut cursor = Field::None;

        for raw_line in chunk.trim().lines() {
            let line = raw_line.trim();

            if let Some((field, marker)) = Field::marker_in(line) {
                cursor = field;
                // Text after the last occurrence of the marker; a repeated
                // marker line replaces the earlier value.
                let value = line.rsplit(marker).next().unwrap_or_default().trim();
                if let Some(slot) = candidate.field_mut(field) {
                    *slot = Some(value.to_string());
                }
                continue;
            }

            if line.is_empty() {
                continue;
            }

            if let Some(slot) = candidate.field_mut(cursor) {
                let value = slot.get_or_insert_with(String::new);
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(line);
            }
        }

        candidate
    }
}
