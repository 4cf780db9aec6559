//! Acceptance rules for generated instructions.
//!
//! A candidate is first normalized (fields trimmed, `<noinput>` mapped to an
//! empty input) and then checked against the rule set in a fixed order; the
//! first failing rule short-circuits the rest.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::dataset::InstructionRecord;
use crate::generator::Candidate;
use crate::prompts::NO_INPUT_MARKER;

/// Instructions with this many words or fewer are rejected.
pub const MIN_WORDS_EXCLUSIVE: usize = 3;

/// Instructions with more words than this are rejected.
pub const MAX_WORDS: usize = 150;

/// Words that indicate a task needs non-text input or output.
///
/// Matched case-insensitively at the start of a word, so "pictured" and
/// "drawing" are caught while "paragraph" does not trip "graph". "go to"
/// matches across any run of whitespace.
pub const MODALITY_BLACKLIST: &[&str] = &[
    "image",
    "images",
    "graph",
    "graphs",
    "picture",
    "pictures",
    "file",
    "files",
    "map",
    "maps",
    "draw",
    "plot",
    "go to",
    "video",
    "audio",
    "music",
    "flowchart",
    "diagram",
];

fn blacklist_regex() -> &'static Regex {
    static BLACKLIST: OnceLock<Regex> = OnceLock::new();
    BLACKLIST.get_or_init(|| {
        let alternatives = MODALITY_BLACKLIST
            .iter()
            .map(|word| regex::escape(word).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{})", alternatives))
            .expect("blacklist pattern is built from literal words")
    })
}

/// Returns the first blacklisted word found in `instruction`, lowercased.
///
/// The returned text is the list entry that matched, not the whole word.
pub fn find_blacklisted(instruction: &str) -> Option<String> {
    blacklist_regex().find(instruction).map(|m| {
        m.as_str()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    })
}

/// Reason a candidate was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("instruction has {0} words, need more than {MIN_WORDS_EXCLUSIVE}")]
    TooFewWords(usize),

    #[error("instruction has {0} words, limit is {MAX_WORDS}")]
    TooManyWords(usize),

    #[error("instruction mentions non-text modality '{0}'")]
    BlacklistedWord(String),

    #[error("instruction starts with punctuation")]
    LeadingPunctuation,

    #[error("instruction starts with a non-ASCII character")]
    NonAsciiStart,
}

/// Normalizes a parsed candidate into a record without applying the rules.
///
/// Fails only if one of the three fields was never parsed.
pub fn normalize_candidate(candidate: Candidate) -> Result<InstructionRecord, Rejection> {
    let instruction = candidate
        .instruction
        .ok_or(Rejection::MissingField("instruction"))?;
    let input = candidate.input.ok_or(Rejection::MissingField("input"))?;
    let output = candidate.output.ok_or(Rejection::MissingField("output"))?;

    let input = input.trim();
    let input = if input.eq_ignore_ascii_case(NO_INPUT_MARKER) {
        ""
    } else {
        input
    };

    Ok(InstructionRecord {
        instruction: instruction.trim().to_string(),
        input: input.to_string(),
        output: output.trim().to_string(),
    })
}

/// Rule-based validator for generated instructions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionValidator;

impl InstructionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes and checks a candidate, returning the accepted record.
    pub fn validate(&self, candidate: Candidate) -> Result<InstructionRecord, Rejection> {
        let record = normalize_candidate(candidate)?;
        self.check(&record)?;
        Ok(record)
    }

    /// Applies the acceptance rules to an already-normalized record.
    pub fn check(&self, record: &InstructionRecord) -> Result<(), Rejection> {
        let instruction = record.instruction.as_str();

        let words = instruction.split_whitespace().count();
        if words <= MIN_WORDS_EXCLUSIVE {
            return Err(Rejection::TooFewWords(words));
        }
        if words > MAX_WORDS {
            return Err(Rejection::TooManyWords(words));
        }

        if let Some(word) = find_blacklisted(instruction) {
            return Err(Rejection::BlacklistedWord(word));
        }

        // Non-empty here: the word count above is at least 4.
        let Some(first) = instruction.chars().next() else {
            return Err(Rejection::TooFewWords(0));
        };
        if first.is_ascii_punctuation() {
            return Err(Rejection::LeadingPunctuation);
        }
        if !first.is_ascii() {
            return Err(Rejection::NonAsciiStart);
        }

        Ok(())
    }

    /// Convenience predicate over [`InstructionValidator::check`].
    pub fn is_valid(&self, record: &InstructionRecord) -> bool {
        self.check(record).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(instruction: &str, input: &str, output: &str) -> Candidate {
        Candidate::complete(instruction, input, output, 0)
    }

    #[test]
    fn test_accepts_plain_instruction() {
        let record = InstructionValidator::new()
            .validate(candidate(
                "Summarize the following paragraph in one sentence.",
                "Rust is a systems language.",
                "Rust is for systems.",
            ))
            .expect("should accept");
        assert_eq!(
            record.instruction,
            "Summarize the following paragraph in one sentence."
        );
    }

    #[test]
    fn test_rejects_short_instruction() {
        let result = InstructionValidator::new().validate(candidate("Go.", "", "ok"));
        assert_eq!(result, Err(Rejection::TooFewWords(1)));

        let result =
            InstructionValidator::new().validate(candidate("Name three fruits", "", "ok"));
        assert_eq!(result, Err(Rejection::TooFewWords(3)));
    }

    #[test]
    fn test_rejects_long_instruction() {
        let long = vec!["word"; 151].join(" ");
        let result = InstructionValidator::new().validate(candidate(&long, "", "ok"));
        assert_eq!(result, Err(Rejection::TooManyWords(151)));

        let limit = vec!["word"; 150].join(" ");
        assert!(InstructionValidator::new()
            .validate(candidate(&limit, "", "ok"))
            .is_ok());
    }

    #[test]
    fn test_rejects_blacklisted_words_case_insensitive() {
        let result =
            InstructionValidator::new().validate(candidate("Describe the Picture below.", "", "x"));
        assert_eq!(
            result,
            Err(Rejection::BlacklistedWord("picture".to_string()))
        );

        let result = InstructionValidator::new().validate(candidate(
            "Please Go  To the store and buy milk.",
            "",
            "x",
        ));
        assert_eq!(result, Err(Rejection::BlacklistedWord("go to".to_string())));

        let result = InstructionValidator::new().validate(candidate(
            "Upload these FILES to the shared drive.",
            "",
            "x",
        ));
        assert_eq!(result, Err(Rejection::BlacklistedWord("file".to_string())));
    }

    #[test]
    fn test_blacklist_matches_word_prefixes() {
        assert_eq!(find_blacklisted("Summarize the following paragraph."), None);
        assert_eq!(find_blacklisted("Write a short profile of a scientist."), None);
        assert_eq!(find_blacklisted("Explain the roadmap for the project."), None);
        assert_eq!(
            find_blacklisted("Plot the data, then describe the graph."),
            Some("plot".to_string())
        );
        assert_eq!(
            find_blacklisted("Describe the pictured landmark in two sentences."),
            Some("picture".to_string())
        );
        assert_eq!(
            find_blacklisted("Summarize the drawing techniques used by Monet."),
            Some("draw".to_string())
        );
        assert_eq!(
            find_blacklisted("Explain what a picturebook is for children."),
            Some("picture".to_string())
        );
        assert_eq!(
            find_blacklisted("Suggest a plotting library for Rust."),
            Some("plot".to_string())
        );
    }

    #[test]
    fn test_rejects_derived_modality_words() {
        let result = InstructionValidator::new().validate(candidate(
            "Describe the pictured landmark in two sentences.",
            "",
            "x",
        ));
        assert_eq!(
            result,
            Err(Rejection::BlacklistedWord("picture".to_string()))
        );

        let result = InstructionValidator::new().validate(candidate(
            "Outline a plan for mapping the office network.",
            "",
            "x",
        ));
        assert_eq!(result, Err(Rejection::BlacklistedWord("map".to_string())));
    }

    #[test]
    fn test_rejects_leading_punctuation_and_non_ascii() {
        let result = InstructionValidator::new().validate(candidate(
            "\"Explain the meaning of this proverb.\"",
            "",
            "x",
        ));
        assert_eq!(result, Err(Rejection::LeadingPunctuation));

        let result = InstructionValidator::new().validate(candidate(
            "¿Explain the meaning of this proverb?",
            "",
            "x",
        ));
        assert_eq!(result, Err(Rejection::NonAsciiStart));
    }

    #[test]
    fn test_missing_field() {
        let mut partial = candidate("Explain recursion to a child.", "", "x");
        partial.output = None;
        assert_eq!(
            InstructionValidator::new().validate(partial),
            Err(Rejection::MissingField("output"))
        );
    }

    #[test]
    fn test_normalization() {
        let record = normalize_candidate(candidate(
            "  Explain recursion to a child.  ",
            " <NoInput> ",
            " Recursion is... ",
        ))
        .expect("all fields present");

        assert_eq!(record.instruction, "Explain recursion to a child.");
        assert_eq!(record.input, "");
        assert_eq!(record.output, "Recursion is...");
    }

    #[test]
    fn test_validation_is_idempotent_on_accepted_records() {
        let validator = InstructionValidator::new();
        let accepted = validator
            .validate(candidate(
                " Convert the temperature from Celsius to Fahrenheit. ",
                "<noinput>",
                " 77F ",
            ))
            .expect("should accept");

        assert!(validator.is_valid(&accepted));
        let again = validator
            .validate(candidate(
                &accepted.instruction,
                &accepted.input,
                &accepted.output,
            ))
            .expect("should accept again");
        assert_eq!(again, accepted);
    }
}
