//! Verb/object breakdown of a set of instructions.
//!
//! Each instruction is reduced to a leading verb and the object it acts on,
//! counted into a two-level hierarchy and flattened into sunburst rows
//! (`label`, `parent`, `value`) that a plotting front-end can render directly.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::metrics::{gini_coefficient, normalized_entropy, shannon_entropy};
use crate::dataset::InstructionRecord;

/// Label used when no verb or object can be identified.
pub const OTHER: &str = "other";

/// Label of the sunburst root.
pub const ROOT_LABEL: &str = "instructions";

/// Default minimum count for a verb or object to appear in the sunburst.
pub const DEFAULT_MIN_COUNT: usize = 5;

/// Openers that do not make the instruction an imperative.
const NON_VERB_OPENERS: &[&str] = &[
    // question words
    "what", "why", "how", "who", "whom", "whose", "which", "when", "where",
    // auxiliaries and modals
    "is", "are", "was", "were", "am", "be", "do", "does", "did", "can", "could", "would",
    "should", "will", "shall", "may", "might", "must", "have", "has", "had",
    // pronouns, determiners, prepositions and conjunctions
    "i", "you", "we", "they", "he", "she", "it", "there", "here", "this", "that", "these",
    "those", "a", "an", "the", "my", "your", "our", "if", "in", "for", "as", "given", "based",
    "according", "using", "with", "after", "before", "from", "to", "on", "at", "by",
];

/// Words skipped when looking for the object after the verb.
const OBJECT_SKIP: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "me", "us", "him", "them", "some", "any", "each", "every", "all", "following",
    "given", "few", "several", "one", "two", "three", "four", "five", "six", "seven", "eight",
    "nine", "ten",
];

/// Words that end the search for an object.
const OBJECT_STOP: &[&str] = &[
    "to", "of", "in", "for", "about", "on", "with", "whether", "if", "how", "what", "why",
    "which", "who", "when", "where", "and", "or", "into", "from", "by", "as", "that",
];

/// Extracts a (verb, object) pair from an instruction.
pub trait VerbObjectExtractor {
    fn extract(&self, instruction: &str) -> (String, String);
}

/// Word-list heuristic for imperative instructions.
///
/// The verb is the first word unless it opens a question or a declarative
/// sentence. The object is the first word after the verb that is not a
/// determiner, pronoun or small number. Either falls back to [`OTHER`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    fn words(instruction: &str) -> Vec<String> {
        instruction
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect()
    }
}

impl VerbObjectExtractor for HeuristicExtractor {
    fn extract(&self, instruction: &str) -> (String, String) {
        let words = Self::words(instruction);

        let verb = match words.first() {
            Some(first)
                if first.chars().all(|c| c.is_ascii_alphabetic())
                    && !NON_VERB_OPENERS.contains(&first.as_str()) =>
            {
                first.clone()
            }
            _ => return (OTHER.to_string(), OTHER.to_string()),
        };

        let object = words[1..]
            .iter()
            .map(String::as_str)
            .find(|w| !OBJECT_SKIP.contains(w) && !w.chars().all(|c| c.is_ascii_digit()))
            .filter(|w| !OBJECT_STOP.contains(w))
            .map(str::to_string)
            .unwrap_or_else(|| OTHER.to_string());

        (verb, object)
    }
}

/// Verb → object → count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbObjectHierarchy {
    counts: BTreeMap<String, BTreeMap<String, usize>>,
}

impl VerbObjectHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the hierarchy over every instruction in `records`.
    pub fn build(records: &[InstructionRecord], extractor: &dyn VerbObjectExtractor) -> Self {
        let mut hierarchy = Self::new();
        for record in records {
            let (verb, object) = extractor.extract(&record.instruction);
            hierarchy.add(verb, object);
        }
        hierarchy
    }

    pub fn add(&mut self, verb: String, object: String) {
        *self
            .counts
            .entry(verb)
            .or_default()
            .entry(object)
            .or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.counts.values().flat_map(|objects| objects.values()).sum()
    }

    /// Count per verb.
    pub fn verb_distribution(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(verb, objects)| (verb.clone(), objects.values().sum()))
            .collect()
    }

    /// Verbs with their totals, most frequent first; ties alphabetical.
    pub fn verbs_by_frequency(&self) -> Vec<(&str, usize)> {
        let mut verbs: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(verb, objects)| (verb.as_str(), objects.values().sum()))
            .collect();
        verbs.sort_by(|a, b| b.1.cmp(&a.1));
        verbs
    }

    /// Objects of `verb`, most frequent first; ties alphabetical.
    pub fn objects_by_frequency(&self, verb: &str) -> Vec<(&str, usize)> {
        let mut objects: Vec<(&str, usize)> = self
            .counts
            .get(verb)
            .map(|objects| objects.iter().map(|(o, c)| (o.as_str(), *c)).collect())
            .unwrap_or_default();
        objects.sort_by(|a, b| b.1.cmp(&a.1));
        objects
    }

    /// Flattens into sunburst rows.
    ///
    /// The root carries the total of all instructions. Verbs below
    /// `min_count` are dropped with their objects; objects below `min_count`
    /// are dropped individually.
    pub fn sunburst(&self, min_count: usize) -> Vec<SunburstRow> {
        let mut rows = vec![SunburstRow {
            label: ROOT_LABEL.to_string(),
            parent: String::new(),
            value: self.total(),
        }];

        for (verb, total) in self.verbs_by_frequency() {
            if total < min_count {
                continue;
            }
            rows.push(SunburstRow {
                label: verb.to_string(),
                parent: ROOT_LABEL.to_string(),
                value: total,
            });
            for (object, count) in self.objects_by_frequency(verb) {
                if count >= min_count {
                    rows.push(SunburstRow {
                        label: format!("{}_{}", verb, object),
                        parent: verb.to_string(),
                        value: count,
                    });
                }
            }
        }

        rows
    }
}

/// One node of the sunburst chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunburstRow {
    pub label: String,
    pub parent: String,
    pub value: usize,
}

/// A verb with its most common objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbSummary {
    pub verb: String,
    pub count: usize,
    pub top_objects: Vec<(String, usize)>,
}

/// Diversity analysis of a dataset's instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiversityReport {
    pub instruction_count: usize,
    pub unique_verbs: usize,
    pub verb_entropy: f64,
    pub verb_normalized_entropy: f64,
    pub verb_gini: f64,
    pub top_verbs: Vec<VerbSummary>,
    pub sunburst: Vec<SunburstRow>,
}

impl DiversityReport {
    /// Builds a report from a hierarchy.
    pub fn from_hierarchy(
        hierarchy: &VerbObjectHierarchy,
        min_count: usize,
        top_verbs: usize,
        top_objects: usize,
    ) -> Self {
        let distribution = hierarchy.verb_distribution();

        let top_verbs = hierarchy
            .verbs_by_frequency()
            .into_iter()
            .take(top_verbs)
            .map(|(verb, count)| VerbSummary {
                verb: verb.to_string(),
                count,
                top_objects: hierarchy
                    .objects_by_frequency(verb)
                    .into_iter()
                    .take(top_objects)
                    .map(|(object, count)| (object.to_string(), count))
                    .collect(),
            })
            .collect();

        Self {
            instruction_count: hierarchy.total(),
            unique_verbs: distribution.len(),
            verb_entropy: shannon_entropy(&distribution),
            verb_normalized_entropy: normalized_entropy(&distribution),
            verb_gini: gini_coefficient(&distribution),
            top_verbs,
            sunburst: hierarchy.sunburst(min_count),
        }
    }

    /// Human-readable summary of the most common verbs and objects.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Instructions: {}\nUnique verbs: {}\nVerb entropy: {:.3} (normalized {:.3})\nVerb Gini: {:.3}\n\nTop verbs:\n",
            self.instruction_count,
            self.unique_verbs,
            self.verb_entropy,
            self.verb_normalized_entropy,
            self.verb_gini
        );
        for summary in &self.top_verbs {
            out.push_str(&format!("{}: {}\n", summary.verb, summary.count));
            for (object, count) in &summary.top_objects {
                out.push_str(&format!("  - {}: {}\n", object, count));
            }
        }
        out
    }
}
