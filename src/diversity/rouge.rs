//! ROUGE-L similarity between instructions.
//!
//! Text is lowercased, every run of non-alphanumeric characters becomes a
//! separator, and the remaining `[a-z0-9]+` tokens are compared by longest
//! common subsequence. The score is the F-measure of LCS precision (against
//! the prediction) and recall (against the target).

use std::sync::OnceLock;

use regex::Regex;

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("literal pattern"))
}

/// Splits text into lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    separator_regex()
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|token| token.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Length of the longest common subsequence of two token slices.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Single rolling row over `b`.
    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        let mut diagonal = 0;
        for (j, y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Scorer for the LCS-based F-measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct RougeL;

impl RougeL {
    pub fn new() -> Self {
        Self
    }

    /// Scores `prediction` against `target`, in `[0.0, 1.0]`.
    ///
    /// Returns 0.0 when either side has no tokens.
    pub fn score(&self, target: &str, prediction: &str) -> f64 {
        let target = tokenize(target);
        let prediction = tokenize(prediction);
        self.score_tokens(&target, &prediction)
    }

    /// Scores pre-tokenized text.
    pub fn score_tokens(&self, target: &[String], prediction: &[String]) -> f64 {
        if target.is_empty() || prediction.is_empty() {
            return 0.0;
        }

        let lcs = lcs_length(target, prediction) as f64;
        let precision = lcs / prediction.len() as f64;
        let recall = lcs / target.len() as f64;

        if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }
}
