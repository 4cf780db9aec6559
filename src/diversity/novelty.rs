//! Novelty screening of candidate instructions.
//!
//! A candidate is rejected when its ROUGE-L score against any remembered
//! instruction exceeds the threshold. Scores are always computed as
//! `score(existing, candidate)`. An empty memory accepts everything.

use serde::{Deserialize, Serialize};

use super::rouge::{tokenize, RougeL};
use super::window::{RecentWindow, DEFAULT_WINDOW_CAPACITY};

/// Default maximum allowed ROUGE-L overlap.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Which instructions a candidate is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum NoveltyMode {
    /// Every instruction inserted so far.
    #[default]
    FullHistory,
    /// Only the most recent `capacity` instructions.
    Window { capacity: usize },
}

impl std::fmt::Display for NoveltyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoveltyMode::FullHistory => write!(f, "full-history"),
            NoveltyMode::Window { capacity } => write!(f, "window({})", capacity),
        }
    }
}

impl NoveltyMode {
    /// Window mode with the default capacity.
    pub fn window() -> Self {
        NoveltyMode::Window {
            capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

#[derive(Debug, Clone)]
enum Memory {
    Full(Vec<Vec<String>>),
    Recent(RecentWindow<Vec<String>>),
}

/// Outcome of a novelty check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoveltyVerdict {
    Novel,
    /// Too close to a remembered instruction; carries the offending score.
    Similar(f64),
}

impl NoveltyVerdict {
    pub fn is_novel(&self) -> bool {
        matches!(self, NoveltyVerdict::Novel)
    }
}

/// Remembers accepted instructions and screens new ones against them.
///
/// Instructions are stored pre-tokenized so each check only tokenizes the
/// candidate.
#[derive(Debug, Clone)]
pub struct NoveltyFilter {
    threshold: f64,
    mode: NoveltyMode,
    memory: Memory,
    scorer: RougeL,
}

impl NoveltyFilter {
    pub fn new(mode: NoveltyMode, threshold: f64) -> Self {
        let memory = match mode {
            NoveltyMode::FullHistory => Memory::Full(Vec::new()),
            NoveltyMode::Window { capacity } => Memory::Recent(RecentWindow::new(capacity)),
        };
        Self {
            threshold,
            mode,
            memory,
            scorer: RougeL::new(),
        }
    }

    /// Creates a filter that already remembers `instructions`, in order.
    pub fn seeded<I, S>(mode: NoveltyMode, threshold: f64, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new(mode, threshold);
        for instruction in instructions {
            filter.insert(instruction.as_ref());
        }
        filter
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mode(&self) -> NoveltyMode {
        self.mode
    }

    /// Number of instructions currently compared against.
    pub fn len(&self) -> usize {
        match &self.memory {
            Memory::Full(items) => items.len(),
            Memory::Recent(window) => window.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks `candidate` against memory without remembering it.
    pub fn check(&self, candidate: &str) -> NoveltyVerdict {
        let candidate = tokenize(candidate);
        let mut remembered: Box<dyn Iterator<Item = &Vec<String>>> = match &self.memory {
            Memory::Full(items) => Box::new(items.iter()),
            Memory::Recent(window) => Box::new(window.iter()),
        };

        remembered
            .find_map(|existing| {
                let score = self.scorer.score_tokens(existing, &candidate);
                (score > self.threshold).then_some(NoveltyVerdict::Similar(score))
            })
            .unwrap_or(NoveltyVerdict::Novel)
    }

    pub fn is_novel(&self, candidate: &str) -> bool {
        self.check(candidate).is_novel()
    }

    /// Remembers an accepted instruction.
    pub fn insert(&mut self, instruction: &str) {
        let tokens = tokenize(instruction);
        match &mut self.memory {
            Memory::Full(items) => items.push(tokens),
            Memory::Recent(window) => {
                window.push(tokens);
            }
        }
    }

    /// Checks `candidate` and remembers it if novel.
    pub fn admit(&mut self, candidate: &str) -> NoveltyVerdict {
        let verdict = self.check(candidate);
        if verdict.is_novel() {
            self.insert(candidate);
        }
        verdict
    }
}

impl Default for NoveltyFilter {
    fn default() -> Self {
        Self::new(NoveltyMode::default(), DEFAULT_SIMILARITY_THRESHOLD)
    }
}
