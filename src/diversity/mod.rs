//! Similarity, novelty screening and diversity analysis of instructions.
//!
//! - [`rouge`]: ROUGE-L scoring used to detect near-duplicates.
//! - [`window`]: fixed-capacity recency window.
//! - [`novelty`]: the [`NoveltyFilter`] applied during generation.
//! - [`metrics`] and [`verbs`]: post-hoc verb/object diversity reports.
//!
//! ```
//! use instruct_forge::diversity::{NoveltyFilter, NoveltyMode};
//!
//! let mut filter = NoveltyFilter::new(NoveltyMode::FullHistory, 0.7);
//! assert!(filter.admit("Write a haiku about the sea.").is_novel());
//! assert!(!filter.admit("Write a haiku about the sea!").is_novel());
//! ```

pub mod metrics;
pub mod novelty;
pub mod rouge;
pub mod verbs;
pub mod window;

pub use metrics::{gini_coefficient, normalized_entropy, shannon_entropy};
pub use novelty::{NoveltyFilter, NoveltyMode, NoveltyVerdict, DEFAULT_SIMILARITY_THRESHOLD};
pub use rouge::{lcs_length, tokenize, RougeL};
pub use verbs::{
    DiversityReport, HeuristicExtractor, SunburstRow, VerbObjectExtractor, VerbObjectHierarchy,
    VerbSummary, DEFAULT_MIN_COUNT,
};
pub use window::{RecentWindow, DEFAULT_WINDOW_CAPACITY};
