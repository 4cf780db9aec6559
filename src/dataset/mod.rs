//! Seed tasks and the generated dataset file.
//!
//! - [`seed`] reads the hand-written newline-delimited JSON seed file
//! - [`store`] writes and reads the generated dataset (one JSON array)
//! - [`types`] holds the record shapes both sides share

pub mod seed;
pub mod store;
pub mod types;

pub use seed::{load_seed_tasks, parse_seed_lines};
pub use store::{load_dataset, save_dataset};
pub use types::{InstructionRecord, SeedInstance, SeedTask};
