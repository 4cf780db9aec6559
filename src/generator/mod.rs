//! Turning raw model output into candidate tasks.
//!
//! See [`parser`] for the line-oriented state machine.

pub mod parser;

pub use parser::{Candidate, ResponseParser};
