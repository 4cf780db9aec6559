//! Command-line interface for instruct-forge.
//!
//! Provides the `generate`, `split` and `analyze` commands.

mod commands;

pub use commands::{
    parse_cli, resolve_generation_config, run, run_with_cli, AnalyzeArgs, Cli, Commands,
    GenerateArgs, SplitArgs,
};
