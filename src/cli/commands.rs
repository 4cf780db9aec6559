//! CLI command definitions for instruct-forge.
//!
//! Three subcommands cover the whole workflow: `generate` grows a dataset
//! from seed tasks, `split` turns it into train/test files for fine-tuning,
//! and `analyze` reports on its verb/object diversity.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::dataset::load_dataset;
use crate::diversity::{
    DiversityReport, HeuristicExtractor, VerbObjectHierarchy, DEFAULT_MIN_COUNT,
};
use crate::error::LlmError;
use crate::export::{write_sft_split, DEFAULT_SPLIT_SEED, DEFAULT_TEST_RATIO};
use crate::llm::ChatCompletionClient;
use crate::pipeline::{GenerationConfig, NoveltyScope, SelfInstructRunner, Strategy};

/// Default generated dataset path, shared by every subcommand.
const DEFAULT_DATASET: &str = "data/alpaca_data.json";

/// Default directory for the train/test split.
const DEFAULT_SPLIT_DIR: &str = "data";

/// Default diversity report path.
const DEFAULT_REPORT: &str = "instruction_diversity.json";

/// Objects listed per verb in the printed summary.
const TOP_OBJECTS: usize = 5;

/// Self-instruct dataset generator.
#[derive(Parser)]
#[command(name = "instruct-forge")]
#[command(about = "Generate self-instruct datasets from seed tasks with an LLM")]
#[command(version)]
#[command(
    long_about = "instruct-forge bootstraps an instruction-tuning dataset from a small set of seed tasks.\n\nEach round samples seed examples into a prompt, asks a chat-completion API for new tasks, and keeps the ones that pass validation and are not near-duplicates of earlier tasks.\n\nExample usage:\n  instruct-forge generate -n 1000 --strategy batched --batch-size 50\n  instruct-forge split --test-ratio 0.1\n  instruct-forge analyze --min-count 5"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate instruction/input/output tasks from seed tasks.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Split a generated dataset into train.json and test.json.
    Split(SplitArgs),

    /// Report verb/object diversity of a generated dataset.
    Analyze(AnalyzeArgs),
}

/// Arguments for the generate command.
///
/// Every flag is optional and overrides the config file and environment.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// YAML configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// Newline-delimited JSON seed tasks.
    #[arg(long)]
    pub seed_file: Option<String>,

    /// Output dataset file (JSON array).
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Number of tasks to generate.
    #[arg(short = 'n', long)]
    pub target: Option<usize>,

    /// Model name sent with each request.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Base URL of the chat-completion API.
    #[arg(long)]
    pub api_base: Option<String>,

    /// API key (falls back to INSTRUCT_API_KEY, then OPENAI_API_KEY).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Scheduling strategy (serial or batched).
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Requests per round in batched mode.
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Maximum in-flight requests within a batch.
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// ROUGE-L similarity above which a candidate is a duplicate.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Novelty comparison scope (full or window).
    #[arg(long)]
    pub novelty: Option<NoveltyScope>,

    /// Number of recent instructions compared in window mode.
    #[arg(long)]
    pub window_capacity: Option<usize>,

    /// Stop after this many rounds even if the target is not reached.
    #[arg(long)]
    pub max_rounds: Option<u64>,

    /// Seed for example sampling.
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Print the run summary as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for the split command.
#[derive(Parser, Debug)]
pub struct SplitArgs {
    /// Generated dataset to split.
    #[arg(short = 'i', long, default_value = DEFAULT_DATASET)]
    pub input: String,

    /// Directory receiving train.json and test.json.
    #[arg(short = 'o', long, default_value = DEFAULT_SPLIT_DIR)]
    pub output_dir: String,

    /// Fraction of examples held out for testing.
    #[arg(long, default_value_t = DEFAULT_TEST_RATIO)]
    pub test_ratio: f64,

    /// Shuffle seed.
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    pub seed: u64,
}

/// Arguments for the analyze command.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Generated dataset to analyze.
    #[arg(short = 'i', long, default_value = DEFAULT_DATASET)]
    pub input: String,

    /// Where to write the JSON report.
    #[arg(short = 'o', long, default_value = DEFAULT_REPORT)]
    pub output: String,

    /// Minimum count for a verb or object to appear in the sunburst.
    #[arg(long, default_value_t = DEFAULT_MIN_COUNT)]
    pub min_count: usize,

    /// Number of verbs listed in the summary.
    #[arg(long, default_value = "10")]
    pub top: usize,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => run_generate_command(args).await,
        Commands::Split(args) => run_split_command(args).await,
        Commands::Analyze(args) => run_analyze_command(args).await,
    }
}

/// Builds the run configuration: defaults, then YAML, then environment, then flags.
pub fn resolve_generation_config(args: &GenerateArgs) -> anyhow::Result<GenerationConfig> {
    resolve_with_vars(args, |key| std::env::var(key).ok())
}

fn resolve_with_vars(
    args: &GenerateArgs,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config file {}", path))?,
        None => GenerationConfig::default(),
    };
    config.apply_vars(var)?;

    if let Some(path) = &args.seed_file {
        config = config.with_seed_file(path);
    }
    if let Some(path) = &args.output {
        config = config.with_output_file(path);
    }
    if let Some(target) = args.target {
        config = config.with_target_count(target);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(api_base) = &args.api_base {
        config = config.with_api_base(api_base);
    }
    if let Some(api_key) = &args.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy);
    }
    if let Some(batch_size) = args.batch_size {
        config = config.with_batch_size(batch_size);
    }
    if let Some(max) = args.max_concurrency {
        config = config.with_max_concurrency(max);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_similarity_threshold(threshold);
    }
    if let Some(scope) = args.novelty {
        config = config.with_novelty_mode(scope);
    }
    if let Some(capacity) = args.window_capacity {
        config = config.with_window_capacity(capacity);
    }
    if let Some(max_rounds) = args.max_rounds {
        config = config.with_max_rounds(max_rounds);
    }
    if let Some(seed) = args.rng_seed {
        config = config.with_rng_seed(seed);
    }

    config.validate()?;
    Ok(config)
}

async fn run_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let config = resolve_generation_config(&args)?;

    let api_key = config.api_key.clone().ok_or(LlmError::MissingApiKey)?;
    let client = ChatCompletionClient::with_timeout(
        config.api_base.clone(),
        Some(api_key),
        config.model.clone(),
        config.request_timeout(),
    )?;
    info!(
        api_base = %client.api_base(),
        model = %client.default_model(),
        "Using chat-completion API"
    );

    let runner = SelfInstructRunner::new(Arc::new(client), config);
    let summary = runner.run().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(
            accepted = summary.accepted,
            target = summary.target,
            rounds = summary.rounds,
            output = %summary.output_file.display(),
            "Generation complete"
        );
    }
    Ok(())
}

async fn run_split_command(args: SplitArgs) -> anyhow::Result<()> {
    let summary = write_sft_split(&args.input, &args.output_dir, args.test_ratio, args.seed)
        .await
        .with_context(|| format!("Failed to split {}", args.input))?;

    println!("{} training examples.", summary.train_count);
    println!("{} test examples.", summary.test_count);
    Ok(())
}

async fn run_analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let records = load_dataset(&args.input).await?;
    let hierarchy = VerbObjectHierarchy::build(&records, &HeuristicExtractor::new());
    let report =
        DiversityReport::from_hierarchy(&hierarchy, args.min_count, args.top, TOP_OBJECTS);

    let output = Path::new(&args.output);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(output, serde_json::to_string_pretty(&report)?)
        .await
        .with_context(|| format!("Failed to write report {}", args.output))?;

    info!(
        instructions = report.instruction_count,
        sunburst_rows = report.sunburst.len(),
        path = %output.display(),
        "Wrote diversity report"
    );
    print!("{}", report.summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        // Verify CLI definition is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_command_defaults() {
        let args = vec!["instruct-forge", "generate"];
        let cli = Cli::try_parse_from(args).expect("should parse");

        assert_eq!(cli.log_level, "info");
        match cli.command {
            Commands::Generate(args) => {
                assert!(args.config.is_none());
                assert!(args.target.is_none());
                assert!(args.strategy.is_none());
                assert!(args.novelty.is_none());
                assert!(!args.json);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_command_with_all_options() {
        let args = vec![
            "instruct-forge",
            "generate",
            "-n",
            "250",
            "-m",
            "gpt-4o-mini",
            "--api-base",
            "http://localhost:8000/v1",
            "--api-key",
            "sk-test",
            "--strategy",
            "batched",
            "--batch-size",
            "25",
            "--max-concurrency",
            "5",
            "--threshold",
            "0.6",
            "--novelty",
            "full",
            "--max-rounds",
            "40",
            "--rng-seed",
            "9",
            "-o",
            "out/data.json",
            "-j",
            "-l",
            "debug",
        ];
        let cli = Cli::try_parse_from(args).expect("should parse");

        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.target, Some(250));
                assert_eq!(args.model.as_deref(), Some("gpt-4o-mini"));
                assert_eq!(args.strategy, Some(Strategy::Batched));
                assert_eq!(args.novelty, Some(NoveltyScope::Full));
                assert_eq!(args.max_concurrency, Some(5));
                assert!(args.json);

                let config = resolve_generation_config(&args).expect("valid config");
                assert_eq!(config.target_count, 250);
                assert_eq!(config.api_base, "http://localhost:8000/v1");
                assert_eq!(config.api_key.as_deref(), Some("sk-test"));
                assert_eq!(config.batch_size, 25);
                assert_eq!(config.max_rounds, Some(40));
                assert_eq!(config.rng_seed, Some(9));
                assert_eq!(config.output_file, std::path::PathBuf::from("out/data.json"));
                assert!((config.similarity_threshold - 0.6).abs() < f64::EPSILON);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_alias() {
        let args = vec!["instruct-forge", "gen", "-n", "2"];
        let cli = Cli::try_parse_from(args).expect("should parse with alias");

        match cli.command {
            Commands::Generate(args) => assert_eq!(args.target, Some(2)),
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_rejects_unknown_strategy() {
        let args = vec!["instruct-forge", "generate", "--strategy", "turbo"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_generate_invalid_override_fails_validation() {
        let args = vec!["instruct-forge", "generate", "--batch-size", "0"];
        let cli = Cli::try_parse_from(args).expect("should parse");
        match cli.command {
            Commands::Generate(args) => {
                let err = resolve_generation_config(&args).unwrap_err();
                assert!(err.to_string().contains("batch_size"));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_api_key_precedence() {
        let vars = |key: &str| match key {
            "INSTRUCT_API_KEY" => Some("sk-primary".to_string()),
            "OPENAI_API_KEY" => Some("sk-other".to_string()),
            _ => None,
        };

        let cli = Cli::try_parse_from(["instruct-forge", "generate"]).expect("should parse");
        let Commands::Generate(args) = cli.command else {
            panic!("Expected Generate command");
        };
        assert!(args.api_key.is_none());
        let config = resolve_with_vars(&args, vars).expect("valid config");
        assert_eq!(config.api_key.as_deref(), Some("sk-primary"));

        let cli = Cli::try_parse_from(["instruct-forge", "generate", "--api-key", "sk-flag"])
            .expect("should parse");
        let Commands::Generate(args) = cli.command else {
            panic!("Expected Generate command");
        };
        let config = resolve_with_vars(&args, vars).expect("valid config");
        assert_eq!(config.api_key.as_deref(), Some("sk-flag"));
    }

    #[test]
    fn test_split_command_defaults() {
        let cli = Cli::try_parse_from(vec!["instruct-forge", "split"]).expect("should parse");

        match cli.command {
            Commands::Split(args) => {
                assert_eq!(args.input, DEFAULT_DATASET);
                assert_eq!(args.output_dir, "data");
                assert!((args.test_ratio - 0.1).abs() < f64::EPSILON);
                assert_eq!(args.seed, 42);
            }
            _ => panic!("Expected Split command"),
        }
    }

    #[test]
    fn test_analyze_command_defaults() {
        let cli = Cli::try_parse_from(vec!["instruct-forge", "analyze", "--min-count", "2"])
            .expect("should parse");

        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.input, DEFAULT_DATASET);
                assert_eq!(args.output, "instruction_diversity.json");
                assert_eq!(args.min_count, 2);
                assert_eq!(args.top, 10);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[tokio::test]
    async fn test_analyze_writes_report() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let input = dir.path().join("data.json");
        let records: Vec<_> = (0..6)
            .map(|i| {
                crate::dataset::InstructionRecord::new(format!("Write a poem number {}", i), "", "x")
            })
            .collect();
        crate::dataset::save_dataset(&input, &records).await.expect("save");

        let output = dir.path().join("reports").join("diversity.json");
        run_analyze_command(AnalyzeArgs {
            input: input.to_string_lossy().into_owned(),
            output: output.to_string_lossy().into_owned(),
            min_count: 5,
            top: 10,
        })
        .await
        .expect("analyze");

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).expect("read")).expect("json");
        assert_eq!(report["instruction_count"], 6);
        assert_eq!(report["sunburst"][2]["label"], "write_poem");
    }
}
