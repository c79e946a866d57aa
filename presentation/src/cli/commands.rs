//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Every argument, score and critique, round by round
    #[default]
    Full,
    /// Score table and verdict only
    Summary,
    /// The full session as JSON
    Json,
}

/// CLI arguments for debate-arena
#[derive(Parser, Debug)]
#[command(name = "debate-arena")]
#[command(author, version, about = "Two LLM debaters argue a topic while a multi-layer judge scores every turn")]
#[command(long_about = r#"
Debate Arena runs a structured multi-round debate between two LLM debaters.

Each round:
1. Round 1: both debaters write their opening arguments in parallel
2. Rounds 2..N: debater A rebuts B's latest argument, then B rebuts A's
3. Every argument is scored by the judge across four layers (logic,
   persuasion, factual accuracy, belief impact) evaluated concurrently
4. With --self-improve, each debater revises its argument using the
   feedback and the revision is scored again

Configuration files are loaded from (in priority order):
1. DEBATE_* environment variables (e.g. DEBATE_PROVIDERS__GEMINI__API_KEY)
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/debate-arena/config.toml   Global config

Example:
  debate-arena "Should social media platforms be liable for misinformation?"
  debate-arena -r 2 --self-improve --transcript out/debate.json "Ban cars from city centres?"
  debate-arena --judge-model sonar-pro --single-prompt -o summary "Is remote work here to stay?"
"#)]
pub struct Cli {
    /// The debate topic (falls back to `[debate] topic` in the config)
    pub topic: Option<String>,

    /// Number of rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Revise every argument with its feedback and score the revision
    #[arg(long)]
    pub self_improve: bool,

    /// Evaluate with one combined judge prompt instead of one call per layer
    #[arg(long)]
    pub single_prompt: bool,

    /// Skip the final winner declaration
    #[arg(long)]
    pub no_verdict: bool,

    /// Target words per argument
    #[arg(long, value_name = "WORDS")]
    pub word_limit: Option<usize>,

    /// Model for debater A
    #[arg(long, value_name = "MODEL")]
    pub debater_a_model: Option<String>,

    /// Model for debater B
    #[arg(long, value_name = "MODEL")]
    pub debater_b_model: Option<String>,

    /// Model for the judge
    #[arg(long, value_name = "MODEL")]
    pub judge_model: Option<String>,

    /// Timeout in seconds for every generation call
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Write the finished debate as a JSON transcript
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Append one JSON line per debate event to this file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Also write tracing output to a daily log file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Tracing filter directive for the `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
