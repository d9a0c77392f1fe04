//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every field of every discussion
    Full,
    /// One line per discussion
    Brief,
    /// JSON output
    Json,
}

impl From<OutputFormat> for agora_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => agora_domain::OutputFormat::Full,
            OutputFormat::Brief => agora_domain::OutputFormat::Brief,
            OutputFormat::Json => agora_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for agora
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(author, version, about = "Group discussions, motions and votes")]
#[command(long_about = r#"
Agora replays discussion scenarios and runs the project's CI suites.

Configuration files are loaded from (in priority order):
1. AGORA_* environment variables (e.g. AGORA_OUTPUT__FORMAT=json)
2. --config <path>     Explicit config file
3. ./agora.toml        Project-level config
4. ~/.config/agora/config.toml   Global config

Example:
  agora ci
  agora report scenarios/budget.toml --output full
  agora config
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the configured test suites in order, stopping at the first failure
    Ci,

    /// Replay a scenario file and report on its discussions
    Report {
        /// Scenario TOML file
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Output format (overrides `[output] format`)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Show configuration sources, the merged configuration and any issues
    Config,
}
