//! CLI command definitions and handlers

mod explain;
mod init;
mod modifiers;
mod score;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::input::parse_timestamp;
use crate::reporters::OutputFormat;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// pkgscore - quality and trending scores for package directory entries
#[derive(Parser, Debug)]
#[command(name = "pkgscore")]
#[command(
    version,
    about = "Quality (0-100) and trending popularity scores for package directory entries",
    long_about = "pkgscore reads library records (repository statistics plus registry \
download counts) as JSON and derives two independent signals:\n\n  \
score       - modifier-based quality percentage with the list of modifiers that fired\n  \
popularity  - unbounded trending value from downloads, stars, maintenance and age\n\n\
Every record is scored on its own; nothing is fetched, stored or ranked.",
    after_help = "\
Examples:
  pkgscore -i libraries.json                      Both scores, JSON output
  pkgscore score -i libraries.json -f text        Quality scores as a table
  cat libraries.json | pkgscore trend             Trending popularity from stdin
  pkgscore explain -i lib.json --now 2024-05-01T00:00:00Z   Full breakdown at a fixed time
  pkgscore modifiers                              Show the modifier table"
)]
pub struct Cli {
    /// JSON file with an array of records or a single record (default: stdin, or "-")
    #[arg(long, short = 'i', global = true)]
    pub input: Option<PathBuf>,

    /// Reference time as RFC 3339 (default: current time)
    #[arg(long, global = true, env = "PKGSCORE_NOW")]
    pub now: Option<String>,

    /// Output format: json, text (default: json, or [defaults] format from config)
    #[arg(long, short = 'f', global = true, value_parser = ["json", "text"])]
    pub format: Option<String>,

    /// Single-line JSON output
    #[arg(long, global = true)]
    pub compact: bool,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    /// Clamp quality scores into 0-100
    #[arg(long, global = true)]
    pub clamp: bool,

    /// Config file (default: pkgscore.toml or .pkgscorerc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Compute both the quality score and the trending popularity (default)
    Evaluate,

    /// Compute the quality score and matching modifiers only
    Score,

    /// Compute the trending popularity only
    Trend,

    /// Show the full breakdown of both scores for each record
    Explain,

    /// List the quality-score modifier table and its bounds
    Modifiers,

    /// Write an example pkgscore.toml in the current directory
    Init,
}

/// Settings shared by every command after merging flags and config
#[derive(Debug, Clone)]
pub(crate) struct RunContext {
    pub input: Option<PathBuf>,
    pub now: DateTime<Utc>,
    pub config: ProjectConfig,
    pub format: OutputFormat,
    pub compact: bool,
    pub output: Option<PathBuf>,
}

impl RunContext {
    fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => load_config_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => load_project_config(Path::new(".")),
        };
        if cli.clamp {
            config.scoring.clamp_score = true;
        }

        let format = cli
            .format
            .as_deref()
            .or(config.defaults.format.as_deref())
            .map(str::parse::<OutputFormat>)
            .transpose()?
            .unwrap_or_default();
        let compact = cli.compact || config.defaults.compact.unwrap_or(false);

        let now = match &cli.now {
            Some(value) => parse_timestamp(value)?,
            None => Utc::now(),
        };
        debug!("Scoring at {} (format={}, compact={})", now, format, compact);

        Ok(Self {
            input: cli.input.clone(),
            now,
            config,
            format,
            compact,
            output: cli.output.clone(),
        })
    }

    /// Write rendered output to the output file, or stdout
    pub fn emit(&self, rendered: &str) -> Result<()> {
        match &self.output {
            Some(path) => std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display())),
            None => {
                println!("{}", rendered);
                Ok(())
            }
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let context = || RunContext::resolve(&cli);

    match cli.command.unwrap_or(Commands::Evaluate) {
        Commands::Evaluate => score::run(&context()?, score::Mode::Combined),
        Commands::Score => score::run(&context()?, score::Mode::Quality),
        Commands::Trend => score::run(&context()?, score::Mode::Trending),
        Commands::Explain => explain::run(&context()?),
        Commands::Modifiers => modifiers::run(&context()?),
        Commands::Init => init::run(Path::new(".")),
    }
}
