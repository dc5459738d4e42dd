//! cscan CLI - strip, extract and check comments in source files.
//!
//! This is the main entry point for the cscan CLI application.
//! It uses clap for argument parsing and dispatches to the command
//! handlers in [`commands`]. Data goes to stdout; logs go to stderr.

mod commands;
mod config;
mod error;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::traits::CommandDescription;
use commands::{
    CheckArgs, CheckCommand, ExtractArgs, ExtractCommand, SpansArgs, SpansCommand, StripArgs,
    StripCommand,
};
use config::Config;
use error::{CscanError, Result};

/// cscan - comment-aware source scanner
///
/// Splits source files into code, comment and literal spans, and uses that
/// split to strip or list comments without touching string contents.
#[derive(Parser, Debug)]
#[command(name = "cscan")]
#[command(author = "Cscan Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Comment-aware source scanner", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "CSCAN_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "CSCAN_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the cscan CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = StripCommand::description(),
        long_about = StripCommand::help()
    )]
    Strip(StripOptions),

    #[command(
        about = ExtractCommand::description(),
        long_about = ExtractCommand::help()
    )]
    Extract(ExtractOptions),

    #[command(
        about = SpansCommand::description(),
        long_about = SpansCommand::help()
    )]
    Spans(SpansOptions),

    #[command(
        about = CheckCommand::description(),
        long_about = CheckCommand::help()
    )]
    Check(CheckOptions),
}

#[derive(Parser, Debug)]
struct StripOptions {
    /// Input files or directories
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output file (single input) or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to do with emptied lines (preserve, collapse)
    #[arg(short, long)]
    policy: Option<String>,

    /// Language of the inputs, overriding file extensions
    #[arg(short, long)]
    language: Option<String>,

    /// Overwrite existing output files
    #[arg(short, long)]
    force: bool,

    /// Number of parallel jobs
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    jobs: Option<u32>,
}

#[derive(Parser, Debug)]
struct ExtractOptions {
    /// Input files or directories
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'F', long)]
    format: Option<String>,

    /// Language of the inputs, overriding file extensions
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Parser, Debug)]
struct SpansOptions {
    /// File to scan
    input: PathBuf,

    /// Language of the input, overriding its extension
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Parser, Debug)]
struct CheckOptions {
    /// Input files or directories
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Language of the inputs, overriding file extensions
    #[arg(short, long)]
    language: Option<String>,

    /// Fail when any unterminated construct is found
    #[arg(long)]
    deny_warnings: bool,
}

/// Main entry point for the cscan CLI.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color).context("failed to initialize logging")?;

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    let color = !cli.no_color && std::io::stdout().is_terminal();
    execute_command(cli.command, config, color)?;
    Ok(())
}

/// Initialize the logging system.
///
/// Logs are written to stderr so that stdout carries only command output.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CscanError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, config: Config, color: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Strip(args) => {
            let args = StripArgs {
                input: args.input,
                output: args.output,
                policy: args.policy,
                language: args.language,
                force: args.force,
                jobs: args.jobs,
            };
            commands::run::<StripCommand>(args, config, &mut out).map(drop)
        },
        Commands::Extract(args) => {
            let args = ExtractArgs {
                input: args.input,
                format: args.format,
                language: args.language,
            };
            commands::run::<ExtractCommand>(args, config, &mut out).map(drop)
        },
        Commands::Spans(args) => {
            let args = SpansArgs {
                input: args.input,
                language: args.language,
            };
            commands::run::<SpansCommand>(args, config, &mut out).map(drop)
        },
        Commands::Check(args) => {
            let args = CheckArgs {
                input: args.input,
                language: args.language,
                deny_warnings: args.deny_warnings,
                color,
            };
            commands::run::<CheckCommand>(args, config, &mut out).map(drop)
        },
    }
}
