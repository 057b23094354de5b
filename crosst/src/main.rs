//! Crosst CLI - convert source files between JavaScript and C#.
//!
//! This is the main entry point for the crosst CLI application. It uses
//! clap for argument parsing and dispatches to the command handlers.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::check::{run_check, CheckArgs};
use commands::convert::{run_convert, ConvertArgs};
use config::Config;

/// Crosst - a bidirectional JavaScript/C# source converter.
///
/// Crosst lexes and parses the input with a hand-written recursive-descent
/// parser, maps the syntax tree into the target language and pretty-prints
/// the result, reporting parse metrics along the way.
#[derive(Parser, Debug)]
#[command(name = "crosst")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert source files between JavaScript and C#", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "CROSST_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CROSST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the crosst CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a source file to the other language
    ///
    /// The direction is taken from --from/--to when given, otherwise
    /// inferred from the input file extension, otherwise from the
    /// configuration default.
    Convert(ConvertCommand),

    /// Syntax-check a source file without converting it
    Check(CheckCommand),
}

/// Arguments for the convert subcommand.
#[derive(Parser, Debug)]
struct ConvertCommand {
    /// Input file
    input: PathBuf,

    /// Source language (js or cs)
    #[arg(long)]
    from: Option<String>,

    /// Target language (js or cs)
    #[arg(long)]
    to: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the parse/conversion metrics record
    #[arg(long)]
    metrics: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Input file
    input: PathBuf,

    /// Language of the input (js or cs); inferred from the extension when
    /// omitted
    #[arg(long)]
    lang: Option<String>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert(cmd) => run_convert(
            ConvertArgs {
                input: cmd.input,
                from: cmd.from,
                to: cmd.to,
                output: cmd.output,
                metrics: cmd.metrics,
                format: cmd.format,
            },
            &config,
        )?,
        Commands::Check(cmd) => run_check(
            CheckArgs {
                input: cmd.input,
                lang: cmd.lang,
                format: cmd.format,
            },
            &config,
        )?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
