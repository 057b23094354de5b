//! Check command implementation.
//!
//! Parse-only syntax checking: runs the lexer and parser, reports
//! diagnostics and the parse metrics, and exits nonzero when the input has
//! errors. No code is generated.

use std::path::PathBuf;

use crossc_drv::{check, parse_lang};
use tracing::info;

use crate::commands::OutputFormat;
use crate::config::Config;
use crate::error::{CrosstError, Result};

/// Arguments for the check command.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Input file to check.
    pub input: PathBuf,
    /// Language tag, when not inferred from the file extension.
    pub lang: Option<String>,
    /// Output format for diagnostics and metrics.
    pub format: Option<String>,
}

/// Execute the check command.
pub fn run_check(args: CheckArgs, config: &Config) -> Result<()> {
    let lang = match &args.lang {
        Some(tag) => parse_lang(tag)?,
        None => match args.input.extension().and_then(|e| e.to_str()) {
            Some(ext) => parse_lang(ext)?,
            None => {
                return Err(CrosstError::Validation(format!(
                    "cannot infer language of '{}'; pass --lang",
                    args.input.display()
                )))
            }
        },
    };

    let source = std::fs::read_to_string(&args.input)?;
    info!(input = %args.input.display(), lang = lang.tag(), "checking syntax");

    let result = check(lang, &source);
    let format = OutputFormat::parse(args.format.as_deref().unwrap_or(&config.check.format));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            for diagnostic in result.errors.iter().chain(result.warnings.iter()) {
                eprintln!("{diagnostic}");
            }
            if result.success {
                println!(
                    "ok: {} tokens, {} nodes, {:.3} ms",
                    result.metrics.tokens_processed,
                    result.metrics.ast_nodes,
                    result.metrics.parsing_time_ms
                );
            }
        }
    }

    if result.success {
        Ok(())
    } else {
        Err(CrosstError::Conversion(format!(
            "{} syntax error(s)",
            result.errors.len()
        )))
    }
}
