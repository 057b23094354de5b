//! Convert command implementation.
//!
//! Reads a source file, runs the conversion pipeline in the requested (or
//! inferred) direction, writes the converted code and optionally reports
//! the metrics record.

use std::path::PathBuf;

use crossc_drv::{convert, parse_lang, ConversionResult, Direction};
use crossc_lex::Lang;
use tracing::info;

use crate::commands::OutputFormat;
use crate::config::Config;
use crate::error::{CrosstError, Result};

/// Arguments for the convert command.
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Input file to convert.
    pub input: PathBuf,
    /// Source language tag, when not inferred from the file extension.
    pub from: Option<String>,
    /// Target language tag.
    pub to: Option<String>,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
    /// Print the metrics record after converting.
    pub metrics: bool,
    /// Output format for diagnostics and metrics.
    pub format: String,
}

/// Execute the convert command.
pub fn run_convert(args: ConvertArgs, config: &Config) -> Result<()> {
    let direction = resolve_direction(&args, config)?;
    let source = std::fs::read_to_string(&args.input)?;
    info!(input = %args.input.display(), %direction, "converting");

    let result = convert(direction, &source);
    let format = OutputFormat::parse(&args.format);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            report_diagnostics(&result);
            match &args.output {
                Some(path) => std::fs::write(path, &result.converted_code)?,
                None => print!("{}", result.converted_code),
            }
            if args.metrics || config.convert.metrics {
                report_metrics(&result);
            }
        }
    }

    if result.success {
        Ok(())
    } else {
        Err(CrosstError::Conversion(format!(
            "{} error(s) reported",
            result.errors.len()
        )))
    }
}

fn resolve_direction(args: &ConvertArgs, config: &Config) -> Result<Direction> {
    let from = args.from.as_deref().map(parse_lang).transpose()?;
    let to = args.to.as_deref().map(parse_lang).transpose()?;

    let direction = match (from, to) {
        (Some(from), Some(to)) => Direction::between(from, to)?,
        (Some(Lang::Js), None) => Direction::JsToCs,
        (Some(Lang::Cs), None) => Direction::CsToJs,
        (None, Some(Lang::Cs)) => Direction::JsToCs,
        (None, Some(Lang::Js)) => Direction::CsToJs,
        (None, None) => match args.input.extension().and_then(|e| e.to_str()) {
            Some("js") => Direction::JsToCs,
            Some("cs") => Direction::CsToJs,
            _ => config.convert.default_direction.parse()?,
        },
    };
    Ok(direction)
}

fn report_diagnostics(result: &ConversionResult) {
    for diagnostic in result.errors.iter().chain(result.warnings.iter()) {
        eprintln!("{diagnostic}");
    }
}

fn report_metrics(result: &ConversionResult) {
    eprintln!("parsing time:       {:.3} ms", result.rdp_parsing_time_ms);
    eprintln!("conversion time:    {:.3} ms", result.conversion_time_ms);
    eprintln!("tokens processed:   {}", result.tokens_processed);
    eprintln!("ast nodes:          {}", result.ast_nodes);
    eprintln!("memory (est):       {:.1} KB", result.memory_usage_kb);
    eprintln!("error recoveries:   {}", result.error_recovery_count);
    eprintln!("syntax accuracy:    {:.1}%", result.syntax_accuracy);
    eprintln!("semantic preserve:  {:.1}%", result.semantic_preservation);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> ConvertArgs {
        ConvertArgs {
            input: PathBuf::from(input),
            from: None,
            to: None,
            output: None,
            metrics: false,
            format: "text".to_string(),
        }
    }

    #[test]
    fn test_direction_from_extension() {
        let config = Config::default();
        assert_eq!(
            resolve_direction(&args("a.js"), &config).unwrap(),
            Direction::JsToCs
        );
        assert_eq!(
            resolve_direction(&args("a.cs"), &config).unwrap(),
            Direction::CsToJs
        );
    }

    #[test]
    fn test_direction_from_flags_beats_extension() {
        let config = Config::default();
        let mut a = args("a.js");
        a.from = Some("cs".to_string());
        assert_eq!(resolve_direction(&a, &config).unwrap(), Direction::CsToJs);
    }

    #[test]
    fn test_direction_from_config_fallback() {
        let mut config = Config::default();
        config.convert.default_direction = "cs-to-js".to_string();
        assert_eq!(
            resolve_direction(&args("noext"), &config).unwrap(),
            Direction::CsToJs
        );
    }

    #[test]
    fn test_bad_language_tag_errors() {
        let config = Config::default();
        let mut a = args("a.js");
        a.from = Some("cobol".to_string());
        assert!(resolve_direction(&a, &config).is_err());
    }
}
