//! crossc-drv - The conversion pipeline driver.
//!
//! Composes the phases leaf-first: lexer, token cursor, parser, mapper,
//! emitter, with the metrics sink written along the way and read exactly
//! once when the result record is assembled.
//!
//! Every entry point is a total function of the input text: diagnostics are
//! collected, never thrown, and the result always carries a `success` flag
//! and a (possibly empty or partial) `converted_code`. A parse is
//! synchronous and owns all of its state, so concurrent requests need no
//! synchronization.

mod result;

use std::fmt;
use std::mem;
use std::str::FromStr;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crossc_emit::{emit_cs, emit_js};
use crossc_lex::{tokenize_cs, tokenize_js, Lang, Token};
use crossc_map::{map_cs_to_js, map_js_to_cs};
use crossc_par::{parse_cs, parse_js};
use crossc_util::{Handler, Metrics};

pub use result::{ConversionResult, ParseResult};

/// Errors at the driver boundary: bad direction or language names coming
/// from CLI flags or file extensions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DriverError {
    /// The direction string did not name a supported conversion.
    #[error("unknown conversion direction '{0}', expected 'js-to-cs' or 'cs-to-js'")]
    UnknownDirection(String),

    /// The language tag did not name a supported language.
    #[error("unknown language '{0}', expected 'js' or 'cs'")]
    UnknownLanguage(String),
}

/// A conversion direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// JavaScript source to C# output.
    JsToCs,
    /// C# source to JavaScript output.
    CsToJs,
}

impl Direction {
    /// Source language of this direction.
    pub fn source_lang(&self) -> Lang {
        match self {
            Direction::JsToCs => Lang::Js,
            Direction::CsToJs => Lang::Cs,
        }
    }

    /// Target language of this direction.
    pub fn target_lang(&self) -> Lang {
        match self {
            Direction::JsToCs => Lang::Cs,
            Direction::CsToJs => Lang::Js,
        }
    }

    /// Direction converting from `source` into `target`.
    pub fn between(source: Lang, target: Lang) -> Result<Self, DriverError> {
        match (source, target) {
            (Lang::Js, Lang::Cs) => Ok(Direction::JsToCs),
            (Lang::Cs, Lang::Js) => Ok(Direction::CsToJs),
            (from, to) => Err(DriverError::UnknownDirection(format!(
                "{}-to-{}",
                from.tag(),
                to.tag()
            ))),
        }
    }
}

impl FromStr for Direction {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js-to-cs" | "js2cs" => Ok(Direction::JsToCs),
            "cs-to-js" | "cs2js" => Ok(Direction::CsToJs),
            other => Err(DriverError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::JsToCs => write!(f, "js-to-cs"),
            Direction::CsToJs => write!(f, "cs-to-js"),
        }
    }
}

/// Parse a language tag (`js`, `javascript`, `cs`, `csharp`).
pub fn parse_lang(tag: &str) -> Result<Lang, DriverError> {
    match tag.to_ascii_lowercase().as_str() {
        "js" | "javascript" => Ok(Lang::Js),
        "cs" | "csharp" | "c#" => Ok(Lang::Cs),
        other => Err(DriverError::UnknownLanguage(other.to_string())),
    }
}

/// Convert source text in the given direction.
pub fn convert(direction: Direction, input: &str) -> ConversionResult {
    match direction {
        Direction::JsToCs => convert_js_to_cs(input),
        Direction::CsToJs => convert_cs_to_js(input),
    }
}

/// Convert JavaScript source to C#.
pub fn convert_js_to_cs(input: &str) -> ConversionResult {
    let handler = Handler::new();
    let mut metrics = Metrics::new();

    let tokens = tokenize_js(input);
    let program = parse_js(tokens, &handler, &mut metrics);
    debug!(
        tokens = metrics.tokens_processed,
        nodes = metrics.ast_nodes,
        ms = metrics.parsing_time_ms,
        "parsed javascript"
    );

    let started = Instant::now();
    let unit = map_js_to_cs(program, &handler);
    let code = emit_cs(&unit);
    metrics.conversion_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(ms = metrics.conversion_time_ms, "mapped and emitted c#");

    finish(code, &handler, metrics, input)
}

/// Convert C# source to JavaScript.
pub fn convert_cs_to_js(input: &str) -> ConversionResult {
    let handler = Handler::new();
    let mut metrics = Metrics::new();

    let tokens = tokenize_cs(input);
    let unit = parse_cs(tokens, &handler, &mut metrics);
    debug!(
        tokens = metrics.tokens_processed,
        nodes = metrics.ast_nodes,
        ms = metrics.parsing_time_ms,
        "parsed c#"
    );

    let started = Instant::now();
    let program = map_cs_to_js(unit, &handler);
    let code = emit_js(&program);
    metrics.conversion_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(ms = metrics.conversion_time_ms, "mapped and emitted javascript");

    finish(code, &handler, metrics, input)
}

/// Syntax-check source text in the given language. No AST is exposed.
pub fn check(lang: Lang, input: &str) -> ParseResult {
    let handler = Handler::new();
    let mut metrics = Metrics::new();

    match lang {
        Lang::Js => {
            parse_js(tokenize_js(input), &handler, &mut metrics);
        }
        Lang::Cs => {
            parse_cs(tokenize_cs(input), &handler, &mut metrics);
        }
    }

    metrics.memory_usage_kb = estimate_memory_kb(input.len(), &metrics);
    metrics.finish_scores(handler.error_count(), handler.warning_count());
    ParseResult::assemble(&handler, metrics)
}

/// Syntax-check JavaScript source.
pub fn check_js(input: &str) -> ParseResult {
    check(Lang::Js, input)
}

/// Syntax-check C# source.
pub fn check_cs(input: &str) -> ParseResult {
    check(Lang::Cs, input)
}

fn finish(code: String, handler: &Handler, mut metrics: Metrics, input: &str) -> ConversionResult {
    metrics.memory_usage_kb = estimate_memory_kb(input.len(), &metrics);
    metrics.finish_scores(handler.error_count(), handler.warning_count());
    ConversionResult::assemble(code, handler, metrics)
}

/// Coarse working-set estimate: the input buffer, the token vector and the
/// node tree at an average node footprint. An accounting figure, not a
/// measurement.
fn estimate_memory_kb(input_len: usize, metrics: &Metrics) -> f64 {
    const AVG_NODE_BYTES: usize = 96;
    let bytes = input_len
        + metrics.tokens_processed * mem::size_of::<Token>()
        + metrics.ast_nodes * AVG_NODE_BYTES;
    bytes as f64 / 1024.0
}
