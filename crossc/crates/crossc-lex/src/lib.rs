//! crossc-lex - Lexical analysis for both source languages.
//!
//! The first phase of the conversion pipeline: it turns a source string into
//! a finite token stream ending with EOF. One direct-coded scanning engine
//! serves both languages; a per-language profile supplies the keyword table,
//! the longest-match operator tables and the lexical quirks (JavaScript's
//! `$` identifiers and template strings, C#'s verbatim strings and numeric
//! type suffixes).
//!
//! Properties the rest of the pipeline relies on:
//!
//! - **Totality.** Tokenization terminates for every input and the last
//!   token is always EOF. Unrecognized bytes become `Unknown` tokens; the
//!   lexer itself never reports an error.
//! - **Position fidelity.** Every token carries its 1-based line and column
//!   and the byte offsets of its lexeme within the line.
//! - **Lexeme fidelity.** String tokens keep their quotes and raw escapes;
//!   C# numeric tokens keep their `f`/`d`/`m`/`l` suffix. Emission
//!   reproduces literals from the lexeme text.

pub mod cursor;
pub mod lexer;
pub mod token;

mod edge_cases;

pub use lexer::{tokenize, tokenize_cs, tokenize_js, Lexer};
pub use token::{Lang, Token, TokenKind};
