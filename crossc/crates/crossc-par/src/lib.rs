//! crossc-par - Recursive-descent parsers and AST definitions.
//!
//! The second and third phases of the pipeline: a positional cursor over the
//! token vector ([`TokenCursor`]) and one hand-written predictive parser per
//! language. Both grammars are LL(1) in practice: every production picks its
//! alternative from the current token, with a single two-token lookahead used
//! to tell C# constructors (`Name (`) from methods that start with an
//! identifier-typed return.
//!
//! # Shape of a parser
//!
//! Each non-terminal is a method returning `Option<Node>`. `None` means the
//! production failed after recording a diagnostic; it never unwinds. The
//! enclosing list reacts by running panic-mode synchronization - skipping
//! tokens until a `;` (consumed) or a statement-first token (left in place)
//! or EOF - and then carries on with the next element, skipping the `None`.
//!
//! # Expression grammar
//!
//! Binary expressions use a binding-power loop per precedence table, with
//! assignment handled by right recursion above it. The resulting tree shape
//! is identical to the explicit cascade:
//!
//! ```text
//! assignment          (right-assoc)          js + cs
//! conditional ?:                             cs
//! null-coalescing ??                         cs
//! logical ||                                 js + cs
//! logical &&                                 js + cs
//! bitwise | ^ &                              cs
//! equality == != === !==                     js (=== !== js-only)
//! relational < > <= >= instanceof in         js + cs
//! shift << >>                                cs
//! additive + -                               js + cs
//! multiplicative * / %                       js + cs
//! unary, postfix, primary                    js + cs
//! ```
//!
//! # Metrics
//!
//! The parser owns the per-request [`Metrics`](crossc_util::Metrics) sink for
//! the duration of the parse: `tokens_processed` is fixed at entry,
//! `ast_nodes` grows by one for every node constructed, and every
//! synchronization bumps `error_recovery_count`. Wall time is measured
//! between parse entry and exit.

pub mod cs;
pub mod js;
pub mod stream;

mod edge_cases;
mod lit;

pub use cs::parse_cs;
pub use js::parse_js;
pub use stream::TokenCursor;
