//! crossc-emit - Deterministic code generation.
//!
//! The final phase of the pipeline: serialize a target AST back to source
//! text. Both emitters guarantee stable child order, four-space indentation,
//! one statement per line, `(L op R)` parenthesization of binary expressions
//! and no trailing whitespace, so repeated emission of the same tree is
//! byte-identical.
//!
//! Cross-language standard-library surrogates are rewritten at this stage:
//! `console.log` becomes `Console.WriteLine` when emitting C#, and the
//! reverse when emitting JavaScript. The C# emitter also owns the
//! conditional `Main` wrapping of bare top-level statements.

pub mod cs;
pub mod js;
pub mod writer;

pub use cs::emit_cs;
pub use js::emit_js;
