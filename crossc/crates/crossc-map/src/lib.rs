//! crossc-map - Cross-language AST mapping.
//!
//! The fourth phase of the pipeline: given the root of a source-language
//! AST, build a fresh target-language AST. Mapping is total over the source
//! node kinds: structure-preserving where the target has the same shape,
//! rewriting where the languages disagree (equality operators, loop forms,
//! declaration styles), and degrading to a comment-marker node plus an
//! `ast_conversion_error` diagnostic where the target cannot express the
//! construct at all.
//!
//! Two invariants hold for every mapping step:
//!
//! - the source line is preserved on the produced node, and
//! - operator precedence is never reconsidered: it is carried entirely by
//!   the tree shape the parser built.
//!
//! Lossy operator rewrites (`===` to `==` and the reverse raise) record
//! warnings; dropped constructs (using directives, modifiers, property
//! members) record warnings or informational notes.

pub mod cs_to_js;
pub mod js_to_cs;
pub mod ops;

pub use cs_to_js::map_cs_to_js;
pub use js_to_cs::map_js_to_cs;
