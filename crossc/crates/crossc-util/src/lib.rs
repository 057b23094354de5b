//! crossc-util - Core utilities shared by every converter phase.
//!
//! This crate holds the foundation types the rest of the workspace builds
//! on: source location tracking ([`Span`]), the diagnostic infrastructure
//! ([`Diagnostic`], [`Handler`]) and the per-request metrics sink
//! ([`Metrics`]).
//!
//! Everything here is request-local. A conversion owns its handler and its
//! metrics sink for the duration of one pipeline run and releases them when
//! the result record has been assembled; nothing is cached across requests.

pub mod diagnostic;
pub mod metrics;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticKind, Handler, Severity};
pub use metrics::Metrics;
pub use span::Span;

// Re-export the hash types used for the keyword tables.
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
