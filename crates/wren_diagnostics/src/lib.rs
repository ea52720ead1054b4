//! Wren Diagnostics — the shared diagnostic record.
//!
//! Every pipeline stage (parser, resolver, type checker) appends
//! `Diagnostic` values to one ordered list. Diagnostics are values,
//! never exceptions: a stage reports and keeps going.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, Severity};
pub use span::Span;
