//! Diagnostics for the ProgCom C compiler.
//!
//! Every problem found while parsing or generating code is recorded as a
//! [`Diagnostic`] in the session's [`Diagnostics`] list. Nothing is thrown:
//! the list is the only error channel, and code is only written when it is
//! empty at the end of a compilation.

mod diagnostic;
pub mod span_utils;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
