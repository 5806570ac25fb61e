//! Parse errors.

use pcc_diagnostic::{DiagnosticKind, Diagnostics};
use pcc_ir::{Mark, SourceMap};

/// A syntax error at a source position.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    pub mark: Mark,
    pub message: String,
}

impl ParseError {
    pub fn new(mark: Mark, message: impl Into<String>) -> Self {
        ParseError {
            mark,
            message: message.into(),
        }
    }

    /// Move this error into the session's diagnostic list.
    pub fn report(self, sources: &SourceMap, diagnostics: &mut Diagnostics) {
        diagnostics.report(sources, DiagnosticKind::Syntax, self.mark, self.message);
    }
}
