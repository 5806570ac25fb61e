use std::fmt;

use pcc_ir::{FileId, Mark, SourceMap};
use rustc_hash::FxHashMap;

use crate::span_utils::LineOffsetTable;

/// Which phase found the problem.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticKind {
    /// Grammar violation, recovered from by skipping to a stop token.
    Syntax,
    /// Bad input found during code generation.
    Semantic,
    /// A bug in the generator itself.
    Internal,
}

/// One reported problem, with its position already resolved.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: String,
    /// 1-based.
    pub line: u32,
    /// 0-based.
    pub column: u32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - line {}, column {}: {}",
            self.file, self.line, self.column, self.message
        )
    }
}

/// Ordered, append-only list of diagnostics for one compilation.
///
/// Line tables are built once per file on first use.
#[derive(Debug, Default)]
pub struct Diagnostics {
    list: Vec<Diagnostic>,
    tables: FxHashMap<FileId, LineOffsetTable>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic at `mark`.
    pub fn report(
        &mut self,
        sources: &SourceMap,
        kind: DiagnosticKind,
        mark: Mark,
        message: impl Into<String>,
    ) {
        let file = sources.get(mark.file);
        let table = self
            .tables
            .entry(mark.file)
            .or_insert_with(|| LineOffsetTable::build(file.text()));
        let (line, column) = table.offset_to_line_col(file.text(), mark.offset);
        self.list.push(Diagnostic {
            kind,
            file: file.name().to_string(),
            line,
            column,
            message: message.into(),
        });
    }

    /// Record a diagnostic that has no source position, such as an
    /// unreadable input file or a bad target name.
    pub fn report_detached(
        &mut self,
        kind: DiagnosticKind,
        file: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.list.push(Diagnostic {
            kind,
            file: file.into(),
            line: 1,
            column: 0,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.list.iter()
    }

    /// Rendered messages, in report order.
    pub fn render(&self) -> Vec<String> {
        self.list.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
