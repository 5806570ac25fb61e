//! The compilation session: every file read, every declaration parsed,
//! and every diagnostic reported so far.

use pcc_diagnostic::{DiagnosticKind, Diagnostics};
use pcc_ir::{AsmInclude, Item, ItemKind, Mark, Modifiers, Program};
use pcc_parse::{parse_file, preprocess, DirectiveKind, ParseError};
use rustc_hash::FxHashSet;

/// Parses files into one [`Program`], following `#include` directives.
pub struct Session<R> {
    program: Program,
    diagnostics: Diagnostics,
    /// Names already parsed (or attempted), so each file is read once and
    /// include cycles end quietly.
    parsed: FxHashSet<String>,
    reader: R,
}

impl<R: FnMut(&str) -> Option<String>> Session<R> {
    pub fn new(reader: R) -> Self {
        Session {
            program: Program::new(),
            diagnostics: Diagnostics::new(),
            parsed: FxHashSet::default(),
            reader,
        }
    }

    /// Parse the initial file.
    pub fn parse_file(&mut self, name: &str) {
        self.parse(name, None);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub fn finish(self) -> (Program, Diagnostics) {
        (self.program, self.diagnostics)
    }

    /// Read, preprocess and parse `name`. Included files are parsed when
    /// their directive is reached, so their declarations come before the
    /// including file's own.
    #[tracing::instrument(level = "debug", skip(self, included_at))]
    fn parse(&mut self, name: &str, included_at: Option<Mark>) {
        if !self.parsed.insert(name.to_string()) {
            tracing::trace!("already parsed");
            return;
        }
        let Some(source) = (self.reader)(name) else {
            match included_at {
                Some(mark) => self.diagnostics.report(
                    &self.program.sources,
                    DiagnosticKind::Syntax,
                    mark,
                    format!("Could not read included file '{name}'"),
                ),
                None => self.diagnostics.report_detached(
                    DiagnosticKind::Syntax,
                    name,
                    format!("Could not read file '{name}'"),
                ),
            }
            return;
        };

        let file = self.program.sources.add(name, source);
        let preprocessed = preprocess(self.program.sources.get(file).text(), file);
        self.report(preprocessed.errors);
        for directive in preprocessed.directives {
            match directive.kind {
                DirectiveKind::Include(path) => self.parse(&path, Some(directive.mark)),
                DirectiveKind::AsmInclude(path) => {
                    self.program.push(Item {
                        kind: ItemKind::AsmInclude(AsmInclude {
                            path,
                            mark: directive.mark,
                        }),
                        file,
                        modifiers: Modifiers::empty(),
                    });
                }
            }
        }

        let output = parse_file(&preprocessed.text, file, &mut self.program.arena);
        self.report(output.errors);
        for item in output.items {
            self.program.push(item);
        }
    }

    fn report(&mut self, errors: Vec<ParseError>) {
        for error in errors {
            error.report(&self.program.sources, &mut self.diagnostics);
        }
    }
}
