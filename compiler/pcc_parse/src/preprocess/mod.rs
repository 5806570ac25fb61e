//! Preprocessor directive scan.
//!
//! A directive is any line whose first non-blank character is `#`. The scan
//! runs before parsing and does two things:
//!
//! - returns the directives found, in source order, for the driver to act
//!   on (`#include` parses another file, `#asminclude` registers a
//!   pass-through declaration)
//! - blanks every directive line with spaces, byte for byte, so the parser
//!   never sees them and every later mark keeps its original offset

use pcc_ir::{FileId, Mark};
use tracing::trace;

use crate::ParseError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `#include name`: parse `name` into the session first.
    Include(String),
    /// `#asminclude name`: emit `#include name` in the text section. The
    /// argument is kept as written, delimiters included.
    AsmInclude(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub mark: Mark,
}

#[derive(Debug, Default)]
pub struct Preprocessed {
    /// Source with directive lines blanked out.
    pub text: String,
    pub directives: Vec<Directive>,
    pub errors: Vec<ParseError>,
}

/// Scan `source` for directives.
pub fn preprocess(source: &str, file: FileId) -> Preprocessed {
    let mut out = Preprocessed {
        text: String::with_capacity(source.len()),
        ..Preprocessed::default()
    };
    let mut line_start = 0usize;
    for line in source.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let trimmed = body.trim_start_matches([' ', '\t']);
        let mark = Mark::new(file, u32::try_from(line_start).unwrap_or(u32::MAX));
        if let Some(directive) = trimmed.strip_prefix('#') {
            scan_directive(directive, mark, &mut out);
            out.text.push_str(&" ".repeat(body.len()));
            out.text.push_str(&line[body.len()..]);
        } else {
            out.text.push_str(line);
        }
        line_start += line.len();
    }
    out
}

fn scan_directive(directive: &str, mark: Mark, out: &mut Preprocessed) {
    let mut words = directive.split_whitespace();
    let name = words.next().unwrap_or("");
    let argument = words.collect::<Vec<_>>().join(" ");
    trace!(directive = name, argument = %argument, "preprocessor directive");
    let kind = match name {
        "include" | "asminclude" if argument.is_empty() => {
            out.errors.push(ParseError::new(
                mark,
                format!("No filename argument supplied to #{name} directive"),
            ));
            return;
        }
        "include" => DirectiveKind::Include(strip_delimiters(&argument).to_string()),
        "asminclude" => DirectiveKind::AsmInclude(argument),
        _ => {
            out.errors.push(ParseError::new(
                mark,
                format!("Unknown preprocessor directive '{name}'"),
            ));
            return;
        }
    };
    out.directives.push(Directive { kind, mark });
}

/// `"name"` and `<name>` both mean `name`.
fn strip_delimiters(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|n| n.strip_suffix('"'))
        .or_else(|| name.strip_prefix('<').and_then(|n| n.strip_suffix('>')))
        .unwrap_or(name)
}
