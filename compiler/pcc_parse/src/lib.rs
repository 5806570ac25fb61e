//! Recursive descent parser for ProgCom C.
//!
//! Works directly on characters (there is no separate lexer): the grammar
//! functions consume text through a [`Cursor`], skipping whitespace and
//! comments after every token. All files of a compilation allocate into
//! one shared [`Arena`].
//!
//! Every production returns `None` for "no match" and records syntax
//! errors on the cursor as it goes, recovering by skipping to a stop token
//! so one file can report many independent errors.

mod cursor;
mod error;
mod grammar;
mod preprocess;
mod recovery;
mod snapshot;

pub use cursor::Cursor;
pub use error::ParseError;
pub use preprocess::{preprocess, Directive, DirectiveKind, Preprocessed};

use pcc_ir::{Arena, ExprId, ExprKind, FileId, Item, Mark, StmtId, StmtKind};

/// Parser state for one file.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: &'a mut Arena,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str, file: FileId, arena: &'a mut Arena) -> Self {
        Parser {
            cursor: Cursor::new(text, file),
            arena,
        }
    }

    /// Consume `token` and the whitespace after it.
    #[inline]
    fn eat(&mut self, token: &str) -> bool {
        if self.cursor.take_str(token) {
            self.cursor.skip_whitespace();
            true
        } else {
            false
        }
    }

    /// Consume `keyword` (at a word boundary) and the whitespace after it.
    #[inline]
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.cursor.take_keyword(keyword) {
            self.cursor.skip_whitespace();
            true
        } else {
            false
        }
    }

    #[inline]
    fn mark(&self) -> Mark {
        self.cursor.mark()
    }

    #[inline]
    fn alloc_expr(&mut self, kind: ExprKind, mark: Mark) -> ExprId {
        self.arena.alloc_expr(kind, mark)
    }

    #[inline]
    fn alloc_stmt(&mut self, kind: StmtKind, mark: Mark) -> StmtId {
        self.arena.alloc_stmt(kind, mark)
    }

    /// Placeholder for a value that failed to parse.
    fn error_expr(&mut self) -> ExprId {
        let mark = self.mark();
        self.alloc_expr(ExprKind::Error, mark)
    }

    fn into_errors(self) -> Vec<ParseError> {
        self.cursor.errors
    }
}

/// Declarations and syntax errors of one file.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub items: Vec<Item>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a whole (preprocessed) file into top-level declarations.
#[tracing::instrument(level = "debug", skip_all, fields(file = file.index()))]
pub fn parse_file(text: &str, file: FileId, arena: &mut Arena) -> ParseOutput {
    let mut parser = Parser::new(text, file, arena);
    parser.cursor.skip_whitespace();
    let items = parser.parse_items();
    if parser.cursor.has_remaining() {
        parser.cursor.error("Expected end of file", false, &[]);
    }
    tracing::debug!(items = items.len(), errors = parser.cursor.errors.len(), "parsed file");
    ParseOutput {
        items,
        errors: parser.into_errors(),
    }
}

/// Parse a single line (statement).
pub fn parse_statement(
    text: &str,
    file: FileId,
    arena: &mut Arena,
) -> (Option<StmtId>, Vec<ParseError>) {
    let mut parser = Parser::new(text, file, arena);
    parser.cursor.skip_whitespace();
    let line = parser.parse_line();
    (line, parser.into_errors())
}

/// Parse a single value expression.
pub fn parse_expression(
    text: &str,
    file: FileId,
    arena: &mut Arena,
) -> (Option<ExprId>, Vec<ParseError>) {
    let mut parser = Parser::new(text, file, arena);
    parser.cursor.skip_whitespace();
    let value = parser.parse_expr();
    (value, parser.into_errors())
}

#[cfg(test)]
mod tests;
