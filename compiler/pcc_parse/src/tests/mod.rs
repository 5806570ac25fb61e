//! Parser tests.
//!
//! - `expressions`: precedence, literals, postfix chains and their errors
//! - `statements`: line dispatch, control flow, declarations, inline assembly
//! - `items`: global fields, structs, methods and whole-file recovery

mod expressions;

use pcc_ir::{Arena, ExprId, FileId, StmtId};
use pretty_assertions::assert_eq;

use crate::{parse_expression, parse_file, parse_statement, ParseError, ParseOutput};

fn file() -> FileId {
    FileId::new(0)
}

fn messages(errors: &[ParseError]) -> Vec<&str> {
    errors.iter().map(|e| e.message.as_str()).collect()
}

/// Parse a value that must be free of syntax errors.
fn expr(arena: &mut Arena, source: &str) -> ExprId {
    let (value, errors) = parse_expression(source, file(), arena);
    assert_eq!(messages(&errors), Vec::<&str>::new(), "errors in {source:?}");
    value.unwrap_or_else(|| panic!("no value in {source:?}"))
}

/// Render a value the way the code generator's comments show it.
fn render(source: &str) -> String {
    let mut arena = Arena::new();
    let value = expr(&mut arena, source);
    arena.render_expr(value)
}

/// Error messages produced while parsing a value.
fn expr_errors(source: &str) -> Vec<String> {
    let mut arena = Arena::new();
    let (_, errors) = parse_expression(source, file(), &mut arena);
    errors.into_iter().map(|e| e.message).collect()
}

/// Parse a line that must be free of syntax errors.
fn stmt(arena: &mut Arena, source: &str) -> StmtId {
    let (line, errors) = parse_statement(source, file(), arena);
    assert_eq!(messages(&errors), Vec::<&str>::new(), "errors in {source:?}");
    line.unwrap_or_else(|| panic!("no line in {source:?}"))
}

fn render_stmt(source: &str) -> String {
    let mut arena = Arena::new();
    let line = stmt(&mut arena, source);
    arena.render_stmt(line)
}

fn stmt_errors(source: &str) -> Vec<String> {
    let mut arena = Arena::new();
    let (_, errors) = parse_statement(source, file(), &mut arena);
    errors.into_iter().map(|e| e.message).collect()
}

fn program(arena: &mut Arena, source: &str) -> ParseOutput {
    parse_file(source, file(), arena)
}
