//! Code generation tests.
//!
//! - `program`: sections, method headers, globals and string literals
//! - `statements`: control flow lowering and loop scopes
//! - `values`: operators, places, casts and calls
//! - `diagnostics`: semantic errors and recovery

mod program;

use pcc_diagnostic::Diagnostics;
use pcc_ir::{ItemKind, Program};
use pcc_parse::parse_file;
use pretty_assertions::assert_eq;

use crate::{generate, method_uid};

/// Parse each `(name, text)` pair as its own file, in order.
fn build(files: &[(&str, &str)]) -> Program {
    let mut program = Program::new();
    for &(name, text) in files {
        let file = program.sources.add(name, text);
        let output = parse_file(text, file, &mut program.arena);
        assert!(!output.has_errors(), "syntax errors in {name}: {:?}", output.errors);
        for item in output.items {
            program.push(item);
        }
    }
    program
}

struct Generated {
    asm: String,
    messages: Vec<String>,
    program: Program,
}

fn generate_files(files: &[(&str, &str)]) -> Generated {
    let program = build(files);
    let mut diagnostics = Diagnostics::new();
    let asm = generate(&program, &mut diagnostics);
    let messages = diagnostics.iter().map(|d| d.message.clone()).collect();
    Generated {
        asm,
        messages,
        program,
    }
}

fn generate_source(source: &str) -> Generated {
    generate_files(&[("test.c", source)])
}

/// Generate code that must not produce diagnostics.
#[track_caller]
fn asm(source: &str) -> String {
    let generated = generate_source(source);
    assert_eq!(generated.messages, Vec::<String>::new(), "for:\n{source}");
    generated.asm
}

/// Messages reported for `source`.
fn messages(source: &str) -> Vec<String> {
    generate_source(source).messages
}

/// Output lines without indentation.
fn lines(asm: &str) -> Vec<&str> {
    asm.lines().map(str::trim).collect()
}

/// Assert that `expected` appears as consecutive lines of `asm`.
#[track_caller]
fn assert_sequence(asm: &str, expected: &[&str]) {
    let found = lines(asm).windows(expected.len()).any(|w| w == expected);
    assert!(found, "sequence {expected:#?} not found in:\n{asm}");
}

/// The label of the first method called `name`.
fn uid(program: &Program, name: &str) -> String {
    program
        .items
        .iter()
        .find_map(|item| match &item.kind {
            ItemKind::Method(m) if m.name == name => Some(method_uid(m)),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no method {name}"))
}
