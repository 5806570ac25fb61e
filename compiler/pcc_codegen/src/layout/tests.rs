use pcc_diagnostic::Diagnostics;
use pcc_ir::{FunctionPointer, Mark, Program};
use pcc_parse::parse_file;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn program(source: &str) -> Program {
    let mut program = Program::new();
    let file = program.sources.add("test.c", source);
    let output = parse_file(source, file, &mut program.arena);
    assert!(!output.has_errors(), "syntax errors: {:?}", output.errors);
    for item in output.items {
        program.push(item);
    }
    program
}

/// Lay out `source` and return struct sizes by name plus the messages.
fn sizes(source: &str) -> (Vec<(String, u32)>, Vec<String>) {
    let program = program(source);
    let mut diagnostics = Diagnostics::new();
    let layouts = {
        let mut reporter = Reporter::new(&program.sources, &mut diagnostics);
        Layouts::compute(&program, &mut reporter)
    };
    let sizes = program
        .structs()
        .map(|(id, def)| {
            let size = layouts.get(id).map_or(u32::MAX, Layout::size);
            (def.name.clone(), size)
        })
        .collect();
    let messages = diagnostics.iter().map(|d| d.message.clone()).collect();
    (sizes, messages)
}

fn no_structs(_: &StructRef) -> u32 {
    0
}

#[test]
fn test_struct_size_is_sum_of_fields() {
    let (sizes, messages) = sizes("struct Point { int x; int y; } struct Line { Point a; Point b; int* tag; }");
    assert_eq!(messages, Vec::<String>::new());
    assert_eq!(
        sizes,
        vec![("Point".to_string(), 2), ("Line".to_string(), 5)]
    );
}

#[test]
fn test_size_does_not_depend_on_declaration_order() {
    let (sizes, _) = sizes("struct Outer { Inner a; int b; } struct Inner { int x; int y; int z; }");
    assert_eq!(sizes, vec![("Outer".to_string(), 4), ("Inner".to_string(), 3)]);
}

#[test]
fn test_field_offsets_follow_declaration_order() {
    let layout = Layout::build(
        [
            ("a".to_string(), Type::Int),
            ("b".to_string(), Type::Array(Box::new(Type::Int), 3)),
            ("c".to_string(), Type::Int.pointer_to()),
        ],
        |ty| type_size(ty, &mut no_structs),
    );
    let offsets: Vec<(&str, u32)> = layout
        .slots()
        .iter()
        .map(|s| (s.name.as_str(), s.offset))
        .collect();
    assert_eq!(offsets, vec![("a", 0), ("b", 1), ("c", 4)]);
    assert_eq!(layout.size(), 5);
    assert_eq!(layout.slot("c").map(|s| s.offset), Some(4));
    assert_eq!(layout.slot("missing"), None);
}

#[test]
fn test_self_pointer_has_finite_size() {
    let (sizes, messages) = sizes("struct Node { int value; Node* next; }");
    assert_eq!(messages, Vec::<String>::new());
    assert_eq!(sizes, vec![("Node".to_string(), 2)]);
}

#[test]
fn test_self_containing_struct_is_reported_once() {
    let (_, messages) = sizes("struct A { B b; } struct B { A a; A again; }");
    assert_eq!(
        messages,
        vec!["Struct 'A' contains itself and has no finite size".to_string()]
    );
}

#[test]
fn test_duplicate_field_reported_once_per_name() {
    let (_, messages) = sizes("struct S { int x; int x; int x; int y; }");
    assert_eq!(
        messages,
        vec!["Struct definition contains duplicate field name x".to_string()]
    );
}

#[test]
fn test_unknown_field_type() {
    let (sizes, messages) = sizes("struct S { int x; Missing m; }");
    assert_eq!(messages, vec!["Unknown type 'Missing'".to_string()]);
    assert_eq!(sizes, vec![("S".to_string(), 1)]);
}

#[test]
fn test_scalars_are_one_word() {
    let fp = Type::FunctionPointer(Box::new(FunctionPointer {
        ret: Type::Void,
        name: "f".to_string(),
        params: vec![Type::Int, Type::Int],
        mark: Mark::default(),
    }));
    for ty in [Type::Int, Type::void_pointer(), fp] {
        assert_eq!(type_size(&ty, &mut no_structs), 1, "{ty}");
    }
    assert_eq!(type_size(&Type::Void, &mut no_structs), 0);
}

proptest! {
    #[test]
    fn array_size_is_element_size_times_length(elem in 0u32..64, len in 0u32..1024) {
        let element = Type::Struct(StructRef { name: "E".to_string(), mark: Mark::default() });
        let array = Type::Array(Box::new(element), len);
        prop_assert_eq!(type_size(&array, &mut |_| elem), elem * len);
    }
}
