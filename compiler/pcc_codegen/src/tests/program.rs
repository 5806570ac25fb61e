use pcc_ir::{AsmInclude, Item, ItemKind, Mark, Modifiers};
use pretty_assertions::assert_eq;

use super::{asm, assert_sequence, build, generate_source, lines, uid};
use crate::{generate, string_label};

#[test]
fn test_minimal_main() {
    let asm = asm("public void main() { int x = 5; }");
    assert_eq!(
        asm,
        ".text\n\
         ; public void main()\n\
         #global main\n\
         main:\n\
         \t; {\n\
         \t; int x\n\
         \tmovi r1, 5\n\
         \twr r1, r14, 1\n\
         \t; }\n\
         \t; return\n\
         \thalt\n"
    );
}

#[test]
fn test_data_section_and_global_init() {
    let source = r#"
        int counter = 3;
        public const int SIZE = 16;
        int table[4];
        public void main() {
            int* s = "hi";
            int* t = "hi";
            counter = SIZE;
        }
    "#;
    let asm = asm(source);
    let label = string_label("hi");
    assert_sequence(
        &asm,
        &[".data", "__GLOBALS:", "#allocate 5", &format!("{label}:"), "104 105 0", ".text"],
    );
    assert_eq!(asm.matches(&format!("{label}:")).count(), 1);
    assert_sequence(
        &asm,
        &[
            "main:",
            "; Global field initialization",
            "; counter = 3",
            "movi r1, 3",
            "movi r2, __GLOBALS",
            "wr r1, r2, 0",
            "; Finish global field initialization",
        ],
    );
    assert_sequence(&asm, &["; int* s", &format!("movi r1, {label}"), "wr r1, r14, 1"]);
    assert_sequence(
        &asm,
        &["; counter = SIZE", "movi r1, 16", "movi r2, __GLOBALS", "wr r1, r2, 0"],
    );
}

#[test]
fn test_strings_alone_still_emit_data() {
    let asm = asm(r#"public void main() { int* s = "A"; }"#);
    assert_sequence(&asm, &[".data", "__GLOBALS:", &format!("{}:", string_label("A")), "65 0"]);
    assert!(!asm.contains("#allocate"));
}

#[test]
fn test_private_method_and_call_sequence() {
    let source = "
        int add(int a, int b) { return a + b; }
        public void main() { int r = add(1, 2); }
    ";
    let generated = generate_source(source);
    assert_eq!(generated.messages, Vec::<String>::new());
    let add = uid(&generated.program, "add");
    let asm = generated.asm;
    assert!(!asm.contains(&format!("#global {add}")));
    assert_sequence(
        &asm,
        &[
            "; private int add(int a, int b)",
            &format!("{add}:"),
            "; %retptr = r15",
            "wr r15, r14, 1",
            "; {",
            "; return (a + b)",
            "rd r1, r14, 2",
            "rd r2, r14, 3",
            "add r1, r1, r2",
            "wr r1, r14, 0",
            "rd r1, r14, 1",
            "jmpr r1",
            "; }",
            "; public void main()",
        ],
    );
    assert_sequence(
        &asm,
        &[
            "; int r",
            "movi r1, 1",
            "movi r2, 2",
            "addi r14, r14, 2",
            "wr r1, r14, 2",
            "wr r2, r14, 3",
            &format!("call {add}"),
            "rd r1, r14, 0",
            "subi r14, r14, 2",
            "wr r1, r14, 1",
        ],
    );
}

#[test]
fn test_extern_methods_are_called_but_not_emitted() {
    let source = "
        public extern int read(int port);
        public void main() { int v = read(3); }
    ";
    let generated = generate_source(source);
    assert_eq!(generated.messages, Vec::<String>::new());
    let read = uid(&generated.program, "read");
    assert!(generated.asm.contains(&format!("call {read}")));
    assert!(!generated.asm.contains(&format!("{read}:")));
}

#[test]
fn test_function_pointer_parameter_header_and_indirect_call() {
    let source = "void apply(int (*f)(int), int x) { f(x); }";
    let asm = asm(source);
    assert_sequence(
        &asm,
        &[
            "; f(x)",
            "rd r1, r14, 2",
            "rd r2, r14, 1",
            "addi r14, r14, 3",
            "wr r1, r14, 2",
            "callr r2",
            "rd r1, r14, 0",
            "subi r14, r14, 3",
        ],
    );
    assert!(lines(&asm).contains(&"; private void apply(int (*f)(int), int x)"));
}

#[test]
fn test_asm_include_is_passed_through() {
    let mut program = build(&[("test.c", "public void main() { }")]);
    let file = program.items[0].file;
    program.push(Item {
        kind: ItemKind::AsmInclude(AsmInclude {
            path: "lib.asm".to_string(),
            mark: Mark::default(),
        }),
        file,
        modifiers: Modifiers::empty(),
    });
    let mut diagnostics = pcc_diagnostic::Diagnostics::new();
    let asm = generate(&program, &mut diagnostics);
    assert!(diagnostics.is_empty());
    assert_eq!(lines(&asm).last(), Some(&"#include lib.asm"));
}

#[test]
fn test_labels_count_from_one_per_compilation() {
    let source = "public void main() { int x = 1; if (x) x = 2; }";
    let first = asm(source);
    let second = asm(source);
    assert!(first.contains("__label1:"));
    assert_eq!(first, second);
}
