use std::convert::Infallible;

use pcc_diagnostic::DiagnosticKind;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use crate::{compile, CompileConfig, CompileOutput, ConfigError, Flags, Target};

/// An in-memory file system: the files that can be read and the files
/// written by the compiler.
struct MemoryFs {
    files: FxHashMap<String, String>,
    written: FxHashMap<String, String>,
}

impl MemoryFs {
    fn new(files: &[(&str, &str)]) -> Self {
        MemoryFs {
            files: files
                .iter()
                .map(|&(name, text)| (name.to_string(), text.to_string()))
                .collect(),
            written: FxHashMap::default(),
        }
    }

    fn compile(&mut self, initial: &str, flags: &Flags) -> CompileOutput {
        let files = &self.files;
        let written = &mut self.written;
        let result = compile(
            initial,
            flags,
            |path| files.get(path).cloned(),
            |path, text| {
                written.insert(path.to_string(), text.to_string());
                Ok::<(), Infallible>(())
            },
        );
        match result {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }
}

fn flags(pairs: &[(&str, Option<&str>)]) -> Flags {
    pairs
        .iter()
        .map(|&(name, value)| (name, value.map(str::to_string)))
        .collect()
}

const MAIN: &str = "public void main() { }";

#[test]
fn test_success_writes_next_to_the_initial_file() {
    let mut fs = MemoryFs::new(&[("main.c", MAIN)]);
    let output = fs.compile("main.c", &Flags::new());
    assert!(output.success());
    assert_eq!(output.rendered(), Vec::<String>::new());
    assert_eq!(output.written.as_deref(), Some("main.c.txt"));
    let asm = &fs.written["main.c.txt"];
    assert!(asm.contains("#global main"));
    assert!(asm.contains("halt"));
}

#[test]
fn test_out_flag_overrides_the_path() {
    let mut fs = MemoryFs::new(&[("main.c", MAIN)]);
    let output = fs.compile("main.c", &flags(&[("out", Some("build/a.asm"))]));
    assert_eq!(output.written.as_deref(), Some("build/a.asm"));
    assert_eq!(fs.written.keys().collect::<Vec<_>>(), vec!["build/a.asm"]);
}

#[test]
fn test_target_flag() {
    let mut fs = MemoryFs::new(&[("main.c", MAIN)]);
    assert!(fs.compile("main.c", &flags(&[("target", Some("ProgCom"))])).success());

    let mut fs = MemoryFs::new(&[("main.c", MAIN)]);
    let output = fs.compile("main.c", &flags(&[("target", Some("x86"))]));
    assert_eq!(
        output.rendered(),
        vec!["main.c - line 1, column 0: Unknown target assembly 'x86'".to_string()]
    );
    assert!(fs.written.is_empty());
}

#[test]
fn test_config_from_flags() {
    let config = CompileConfig::from_flags(&flags(&[("debug", None), ("out", Some("x.s"))]));
    assert_eq!(
        config,
        Ok(CompileConfig {
            target: Target::ProgCom,
            out: Some("x.s".to_string()),
        })
    );
    assert_eq!(
        CompileConfig::from_flags(&flags(&[("target", Some("arm"))])),
        Err(ConfigError::UnknownTarget("arm".to_string()))
    );
    assert_eq!(CompileConfig::default().output_path("p.c"), "p.c.txt");
}

#[test]
fn test_flags_keep_order_and_last_value() {
    let flags = flags(&[("out", Some("a")), ("debug", None), ("out", Some("b"))]);
    assert_eq!(
        flags.iter().collect::<Vec<_>>(),
        vec![("out", Some("b")), ("debug", None)]
    );
    assert!(flags.contains("debug"));
    assert_eq!(flags.value("debug"), None);
}

#[test]
fn test_include_makes_public_declarations_visible() {
    let mut fs = MemoryFs::new(&[
        ("main.c", "#include \"point.h\"\npublic void main() { Point p; p.y = 1; }"),
        ("point.h", "public struct Point { int x; int y; }"),
    ]);
    let output = fs.compile("main.c", &Flags::new());
    assert_eq!(output.rendered(), Vec::<String>::new());
    assert!(fs.written["main.c.txt"].contains("wr r1, r2, 1"));
}

#[test]
fn test_private_declarations_stay_in_their_file() {
    let mut fs = MemoryFs::new(&[
        ("main.c", "#include point.h\npublic void main() { Point p; }"),
        ("point.h", "struct Point { int x; int y; }"),
    ]);
    let output = fs.compile("main.c", &Flags::new());
    assert_eq!(
        output.rendered(),
        vec!["main.c - line 2, column 21: Unknown type 'Point'".to_string()]
    );
    assert!(fs.written.is_empty());
}

#[test]
fn test_each_file_is_parsed_once() {
    let mut fs = MemoryFs::new(&[
        ("a.c", "#include b.c\n#include b.c\npublic void main() { f(); }"),
        ("b.c", "#include a.c\npublic void f() { }"),
    ]);
    let output = fs.compile("a.c", &Flags::new());
    assert_eq!(output.rendered(), Vec::<String>::new());
    let asm = &fs.written["a.c.txt"];
    assert_eq!(asm.matches("#global main").count(), 1);
    assert_eq!(asm.lines().filter(|l| l.starts_with("; public void f()")).count(), 1);
}

#[test]
fn test_asm_include_passes_through() {
    let mut fs = MemoryFs::new(&[("main.c", "#asminclude <lib.asm>\npublic void main() { }")]);
    let output = fs.compile("main.c", &Flags::new());
    assert!(output.success());
    let asm = &fs.written["main.c.txt"];
    let text = asm.find(".text").unwrap_or(usize::MAX);
    let include = asm.find("#include <lib.asm>").unwrap_or(0);
    assert!(text < include, "{asm}");
    assert!(!asm.contains("#include lib.asm"), "{asm}");
}

#[test]
fn test_unreadable_files() {
    let mut fs = MemoryFs::new(&[("main.c", "#include missing.c\npublic void main() { }")]);
    assert_eq!(
        fs.compile("main.c", &Flags::new()).rendered(),
        vec!["main.c - line 1, column 0: Could not read included file 'missing.c'".to_string()]
    );

    let mut fs = MemoryFs::new(&[]);
    assert_eq!(
        fs.compile("nope.c", &Flags::new()).rendered(),
        vec!["nope.c - line 1, column 0: Could not read file 'nope.c'".to_string()]
    );
    assert!(fs.written.is_empty());
}

#[test]
fn test_syntax_errors_stop_before_generation() {
    let mut fs = MemoryFs::new(&[("main.c", "#bogus\npublic void main() { x = 1; }")]);
    let output = fs.compile("main.c", &Flags::new());
    assert_eq!(
        output.rendered(),
        vec!["main.c - line 1, column 0: Unknown preprocessor directive 'bogus'".to_string()]
    );
    assert!(output
        .diagnostics
        .iter()
        .all(|d| d.kind == DiagnosticKind::Syntax));
    assert!(fs.written.is_empty());
}

#[test]
fn test_writer_errors_propagate() {
    let files: FxHashMap<String, String> =
        std::iter::once(("main.c".to_string(), MAIN.to_string())).collect();
    let result = compile(
        "main.c",
        &Flags::new(),
        |path| files.get(path).cloned(),
        |_, _| Err("disk full"),
    );
    assert_eq!(result.map(|o| o.success()), Err("disk full"));
}
