use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_format() {
    let diag = Diagnostic {
        kind: DiagnosticKind::Syntax,
        file: "main.c".to_string(),
        line: 3,
        column: 7,
        message: "Expected semicolon".to_string(),
    };
    assert_eq!(
        diag.to_string(),
        "main.c - line 3, column 7: Expected semicolon"
    );
}

#[test]
fn test_report_resolves_positions_per_file() {
    let mut sources = SourceMap::new();
    let a = sources.add("a.c", "int x;\nint y");
    let b = sources.add("b.c", "\n\n  z");
    let mut diags = Diagnostics::new();
    assert!(diags.is_empty());

    diags.report(&sources, DiagnosticKind::Syntax, Mark::new(a, 12), "Expected semicolon");
    diags.report(&sources, DiagnosticKind::Semantic, Mark::new(b, 4), "Unknown variable name z");

    assert_eq!(diags.len(), 2);
    assert_eq!(
        diags.render(),
        vec![
            "a.c - line 2, column 5: Expected semicolon".to_string(),
            "b.c - line 3, column 2: Unknown variable name z".to_string(),
        ]
    );
    let kinds: Vec<DiagnosticKind> = diags.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::Syntax, DiagnosticKind::Semantic]);
}

#[test]
fn test_detached_diagnostic() {
    let mut diags = Diagnostics::new();
    diags.report_detached(DiagnosticKind::Syntax, "gone.c", "Could not read file 'gone.c'");
    assert_eq!(
        (&diags).into_iter().next().map(ToString::to_string),
        Some("gone.c - line 1, column 0: Could not read file 'gone.c'".to_string())
    );
}
