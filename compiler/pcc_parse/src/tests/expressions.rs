use pcc_ir::{Arena, BinaryOp, Constant, ExprKind, Type};
use pretty_assertions::assert_eq;

use super::{expr, expr_errors, render};

#[test]
fn test_multiplication_binds_tighter_and_folds() {
    let mut arena = Arena::new();
    let value = expr(&mut arena, "1 + 2 * 3");
    assert_eq!(arena.render_expr(value), "(1 + (2 * 3))");
    assert_eq!(arena.fold_int(value), Some(7));
}

#[test]
fn test_binary_levels() {
    assert_eq!(render("a - b - c"), "((a - b) - c)");
    assert_eq!(render("a & b == c"), "(a & (b == c))");
    assert_eq!(render("a | b ^ c & d"), "(((a | b) ^ c) & d)");
    assert_eq!(render("1 << 2 + 3"), "(1 << (2 + 3))");
    assert_eq!(render("a < b << 1"), "(a < (b << 1))");
    assert_eq!(render("a % b / c * d"), "(((a % b) / c) * d)");
    assert_eq!(render("!a == ~b"), "((!a) == (~b))");
}

#[test]
fn test_assignment_is_right_associative() {
    let mut arena = Arena::new();
    let value = expr(&mut arena, "a = b = c + 1");
    assert_eq!(arena.render_expr(value), "a = b = (c + 1)");
    let ExprKind::Assign { value: inner, .. } = arena.expr(value).kind else {
        panic!("expected an assignment");
    };
    assert!(matches!(arena.expr(inner).kind, ExprKind::Assign { .. }));
}

#[test]
fn test_equality_is_not_assignment() {
    let mut arena = Arena::new();
    let value = expr(&mut arena, "a == b");
    assert!(matches!(
        arena.expr(value).kind,
        ExprKind::Binary {
            op: BinaryOp::Eq,
            ..
        }
    ));
}

#[test]
fn test_cast_versus_parentheses() {
    assert_eq!(render("(int)x + 1"), "((int)x + 1)");
    assert_eq!(render("(int*)p"), "(int*)p");
    assert_eq!(render("(x) - 1"), "(x - 1)");
    assert_eq!(render("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn test_function_pointer_cast() {
    let mut arena = Arena::new();
    let value = expr(&mut arena, "(int (*f)(int))g");
    let ExprKind::Cast { ty, .. } = &arena.expr(value).kind else {
        panic!("expected a cast");
    };
    assert!(matches!(ty, Type::FunctionPointer(fp) if fp.params == vec![Type::Int]));
}

#[test]
fn test_postfix_chain() {
    assert_eq!(render("p->f.g[2]++"), "(*p).f.g[2]++");
    assert_eq!(render("f(1, g(2))"), "f(1, g(2))");
    assert_eq!(render("table[i](x)"), "table[i](x)");
    assert_eq!(render("&a[1]"), "(&a[1])");
    assert_eq!(render("*p--"), "(*p--)");
}

#[test]
fn test_prefix_operators() {
    assert_eq!(render("--x"), "--x");
    assert_eq!(render("++*p"), "++(*p)");
    assert_eq!(render("-5"), "(-5)");
    assert_eq!(render("- -x"), "(-(-x))");
}

#[test]
fn test_plus_sign_belongs_to_literal() {
    let mut arena = Arena::new();
    let value = expr(&mut arena, "+5");
    assert_eq!(arena.expr(value).kind, ExprKind::Int(5));
}

#[test]
fn test_integer_literals() {
    let mut arena = Arena::new();
    let hex = expr(&mut arena, "0xFFFFFFFF");
    assert_eq!(arena.expr(hex).kind, ExprKind::Int(-1));
    let small = expr(&mut arena, "0x7fff");
    assert_eq!(arena.expr(small).kind, ExprKind::Int(32767));
    let max = expr(&mut arena, "2147483647");
    assert_eq!(arena.expr(max).kind, ExprKind::Int(i32::MAX));
}

#[test]
fn test_float_literals() {
    let mut arena = Arena::new();
    let plain = expr(&mut arena, "1.5");
    assert_eq!(arena.fold(plain), Some(Constant::Float(1.5)));
    let suffixed = expr(&mut arena, "2f");
    assert_eq!(arena.fold(suffixed), Some(Constant::Float(2.0)));
    let exponent = expr(&mut arena, "1.5e3");
    assert_eq!(arena.fold(exponent), Some(Constant::Float(1500.0)));
}

#[test]
fn test_string_and_char_literals() {
    let mut arena = Arena::new();
    let s = expr(&mut arena, r#""a\tb\"""#);
    assert_eq!(arena.expr(s).kind, ExprKind::Str("a\tb\"".to_string()));
    let c = expr(&mut arena, "'a'");
    assert_eq!(arena.expr(c).kind, ExprKind::Int(97));
    let newline = expr(&mut arena, r"'\n'");
    assert_eq!(arena.expr(newline).kind, ExprKind::Int(10));
}

#[test]
fn test_keywords_and_specials() {
    let mut arena = Arena::new();
    let t = expr(&mut arena, "true");
    assert_eq!(arena.expr(t).kind, ExprKind::Bool(true));
    let n = expr(&mut arena, "null");
    assert_eq!(arena.expr(n).kind, ExprKind::Null);
    let size = expr(&mut arena, "sizeof(int*)");
    assert_eq!(arena.expr(size).kind, ExprKind::Sizeof(Type::Int.pointer_to()));
    let special = expr(&mut arena, "$tick");
    assert_eq!(arena.expr(special).kind, ExprKind::Special("tick".to_string()));
    // Keywords only match whole words.
    let ident = expr(&mut arena, "trueish");
    assert_eq!(arena.expr(ident).kind, ExprKind::Ident("trueish".to_string()));
}

#[test]
fn test_comments_are_whitespace() {
    assert_eq!(render("a /* inner */ + // rest\n b"), "(a + b)");
}

#[test]
fn test_literal_errors() {
    assert_eq!(
        expr_errors("99999999999"),
        vec!["Integer literal '99999999999' is out of range"]
    );
    assert_eq!(
        expr_errors("''"),
        vec!["Char literal cannot be less than one character long"]
    );
    assert_eq!(
        expr_errors("'ab'"),
        vec!["Char literal cannot be more than one character long"]
    );
    assert_eq!(expr_errors("\"abc"), vec!["Unexpected EOF"]);
    assert_eq!(
        expr_errors(r#""\q""#),
        vec![r"Unknown character escape sequence '\q'"]
    );
}

#[test]
fn test_missing_closers() {
    assert_eq!(expr_errors("f(1, 2"), vec!["Expected closing parentheses"]);
    assert_eq!(expr_errors("a[1"), vec!["Expected closing bracket"]);
    assert_eq!(expr_errors("(1 + 2"), vec!["Expected closing parentheses"]);
    assert_eq!(expr_errors("1 +"), vec!["Expected value"]);
}

#[test]
fn test_recovery_continues_after_bad_index() {
    // The skipped `]` is consumed so the rest of the value still parses.
    let mut arena = Arena::new();
    let (value, errors) = crate::parse_expression("a[1 2] + b", super::file(), &mut arena);
    assert_eq!(super::messages(&errors), vec!["Expected closing bracket"]);
    let value = value.unwrap_or_else(|| panic!("no value"));
    assert_eq!(arena.render_expr(value), "(a[1] + b)");
}
