use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_first_line_columns_are_zero_based() {
    let source = "void main()";
    assert_eq!(offset_to_line_col(source, 0), (1, 0));
    assert_eq!(offset_to_line_col(source, 5), (1, 5));
}

#[test]
fn test_line_starts() {
    let source = "abc\ndefgh\nij";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_count(), 3);
    assert_eq!(table.offset_to_line_col(source, 3), (1, 3)); // '\n'
    assert_eq!(table.offset_to_line_col(source, 4), (2, 0)); // 'd'
    assert_eq!(table.offset_to_line_col(source, 7), (2, 3)); // 'g'
    assert_eq!(table.offset_to_line_col(source, 10), (3, 0)); // 'i'
}

#[test]
fn test_empty_source() {
    assert_eq!(offset_to_line_col("", 0), (1, 0));
}

#[test]
fn test_offset_past_end_is_clamped() {
    let source = "ab\ncd";
    assert_eq!(offset_to_line_col(source, 99), (2, 2));
}

#[test]
fn test_columns_count_characters() {
    let source = "\"é\" x";
    // 'é' is two bytes
    assert_eq!(offset_to_line_col(source, 5), (1, 4));
}

#[test]
fn test_trailing_newline_starts_new_line() {
    let source = "x;\n";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_from_offset(3), 2);
}
