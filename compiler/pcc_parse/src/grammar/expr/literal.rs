//! Number, string and character literals.

use pcc_ir::{ExprId, ExprKind};

use crate::Parser;

/// The escape table shared by string and character literals.
fn unescape(c: char) -> Option<char> {
    Some(match c {
        '"' => '"',
        '\'' => '\'',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        '\\' => '\\',
        _ => return None,
    })
}

impl Parser<'_> {
    /// Integer (decimal or `0x` hex) or float literal.
    ///
    /// A leading `+` belongs to the literal only when a digit follows;
    /// `-` is always the negation operator.
    pub(crate) fn parse_number(&mut self) -> Option<ExprId> {
        let first = self.cursor.peek();
        let signed = first == '+' && self.cursor.peek_nth(1).is_ascii_digit();
        if !first.is_ascii_digit() && !signed {
            return None;
        }
        let mark = self.mark();
        if signed {
            self.cursor.bump();
        }
        let start = self.cursor.position();

        if self.cursor.take_str("0x") || self.cursor.take_str("0X") {
            let digits_start = self.cursor.position();
            while self.cursor.peek().is_ascii_hexdigit() {
                self.cursor.bump();
            }
            let digits = self.cursor.slice(digits_start, self.cursor.position());
            let value = match u32::from_str_radix(digits, 16) {
                Ok(bits) => hex_bits(bits),
                Err(_) => {
                    self.cursor
                        .error_at(mark, format!("Integer literal '0x{digits}' is out of range"));
                    0
                }
            };
            self.cursor.skip_whitespace();
            return Some(self.alloc_expr(ExprKind::Int(value), mark));
        }

        self.skip_digits();
        let mut is_float = false;
        if self.cursor.peek() == '.' && self.cursor.peek_nth(1).is_ascii_digit() {
            is_float = true;
            self.cursor.bump();
            self.skip_digits();
            if matches!(self.cursor.peek(), 'e' | 'E') {
                self.cursor.bump();
                self.cursor.take_any(&['+', '-']);
                self.skip_digits();
            }
        }
        let text = self.cursor.slice(start, self.cursor.position());
        if self.cursor.take_any(&['f', 'F']).is_some() {
            is_float = true;
        }
        let kind = if is_float {
            ExprKind::Float(text.parse().unwrap_or(0.0))
        } else if let Ok(value) = text.parse::<i32>() {
            ExprKind::Int(value)
        } else {
            self.cursor
                .error_at(mark, format!("Integer literal '{text}' is out of range"));
            ExprKind::Int(0)
        };
        self.cursor.skip_whitespace();
        Some(self.alloc_expr(kind, mark))
    }

    fn skip_digits(&mut self) {
        while self.cursor.peek().is_ascii_digit() {
            self.cursor.bump();
        }
    }

    /// `"string"` or `'c'`. A character literal is an integer.
    pub(crate) fn parse_string(&mut self) -> Option<ExprId> {
        let mark = self.mark();
        let open = self.cursor.take_any(&['"', '\''])?;
        let mut value = String::new();
        loop {
            if !self.cursor.has_remaining() {
                self.cursor.error("Unexpected EOF", false, &[]);
                break;
            }
            match self.cursor.bump() {
                '\\' => {
                    let escape = self.cursor.bump();
                    if let Some(c) = unescape(escape) {
                        value.push(c);
                    } else {
                        self.cursor.error(
                            format!("Unknown character escape sequence '\\{escape}'"),
                            false,
                            &[],
                        );
                        value.push('\\');
                        value.push(escape);
                    }
                }
                '\r' | '\n' => {
                    self.cursor.error("Unexpected newline", false, &[]);
                    break;
                }
                c if c == open => break,
                c => value.push(c),
            }
        }
        self.cursor.skip_whitespace();

        if open == '"' {
            return Some(self.alloc_expr(ExprKind::Str(value), mark));
        }
        let mut chars = value.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => char_code(c),
            (None, _) => {
                self.cursor.error_at(
                    mark,
                    "Char literal cannot be less than one character long",
                );
                0
            }
            (Some(c), Some(_)) => {
                self.cursor.error_at(
                    mark,
                    "Char literal cannot be more than one character long",
                );
                char_code(c)
            }
        };
        Some(self.alloc_expr(ExprKind::Int(code), mark))
    }
}

fn char_code(c: char) -> i32 {
    i32::try_from(u32::from(c)).unwrap_or(0)
}

/// Reinterpret a hex literal's 32 bits as a signed word.
#[allow(
    clippy::cast_possible_wrap,
    reason = "hex literals denote raw 32-bit words, 0xFFFFFFFF is -1"
)]
fn hex_bits(bits: u32) -> i32 {
    bits as i32
}
