//! Primary values: parentheses, literals, keywords, `sizeof`, `$special`
//! identifiers and plain identifiers.

use pcc_ir::{ExprId, ExprKind};

use super::VALUE_STOPS;
use crate::cursor::is_ident_continue;
use crate::Parser;

impl Parser<'_> {
    /// Parse one primary value, trying each form in a fixed order.
    pub(crate) fn parse_primary(&mut self) -> Option<ExprId> {
        if self.cursor.peek() == '(' {
            return Some(self.parse_parenthesized());
        }
        if let Some(number) = self.parse_number() {
            return Some(number);
        }
        let mark = self.mark();
        if self.eat_keyword("true") {
            return Some(self.alloc_expr(ExprKind::Bool(true), mark));
        }
        if self.eat_keyword("false") {
            return Some(self.alloc_expr(ExprKind::Bool(false), mark));
        }
        if self.eat_keyword("null") {
            return Some(self.alloc_expr(ExprKind::Null, mark));
        }
        if self.eat_keyword("sizeof") {
            return Some(self.parse_sizeof_rest(mark));
        }
        if self.cursor.peek() == '$' {
            return Some(self.parse_special());
        }
        if let Some(name) = self.cursor.take_ident() {
            return Some(self.alloc_expr(ExprKind::Ident(name), mark));
        }
        self.parse_string()
    }

    /// `( value )`. No node is kept for the parentheses themselves.
    fn parse_parenthesized(&mut self) -> ExprId {
        self.eat("(");
        let inner = match self.parse_expr() {
            Some(inner) => inner,
            None => self.expected_value(),
        };
        if !self.eat(")") {
            self.cursor
                .error("Expected closing parentheses", true, VALUE_STOPS);
        }
        inner
    }

    /// `sizeof ( Type )`, after the keyword.
    fn parse_sizeof_rest(&mut self, mark: pcc_ir::Mark) -> ExprId {
        if !self.eat("(") {
            let found = self
                .cursor
                .error("Expected opening parentheses", true, &["(", ";", "}"]);
            if found != Some("(") {
                return self.error_expr();
            }
        }
        let Some(ty) = self.parse_type() else {
            self.cursor
                .error("Expected type identifier", false, VALUE_STOPS);
            self.eat(")");
            return self.error_expr();
        };
        if !self.eat(")") {
            self.cursor
                .error("Expected closing parentheses", true, VALUE_STOPS);
        }
        self.alloc_expr(ExprKind::Sizeof(ty), mark)
    }

    /// `$name`: a memory-mapped special register.
    fn parse_special(&mut self) -> ExprId {
        let mark = self.mark();
        self.eat("$");
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.peek()) {
            self.cursor.bump();
        }
        let name = self.cursor.slice(start, self.cursor.position()).to_string();
        if name.is_empty() {
            self.cursor
                .error("Expected identifier", true, &[" ", "\n", "\r"]);
        }
        self.cursor.skip_whitespace();
        self.alloc_expr(ExprKind::Special(name), mark)
    }
}
