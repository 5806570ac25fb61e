//! Postfix chain: call, member access, indexing, post increment.

use pcc_ir::{ExprId, ExprKind, UnaryOp};

use super::VALUE_STOPS;
use crate::Parser;

impl Parser<'_> {
    /// Apply postfix operators to `base` left to right until none match.
    pub(crate) fn parse_postfix(&mut self, mut base: ExprId) -> ExprId {
        loop {
            let mark = self.mark();
            base = if self.eat("(") {
                let args = self.parse_call_args();
                self.alloc_expr(ExprKind::Call { callee: base, args }, mark)
            } else if self.eat("->") {
                let object = self.alloc_expr(
                    ExprKind::Unary {
                        op: UnaryOp::Deref,
                        operand: base,
                    },
                    mark,
                );
                let field = self.parse_field_name();
                self.alloc_expr(ExprKind::Field { object, field }, mark)
            } else if self.eat(".") {
                let field = self.parse_field_name();
                self.alloc_expr(ExprKind::Field { object: base, field }, mark)
            } else if self.eat("[") {
                let index = match self.parse_expr() {
                    Some(index) => index,
                    None => self.expected_value(),
                };
                if !self.eat("]")
                    && self.cursor.error("Expected closing bracket", false, &["]", ")", ";", "}"])
                        == Some("]")
                {
                    self.eat("]");
                }
                self.alloc_expr(ExprKind::Index { base, index }, mark)
            } else if let Some(op) = self.match_postfix_step() {
                self.alloc_expr(ExprKind::Step { op, operand: base }, mark)
            } else {
                return base;
            };
        }
    }

    /// Arguments after `(`, through the closing `)`.
    fn parse_call_args(&mut self) -> Vec<ExprId> {
        let mut args = Vec::new();
        loop {
            match self.parse_expr() {
                Some(arg) => args.push(arg),
                None => {
                    if !args.is_empty() {
                        self.cursor.error("Expected value", false, VALUE_STOPS);
                    }
                    break;
                }
            }
            if !self.eat(",") {
                break;
            }
        }
        if !self.eat(")")
            && self.cursor.error("Expected closing parentheses", false, VALUE_STOPS) == Some(")")
        {
            self.eat(")");
        }
        args
    }

    fn parse_field_name(&mut self) -> String {
        match self.cursor.take_ident() {
            Some(name) => name,
            None => {
                self.cursor
                    .error("Expected identifier", false, &[".", ")", ";", "}"]);
                String::new()
            }
        }
    }
}
