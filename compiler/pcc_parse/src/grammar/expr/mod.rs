//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! | level          | operators                    | assoc |
//! |----------------|------------------------------|-------|
//! | assignment     | `=`                          | right |
//! | bitwise        | `&` `\|` `^` (one tier)      | left  |
//! | equality       | `==` `!=` `<` `<=` `>` `>=`  | left  |
//! | shift          | `<<` `>>`                    | left  |
//! | additive       | `+` `-`                      | left  |
//! | multiplicative | `*` `/` `%`                  | left  |
//! | unary          | `++x` `--x` `*` `&` `!` `-` `~` `(T)x` | prefix |
//! | postfix        | call, `.f`, `->f`, `[i]`, `x++`, `x--` | left |
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point and the binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: parentheses, identifiers, `sizeof`, `$special`, keywords
//! - `literal.rs`: number, string and character literals
//! - `postfix.rs`: call, member, index, post-increment chain

mod literal;
mod operators;
mod postfix;
mod primary;

use pcc_ir::{ExprId, ExprKind, Type};
use pcc_stack::ensure_sufficient_stack;

use crate::Parser;

/// Stops used when an operand is missing.
pub(crate) const VALUE_STOPS: &[&str] = &[")", ";", "}"];

impl Parser<'_> {
    /// Parse a value expression.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input cannot
    /// overflow the native stack.
    pub(crate) fn parse_expr(&mut self) -> Option<ExprId> {
        ensure_sufficient_stack(|| self.parse_assign())
    }

    /// Record "Expected value" and return a placeholder.
    pub(crate) fn expected_value(&mut self) -> ExprId {
        self.cursor.error("Expected value", false, VALUE_STOPS);
        self.error_expr()
    }

    fn parse_assign(&mut self) -> Option<ExprId> {
        let target = self.parse_bitwise()?;
        let mark = self.mark();
        if !self.match_assign_op() {
            return Some(target);
        }
        let value = match self.parse_expr() {
            Some(value) => value,
            None => self.expected_value(),
        };
        Some(self.alloc_expr(ExprKind::Assign { target, value }, mark))
    }

    /// `&`, `|` and `^` share one tier.
    fn parse_bitwise(&mut self) -> Option<ExprId> {
        let mut left = self.parse_equality()?;
        loop {
            let mark = self.mark();
            let Some(op) = self.match_bitwise_op() else {
                return Some(left);
            };
            let right = match self.parse_equality() {
                Some(right) => right,
                None => self.expected_value(),
            };
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, mark);
        }
    }

    fn parse_equality(&mut self) -> Option<ExprId> {
        let mut left = self.parse_shift()?;
        loop {
            let mark = self.mark();
            let Some(op) = self.match_equality_op() else {
                return Some(left);
            };
            let right = match self.parse_shift() {
                Some(right) => right,
                None => self.expected_value(),
            };
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, mark);
        }
    }

    fn parse_shift(&mut self) -> Option<ExprId> {
        let mut left = self.parse_additive()?;
        loop {
            let mark = self.mark();
            let Some(op) = self.match_shift_op() else {
                return Some(left);
            };
            let right = match self.parse_additive() {
                Some(right) => right,
                None => self.expected_value(),
            };
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, mark);
        }
    }

    fn parse_additive(&mut self) -> Option<ExprId> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let mark = self.mark();
            let Some(op) = self.match_additive_op() else {
                return Some(left);
            };
            let right = match self.parse_multiplicative() {
                Some(right) => right,
                None => self.expected_value(),
            };
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, mark);
        }
    }

    fn parse_multiplicative(&mut self) -> Option<ExprId> {
        let mut left = self.parse_unary()?;
        loop {
            let mark = self.mark();
            let Some(op) = self.match_multiplicative_op() else {
                return Some(left);
            };
            let right = match self.parse_unary() {
                Some(right) => right,
                None => self.expected_value(),
            };
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, mark);
        }
    }

    fn parse_unary(&mut self) -> Option<ExprId> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Option<ExprId> {
        if self.cursor.peek() == '(' {
            if let Some(cast) = self.parse_cast() {
                return Some(cast);
            }
        }
        let mark = self.mark();
        if let Some(op) = self.match_prefix_step() {
            let operand = self.unary_operand();
            return Some(self.alloc_expr(ExprKind::Step { op, operand }, mark));
        }
        if let Some(op) = self.match_unary_op() {
            let operand = self.unary_operand();
            return Some(self.alloc_expr(ExprKind::Unary { op, operand }, mark));
        }
        let base = self.parse_primary()?;
        Some(self.parse_postfix(base))
    }

    fn unary_operand(&mut self) -> ExprId {
        match self.parse_unary() {
            Some(operand) => operand,
            None => self.expected_value(),
        }
    }

    /// `(Type) value`, tried speculatively.
    ///
    /// A lone struct name in parentheses is read as a parenthesized
    /// identifier instead, so `(x) - 1` stays a subtraction.
    fn parse_cast(&mut self) -> Option<ExprId> {
        let mark = self.mark();
        self.try_parse(|p| {
            if !p.eat("(") {
                return None;
            }
            let ty = p.parse_type()?;
            if matches!(ty, Type::Struct(_)) || !p.eat(")") {
                return None;
            }
            let value = p.parse_unary()?;
            Some(p.alloc_expr(ExprKind::Cast { ty, value }, mark))
        })
    }
}
