//! Operator matching helpers.
//!
//! Each helper consumes the operator (and trailing whitespace) when one of
//! its level's operators is at the cursor. Alternatives are tried in order,
//! so longer spellings come first where they share a prefix.

use pcc_ir::{BinaryOp, StepOp, UnaryOp};

use crate::Parser;

impl Parser<'_> {
    /// `=` but not `==`.
    pub(crate) fn match_assign_op(&mut self) -> bool {
        if self.cursor.peek() == '=' && self.cursor.peek_nth(1) != '=' {
            self.eat("=")
        } else {
            false
        }
    }

    pub(crate) fn match_bitwise_op(&mut self) -> Option<BinaryOp> {
        let op = match self.cursor.take_any(&['&', '|', '^'])? {
            '&' => BinaryOp::And,
            '|' => BinaryOp::Or,
            _ => BinaryOp::Xor,
        };
        self.cursor.skip_whitespace();
        Some(op)
    }

    pub(crate) fn match_equality_op(&mut self) -> Option<BinaryOp> {
        let op = match self
            .cursor
            .take_any_str(&["==", "!=", "<=", ">=", "<", ">"])?
        {
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::NotEq,
            "<=" => BinaryOp::LtEq,
            ">=" => BinaryOp::GtEq,
            "<" => BinaryOp::Lt,
            _ => BinaryOp::Gt,
        };
        self.cursor.skip_whitespace();
        Some(op)
    }

    pub(crate) fn match_shift_op(&mut self) -> Option<BinaryOp> {
        let op = match self.cursor.take_any_str(&[">>", "<<"])? {
            ">>" => BinaryOp::Shr,
            _ => BinaryOp::Shl,
        };
        self.cursor.skip_whitespace();
        Some(op)
    }

    pub(crate) fn match_additive_op(&mut self) -> Option<BinaryOp> {
        let op = match self.cursor.take_any(&['+', '-'])? {
            '+' => BinaryOp::Add,
            _ => BinaryOp::Sub,
        };
        self.cursor.skip_whitespace();
        Some(op)
    }

    pub(crate) fn match_multiplicative_op(&mut self) -> Option<BinaryOp> {
        let op = match self.cursor.take_any(&['*', '/', '%'])? {
            '*' => BinaryOp::Mul,
            '/' => BinaryOp::Div,
            _ => BinaryOp::Mod,
        };
        self.cursor.skip_whitespace();
        Some(op)
    }

    pub(crate) fn match_unary_op(&mut self) -> Option<UnaryOp> {
        let op = match self.cursor.take_any(&['*', '&', '!', '-', '~'])? {
            '*' => UnaryOp::Deref,
            '&' => UnaryOp::AddrOf,
            '!' => UnaryOp::Not,
            '-' => UnaryOp::Neg,
            _ => UnaryOp::BitNot,
        };
        self.cursor.skip_whitespace();
        Some(op)
    }

    /// `++x` / `--x`.
    pub(crate) fn match_prefix_step(&mut self) -> Option<StepOp> {
        if self.eat("++") {
            Some(StepOp::PreInc)
        } else if self.eat("--") {
            Some(StepOp::PreDec)
        } else {
            None
        }
    }

    /// `x++` / `x--`.
    pub(crate) fn match_postfix_step(&mut self) -> Option<StepOp> {
        if self.eat("++") {
            Some(StepOp::PostInc)
        } else if self.eat("--") {
            Some(StepOp::PostDec)
        } else {
            None
        }
    }
}
