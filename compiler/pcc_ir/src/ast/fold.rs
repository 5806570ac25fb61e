//! Constant folding.
//!
//! Best-effort partial evaluation of literal expressions. Used for array
//! sizes, constant globals, dead-branch elision and immediate operands.
//! Identifiers never fold here: constant globals are substituted by the
//! code generator, which knows the declaration registry.

use super::{Arena, BinaryOp, ExprId, ExprKind, UnaryOp};

/// A folded scalar.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Constant {
    Int(i32),
    Float(f64),
}

impl Constant {
    pub fn as_int(self) -> Option<i32> {
        match self {
            Constant::Int(v) => Some(v),
            Constant::Float(_) => None,
        }
    }
}

impl Arena {
    /// Fold an expression to a constant, if it is one.
    pub fn fold(&self, id: ExprId) -> Option<Constant> {
        match &self.expr(id).kind {
            ExprKind::Int(v) => Some(Constant::Int(*v)),
            ExprKind::Float(v) => Some(Constant::Float(*v)),
            ExprKind::Bool(b) => Some(Constant::Int(i32::from(*b))),
            ExprKind::Assign { value, .. } => self.fold(*value),
            ExprKind::Unary { op, operand } => {
                let v = self.fold_int(*operand)?;
                match op {
                    UnaryOp::Neg => Some(Constant::Int(v.wrapping_neg())),
                    UnaryOp::BitNot => Some(Constant::Int(!v)),
                    UnaryOp::Not => Some(Constant::Int(i32::from(v == 0))),
                    UnaryOp::Deref | UnaryOp::AddrOf => None,
                }
            }
            ExprKind::Binary { op, left, right } => {
                let l = self.fold_int(*left)?;
                let r = self.fold_int(*right)?;
                fold_binary(*op, l, r).map(Constant::Int)
            }
            _ => None,
        }
    }

    /// Fold an expression to an integer constant.
    pub fn fold_int(&self, id: ExprId) -> Option<i32> {
        self.fold(id).and_then(Constant::as_int)
    }
}

/// 32-bit wrapping arithmetic; division by zero does not fold.
#[allow(
    clippy::cast_sign_loss,
    reason = "shift counts are masked to 0..32 by wrapping_shl/wrapping_shr"
)]
fn fold_binary(op: BinaryOp, l: i32, r: i32) -> Option<i32> {
    let value = match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::Div => l.checked_div(r)?,
        BinaryOp::Mod => l.checked_rem(r)?,
        BinaryOp::Shl => l.wrapping_shl(r as u32),
        BinaryOp::Shr => l.wrapping_shr(r as u32),
        BinaryOp::And => l & r,
        BinaryOp::Or => l | r,
        BinaryOp::Xor => l ^ r,
        BinaryOp::Eq => i32::from(l == r),
        BinaryOp::NotEq => i32::from(l != r),
        BinaryOp::Lt => i32::from(l < r),
        BinaryOp::LtEq => i32::from(l <= r),
        BinaryOp::Gt => i32::from(l > r),
        BinaryOp::GtEq => i32::from(l >= r),
    };
    Some(value)
}
