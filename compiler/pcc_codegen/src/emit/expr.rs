//! Value lowering.
//!
//! Every value is computed into a freshly allocated register (or a reused
//! operand register) and returned with its type. After an error the
//! sentinel value is returned and the caller carries on, so one method
//! can report several independent problems.

use pcc_ir::{ExprId, ExprKind, Mark, Type, UnaryOp};
use pcc_stack::ensure_sufficient_stack;

use super::ins;
use super::method::MethodEmitter;
use super::place::{is_assignable, is_error};
use crate::names::string_label;
use crate::register::Value;

impl MethodEmitter<'_, '_> {
    /// Lower a value expression.
    pub(super) fn value(&mut self, id: ExprId) -> Value {
        ensure_sufficient_stack(|| self.value_inner(id))
    }

    fn value_inner(&mut self, id: ExprId) -> Value {
        let arena = self.arena();
        let expr = arena.expr(id);
        let mark = expr.mark;
        let foldable = matches!(
            expr.kind,
            ExprKind::Binary { .. }
                | ExprKind::Unary {
                    op: UnaryOp::Neg | UnaryOp::Not | UnaryOp::BitNot,
                    ..
                }
        );
        if let Some(folded) = arena.fold_int(id).filter(|_| foldable) {
            return self.load_int(folded);
        }
        match &expr.kind {
            ExprKind::Bool(b) => self.load_int(i32::from(*b)),
            ExprKind::Int(v) => self.load_int(*v),
            ExprKind::Float(_) => {
                self.error(mark, "Floating point numbers are not valid in ProgCom (yet)");
                Value::invalid()
            }
            ExprKind::Str(content) => {
                let reg = self.alloc();
                ins!(self, "movi {reg}, {}", string_label(content));
                Value::new(reg, Type::Int.pointer_to())
            }
            ExprKind::Null => {
                let reg = self.alloc();
                ins!(self, "movi {reg}, 0");
                Value::new(reg, Type::void_pointer())
            }
            ExprKind::Ident(name) => self.read_ident(name, mark),
            ExprKind::Special(name) => {
                let reg = self.alloc();
                ins!(self, "rd {reg}, r0, {name}");
                Value::new(reg, Type::Int)
            }
            ExprKind::Sizeof(ty) => {
                let size = self.ctx.size_of(ty);
                self.load_int(i32::try_from(size).unwrap_or(i32::MAX))
            }
            ExprKind::Unary {
                op: UnaryOp::Deref,
                ..
            }
            | ExprKind::Field { .. }
            | ExprKind::Index { .. } => match self.place(id) {
                Some(place) => self.read_place(place),
                None => Value::invalid(),
            },
            ExprKind::Unary {
                op: UnaryOp::AddrOf,
                operand,
            } => self.address_of(*operand, mark),
            ExprKind::Unary { op, operand } => self.unary(*op, *operand, mark),
            ExprKind::Step { op, operand } => self.step(*op, *operand, mark),
            ExprKind::Binary { op, left, right } => self.binary(*op, *left, *right, mark),
            ExprKind::Assign { target, value } => self.assignment(*target, *value, mark),
            ExprKind::Cast { ty, value } => self.cast(ty, *value, mark),
            ExprKind::Call { callee, args } => self.call(*callee, args, mark, true),
            ExprKind::Error => Value::invalid(),
        }
    }

    /// `target = value`. The result is the assigned value.
    fn assignment(&mut self, target: ExprId, value: ExprId, mark: Mark) -> Value {
        if !is_assignable(&self.arena().expr(target).kind) {
            self.error(mark, "Left side of assignment target must be a variable");
            return Value::invalid();
        }
        let value = self.value(value);
        self.assign_to(target, &value);
        value
    }

    /// `(ty) value`: reinterpret between types of equal size. An aggregate
    /// cast to a scalar loads its first word; a scalar never becomes an
    /// aggregate.
    fn cast(&mut self, ty: &Type, value: ExprId, mark: Mark) -> Value {
        let value = self.value(value);
        if is_error(&value) {
            return value;
        }
        let from = self.ctx.size_of(&value.ty);
        let to = self.ctx.size_of(ty);
        let from_scalar = value.ty.is_register_literal();
        if from != to || (from_scalar && !ty.is_register_literal()) {
            self.error(
                mark,
                format!("Cannot cast from '{}' to '{ty}'", value.ty),
            );
            self.release(value.reg);
            return Value::invalid();
        }
        if !from_scalar && ty.is_register_literal() {
            ins!(self, "rd {0}, {0}, 0", value.reg);
        }
        Value::new(value.reg, ty.clone())
    }
}
