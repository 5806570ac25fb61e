//! Operators: arithmetic, comparisons, unary operators and `++`/`--`.

use pcc_ir::{BinaryOp, ExprId, Mark, StepOp, Type, UnaryOp};

use super::ins;
use super::method::MethodEmitter;
use super::place::{is_assignable, is_error};
use crate::register::{Reg, Value};

/// Largest constant accepted as an immediate operand.
const MAX_IMMEDIATE: i32 = 0x7FFF;

impl MethodEmitter<'_, '_> {
    /// `-x`, `!x`, `~x`. Dereference and address-of are places.
    pub(super) fn unary(&mut self, op: UnaryOp, operand: ExprId, mark: Mark) -> Value {
        let value = self.value(operand);
        if is_error(&value) {
            return value;
        }
        let reg = value.reg;
        match op {
            UnaryOp::Neg => {
                if !value.ty.is_register_literal() {
                    return self.reject(
                        mark,
                        format!("Cannot negate a value of type '{}'", value.ty),
                        &[reg],
                    );
                }
                ins!(self, "sub {reg}, r0, {reg}");
            }
            UnaryOp::Not => {
                if !value.ty.is_register_literal() {
                    return self.reject(
                        mark,
                        format!("Cannot apply not operation to type '{}'", value.ty),
                        &[reg],
                    );
                }
                ins!(self, "cmp {reg}, {reg}, r0");
                ins!(self, "andi {reg}, {reg}, 1");
            }
            UnaryOp::BitNot => {
                if !value.ty.is_register_literal() {
                    return self.reject(
                        mark,
                        format!("Cannot apply not operation to type '{}'", value.ty),
                        &[reg],
                    );
                }
                ins!(self, "not {reg}");
            }
            UnaryOp::Deref | UnaryOp::AddrOf => {}
        }
        Value::new(reg, Type::Int)
    }

    /// `++x`, `--x`, `x++`, `x--`. The operand is read, stepped and
    /// written back; the prefix forms yield the new value, the postfix
    /// forms a copy of the old one.
    pub(super) fn step(&mut self, op: StepOp, operand: ExprId, mark: Mark) -> Value {
        if !is_assignable(&self.arena().expr(operand).kind) {
            self.error(mark, "Value not able to be assigned a value");
            return Value::invalid();
        }
        let opcode = if op.is_increment() { "addi" } else { "subi" };
        let value = self.value(operand);
        if is_error(&value) {
            return value;
        }
        if op.is_prefix() {
            if !value.ty.is_register_literal() {
                let name = if op.is_increment() { "add" } else { "sub" };
                return self.reject(
                    mark,
                    format!(
                        "Cannot apply operator {name} to two values of type '{}' and 'int'",
                        value.ty
                    ),
                    &[value.reg],
                );
            }
            ins!(self, "{opcode} {0}, {0}, 1", value.reg);
            self.assign_to(operand, &value);
            return value;
        }
        let old = self.alloc();
        if !value.ty.is_register_literal() {
            return self.reject(
                mark,
                format!(
                    "Cannot apply a post-increment operation to a value of type {}",
                    value.ty
                ),
                &[value.reg, old],
            );
        }
        ins!(self, "mov {old}, {}", value.reg);
        ins!(self, "{opcode} {0}, {0}, 1", value.reg);
        self.assign_to(operand, &value);
        self.release(value.reg);
        Value::new(old, value.ty)
    }

    /// Binary operators that did not fold. A small constant operand
    /// becomes an immediate.
    pub(super) fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId, mark: Mark) -> Value {
        if op.is_comparison() {
            return self.compare(op, left, right, mark);
        }
        let (Some(opcode), Some(immediate)) = (op.opcode(), op.immediate_opcode()) else {
            return self.modulus(left, right, mark);
        };

        if let Some(constant) = self.immediate(left).filter(|_| op.is_commutative()) {
            return self.binary_immediate(opcode, immediate, right, constant, mark, true);
        }
        if let Some(constant) = self.immediate(right) {
            return self.binary_immediate(opcode, immediate, left, constant, mark, false);
        }

        let Some((l, r)) = self.operands(left, right) else {
            return Value::invalid();
        };
        if !l.ty.is_register_literal() || !r.ty.is_register_literal() {
            return self.reject(
                mark,
                format!(
                    "Cannot apply operator {opcode} to two values of type '{}' and '{}'",
                    l.ty, r.ty
                ),
                &[l.reg, r.reg],
            );
        }
        ins!(self, "{opcode} {0}, {0}, {1}", l.reg, r.reg);
        self.release(r.reg);
        l
    }

    /// A constant operand that fits an immediate field.
    fn immediate(&self, id: ExprId) -> Option<i32> {
        self.arena()
            .fold_int(id)
            .filter(|c| (0..=MAX_IMMEDIATE).contains(c))
    }

    fn binary_immediate(
        &mut self,
        opcode: &str,
        immediate: &str,
        operand: ExprId,
        constant: i32,
        mark: Mark,
        constant_on_left: bool,
    ) -> Value {
        let value = self.value(operand);
        if is_error(&value) {
            return value;
        }
        if !value.ty.is_register_literal() {
            let (a, b) = if constant_on_left {
                (Type::Int, value.ty.clone())
            } else {
                (value.ty.clone(), Type::Int)
            };
            return self.reject(
                mark,
                format!("Cannot apply operator {opcode} to two values of type '{a}' and '{b}'"),
                &[value.reg],
            );
        }
        ins!(self, "{immediate} {0}, {0}, {constant}", value.reg);
        value
    }

    /// Evaluate both operands, left first. `None` (with both released)
    /// when either failed.
    fn operands(&mut self, left: ExprId, right: ExprId) -> Option<(Value, Value)> {
        let l = self.value(left);
        let r = self.value(right);
        if is_error(&l) || is_error(&r) {
            self.release(l.reg);
            self.release(r.reg);
            return None;
        }
        Some((l, r))
    }

    /// `a % b`: the remainder is left in the auxiliary register by `div`.
    fn modulus(&mut self, left: ExprId, right: ExprId, mark: Mark) -> Value {
        let Some((l, r)) = self.operands(left, right) else {
            return Value::invalid();
        };
        if !l.ty.is_register_literal() || !r.ty.is_register_literal() {
            return self.reject(
                mark,
                format!(
                    "Cannot apply operator modulus to two values of type '{}' and '{}'",
                    l.ty, r.ty
                ),
                &[l.reg, r.reg],
            );
        }
        ins!(self, "div r0, {}, {}", l.reg, r.reg);
        ins!(self, "ax {}, r0", l.reg);
        self.release(r.reg);
        Value::new(l.reg, Type::Int)
    }

    /// Comparisons produce 1 or 0 in the left operand's register, built
    /// from the three-way `cmp` instruction.
    fn compare(&mut self, op: BinaryOp, left: ExprId, right: ExprId, mark: Mark) -> Value {
        let Some((l, r)) = self.operands(left, right) else {
            return Value::invalid();
        };
        if !l.ty.is_register_literal() || !r.ty.is_register_literal() {
            return self.reject(
                mark,
                format!("Cannot compare two items of type '{}' and '{}'", l.ty, r.ty),
                &[l.reg, r.reg],
            );
        }
        let (a, b) = (l.reg, r.reg);
        match op {
            BinaryOp::Eq => {
                ins!(self, "cmp {a}, {a}, {b}");
                ins!(self, "andi {a}, {a}, 1");
                ins!(self, "xori {a}, {a}, 1");
            }
            BinaryOp::NotEq => {
                ins!(self, "cmp {a}, {a}, {b}");
                ins!(self, "andi {a}, {a}, 1");
            }
            BinaryOp::Gt | BinaryOp::LtEq => {
                ins!(self, "cmp {a}, {a}, {b}");
                ins!(self, "movi {b}, 1");
                ins!(self, "cmp {a}, {b}, {a}");
                if op == BinaryOp::Gt {
                    ins!(self, "xori {a}, {a}, 1");
                }
            }
            _ => {
                ins!(self, "cmp {a}, {b}, {a}");
                ins!(self, "movi {b}, 1");
                ins!(self, "cmp {a}, {b}, {a}");
                if op == BinaryOp::Lt {
                    ins!(self, "xori {a}, {a}, 1");
                }
            }
        }
        self.release(b);
        Value::new(a, Type::Int)
    }

    /// Report `message`, release `regs` and yield the sentinel.
    pub(super) fn reject(&mut self, mark: Mark, message: String, regs: &[Reg]) -> Value {
        self.error(mark, message);
        for &reg in regs {
            self.release(reg);
        }
        Value::invalid()
    }
}
