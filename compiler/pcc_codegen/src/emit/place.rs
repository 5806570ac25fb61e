//! Assignable places.
//!
//! A place is a base register plus a word offset and the type stored
//! there. Locals are based on the frame pointer, globals on a register
//! holding `__GLOBALS`, and fields, indexed elements and dereferenced
//! pointers on the register holding the computed address. Reading a
//! register-literal place loads the word; reading an aggregate place
//! yields its address.

use pcc_ir::{ExprId, ExprKind, Mark, Type, UnaryOp};

use super::call::method_pointer_type;
use super::ins;
use super::method::MethodEmitter;
use crate::layout::Slot;
use crate::names::method_uid;
use crate::register::{Reg, Value};

pub(super) struct Place {
    pub base: Reg,
    pub offset: u32,
    pub ty: Type,
}

impl Place {
    /// A slot of the current frame.
    pub fn frame(slot: &Slot) -> Self {
        Place {
            base: Reg::Frame,
            offset: slot.offset,
            ty: slot.ty.clone(),
        }
    }
}

/// What an identifier names, as seen from the current method.
pub(super) enum Binding {
    Local(Slot),
    Global { offset: u32, ty: Type, is_const: bool },
    /// A `const` global, replaced by its value.
    Constant(i32),
}

/// The error sentinel: nothing useful to store or operate on, and the
/// error has already been reported.
pub(super) fn is_error(value: &Value) -> bool {
    value.reg == Reg::Invalid && value.ty.is_void()
}

/// Targets that may appear on the left of `=` or under `++`/`--`.
pub(super) fn is_assignable(kind: &ExprKind) -> bool {
    matches!(
        kind,
        ExprKind::Ident(_)
            | ExprKind::Special(_)
            | ExprKind::Field { .. }
            | ExprKind::Index { .. }
            | ExprKind::Unary {
                op: UnaryOp::Deref,
                ..
            }
    )
}

/// The pointer type produced by taking the address of a `ty` variable.
/// Arrays decay to a pointer to their element.
fn address_type(ty: &Type) -> Type {
    match ty {
        Type::Array(elem, _) => (**elem).clone().pointer_to(),
        _ => ty.clone().pointer_to(),
    }
}

impl MethodEmitter<'_, '_> {
    /// Locals shadow globals; globals must be visible from this file.
    pub(super) fn binding(&self, name: &str) -> Option<Binding> {
        if let Some(slot) = self.frame.slot(name) {
            return Some(Binding::Local(slot.clone()));
        }
        let (id, global) = self.program.global(name, Some(self.item.file))?;
        if let Some(value) = global.const_value {
            return Some(Binding::Constant(value));
        }
        Some(Binding::Global {
            offset: self.ctx.global_offset(id).unwrap_or(0),
            ty: global.ty.clone(),
            is_const: self.program.item(id).is_const(),
        })
    }

    pub(super) fn global_place(&mut self, offset: u32, ty: Type) -> Place {
        let base = self.globals_base();
        Place { base, offset, ty }
    }

    pub(super) fn read_ident(&mut self, name: &str, mark: Mark) -> Value {
        match self.binding(name) {
            Some(Binding::Local(slot)) => self.read_place(Place::frame(&slot)),
            Some(Binding::Global { offset, ty, .. }) => {
                let place = self.global_place(offset, ty);
                self.read_place(place)
            }
            Some(Binding::Constant(value)) => self.load_int(value),
            None => {
                self.error(mark, format!("Unknown variable name {name}"));
                Value::invalid()
            }
        }
    }

    pub(super) fn assign_ident(&mut self, name: &str, mark: Mark, value: &Value) {
        match self.binding(name) {
            Some(Binding::Local(slot)) => self.store_place(Place::frame(&slot), value, mark),
            Some(Binding::Global {
                offset,
                ty,
                is_const: false,
            }) => {
                let place = self.global_place(offset, ty);
                self.store_place(place, value, mark);
            }
            Some(Binding::Constant(_) | Binding::Global { is_const: true, .. }) => {
                self.error(mark, "Cannot assign a constant field");
            }
            None => self.error(mark, format!("Unknown variable name {name}")),
        }
    }

    /// Store `value` into an assignable expression.
    pub(super) fn assign_to(&mut self, target: ExprId, value: &Value) {
        let expr = self.arena().expr(target);
        match &expr.kind {
            ExprKind::Ident(name) => self.assign_ident(name, expr.mark, value),
            ExprKind::Special(name) => ins!(self, "wr {}, r0, {name}", value.reg),
            _ => {
                if let Some(place) = self.place(target) {
                    self.store_place(place, value, expr.mark);
                }
            }
        }
    }

    /// The place a field access, index or dereference denotes.
    ///
    /// `None` after a reported error.
    pub(super) fn place(&mut self, id: ExprId) -> Option<Place> {
        let arena = self.arena();
        let expr = arena.expr(id);
        match &expr.kind {
            ExprKind::Unary {
                op: UnaryOp::Deref,
                operand,
            } => {
                let pointer = self.value(*operand);
                if is_error(&pointer) {
                    return None;
                }
                let Some(pointee) = pointer.ty.pointee().cloned() else {
                    self.error(expr.mark, "Cannot dereference a non-pointer value");
                    self.release(pointer.reg);
                    return None;
                };
                Some(Place {
                    base: pointer.reg,
                    offset: 0,
                    ty: pointee,
                })
            }
            ExprKind::Field { object, field } => {
                let object = self.value(*object);
                if is_error(&object) {
                    return None;
                }
                let Type::Struct(s) = &object.ty else {
                    self.error(
                        expr.mark,
                        format!("Cannot access a field of an object of type '{}'", object.ty),
                    );
                    self.release(object.reg);
                    return None;
                };
                let slot = match self.ctx.struct_layout(s).map(|l| l.slot(field).cloned()) {
                    Some(Some(slot)) => slot,
                    Some(None) => {
                        self.error(
                            expr.mark,
                            format!("Field '{field}' does not exist in type '{}'", object.ty),
                        );
                        self.release(object.reg);
                        return None;
                    }
                    None => {
                        self.release(object.reg);
                        return None;
                    }
                };
                Some(Place {
                    base: object.reg,
                    offset: slot.offset,
                    ty: slot.ty,
                })
            }
            ExprKind::Index { base, index } => self.element_place(*base, *index, expr.mark),
            _ => None,
        }
    }

    /// `base[index]`: the element address is computed into the base
    /// register.
    fn element_place(&mut self, base: ExprId, index: ExprId, mark: Mark) -> Option<Place> {
        let base = self.value(base);
        if is_error(&base) {
            return None;
        }
        let elem = match &base.ty {
            Type::Pointer(elem) | Type::Array(elem, _) => (**elem).clone(),
            other => {
                self.error(
                    mark,
                    format!("Cannot apply an indexer to a non-pointer type '{other}'"),
                );
                self.release(base.reg);
                return None;
            }
        };
        let size = self.ctx.size_of(&elem);
        if size == 0 {
            self.error(
                mark,
                format!("Cannot index a type with element size of zero, '{elem}'"),
            );
            self.release(base.reg);
            return None;
        }
        if let Some(constant) = self.arena().fold_int(index) {
            let offset = i64::from(constant) * i64::from(size);
            ins!(self, "addi {0}, {0}, {offset}", base.reg);
        } else {
            let index = self.value(index);
            if size != 1 {
                ins!(self, "muli {0}, {0}, {size}", index.reg);
            }
            ins!(self, "add {0}, {0}, {1}", base.reg, index.reg);
            self.release(index.reg);
        }
        Some(Place {
            base: base.reg,
            offset: 0,
            ty: elem,
        })
    }

    /// Load a register-literal place, or take the address of an aggregate
    /// one. The base register is reused unless it is the frame pointer.
    pub(super) fn read_place(&mut self, place: Place) -> Value {
        if place.ty.is_register_literal() {
            let dst = self.place_target(&place);
            ins!(self, "rd {dst}, {}, {}", place.base, place.offset);
            return Value::new(dst, place.ty);
        }
        let dst = self.place_address(&place);
        Value::new(dst, place.ty)
    }

    /// The address of a place, in a register.
    pub(super) fn place_address(&mut self, place: &Place) -> Reg {
        let dst = self.place_target(place);
        if dst != place.base || place.offset != 0 {
            ins!(self, "addi {dst}, {}, {}", place.base, place.offset);
        }
        dst
    }

    fn place_target(&mut self, place: &Place) -> Reg {
        if place.base == Reg::Frame {
            self.alloc()
        } else {
            place.base
        }
    }

    /// Write `value` into `place`, checking that the sizes agree, then
    /// release the place's base register.
    pub(super) fn store_place(&mut self, place: Place, value: &Value, mark: Mark) {
        if !is_error(value) {
            let want = self.ctx.size_of(&place.ty);
            let have = self.ctx.size_of(&value.ty);
            if want != have {
                self.error(
                    mark,
                    format!(
                        "Cannot assign a value of type '{}' to a variable of type '{}'",
                        value.ty, place.ty
                    ),
                );
            } else if place.ty.is_register_literal() {
                ins!(self, "wr {}, {}, {}", value.reg, place.base, place.offset);
            } else {
                self.copy_words(value.reg, place.base, place.offset, want);
            }
        }
        self.release(place.base);
    }

    /// Copy `words` words from the address in `src` to `dst + offset`.
    fn copy_words(&mut self, src: Reg, dst: Reg, offset: u32, words: u32) {
        let temp = self.alloc();
        for i in 0..words {
            ins!(self, "rd {temp}, {src}, {i}");
            ins!(self, "wr {temp}, {dst}, {}", offset + i);
        }
        self.release(temp);
    }

    /// `&target`: variables, methods and special registers have
    /// addresses; nothing else does.
    pub(super) fn address_of(&mut self, target: ExprId, mark: Mark) -> Value {
        let program = self.program;
        match &self.arena().expr(target).kind {
            ExprKind::Ident(name) => match self.binding(name) {
                Some(Binding::Local(slot)) => {
                    let reg = self.place_address(&Place::frame(&slot));
                    Value::new(reg, address_type(&slot.ty))
                }
                Some(Binding::Global {
                    offset,
                    ty,
                    is_const: false,
                }) => {
                    let place = self.global_place(offset, ty);
                    let reg = self.place_address(&place);
                    Value::new(reg, address_type(&place.ty))
                }
                Some(Binding::Constant(_) | Binding::Global { is_const: true, .. }) => {
                    self.error(mark, "Cannot take the address of a constant field");
                    Value::invalid()
                }
                None => match program.methods_named(name, self.item.file).next() {
                    Some((_, method)) => {
                        let reg = self.alloc();
                        ins!(self, "movi {reg}, {}", method_uid(method));
                        Value::new(reg, method_pointer_type(method))
                    }
                    None => {
                        self.error(mark, format!("Variable {name} not found"));
                        Value::invalid()
                    }
                },
            },
            ExprKind::Special(name) => {
                let reg = self.alloc();
                ins!(self, "movi {reg}, {name}");
                Value::new(reg, Type::Int.pointer_to())
            }
            _ => {
                self.error(
                    mark,
                    "Cannot take the address of anything other than a variable",
                );
                Value::invalid()
            }
        }
    }
}
