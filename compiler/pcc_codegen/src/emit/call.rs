//! Calls and the calling convention.
//!
//! The caller advances the frame pointer past its own frame, so the
//! callee's frame starts right after it. Arguments are written into the
//! callee's parameter slots, the return value is read from the callee's
//! `%retval` slot, and the frame pointer is moved back.
//!
//! A call through a plain name is resolved against the visible overloads
//! by exact parameter types; anything else must evaluate to a function
//! pointer.

use pcc_ir::{ExprId, ExprKind, FunctionPointer, Local, Mark, Method, Type, RETPTR, RETVAL};

use super::ins;
use super::method::MethodEmitter;
use super::place::{is_error, Place};
use crate::layout::Layout;
use crate::names::method_uid;
use crate::register::{Reg, Value};

/// The function-pointer type of `&method`.
pub(super) fn method_pointer_type(method: &Method) -> Type {
    Type::FunctionPointer(Box::new(FunctionPointer {
        ret: method.ret.clone(),
        name: method.name.clone(),
        params: method.params.iter().map(|p| p.ty.clone()).collect(),
        mark: method.mark,
    }))
}

/// A resolved call target.
struct Callee {
    /// Name used in diagnostics.
    name: String,
    target: Target,
    ret: Type,
    frame: Layout,
}

enum Target {
    Direct(String),
    Indirect(Reg),
}

impl MethodEmitter<'_, '_> {
    /// Lower a call. `as_value` is false for a call statement, where a
    /// `void` result is fine.
    pub(super) fn call(
        &mut self,
        callee: ExprId,
        args: &[ExprId],
        mark: Mark,
        as_value: bool,
    ) -> Value {
        let args: Vec<Value> = args.iter().map(|&arg| self.value(arg)).collect();
        let Some(callee) = self.resolve_callee(callee, &args, mark) else {
            self.release_values(&args);
            return Value::invalid();
        };
        if as_value && callee.ret.is_void() {
            self.error(
                mark,
                format!("Method {} returns void, cannot use it as a value", callee.name),
            );
        }

        let caller_size = self.frame.size();
        ins!(self, "addi r14, r14, {caller_size}");
        let params: Vec<Place> = callee.frame.slots().iter().skip(2).map(Place::frame).collect();
        for (param, arg) in params.into_iter().zip(&args) {
            self.store_place(param, arg, mark);
        }
        self.release_values(&args);
        match callee.target {
            Target::Direct(uid) => ins!(self, "call {uid}"),
            Target::Indirect(reg) => {
                ins!(self, "callr {reg}");
                self.release(reg);
            }
        }
        let result = match callee.frame.slot(RETVAL) {
            Some(slot) if !callee.ret.is_void() => self.read_place(Place::frame(slot)),
            _ => Value::invalid(),
        };
        ins!(self, "subi r14, r14, {caller_size}");
        result
    }

    fn release_values(&mut self, values: &[Value]) {
        for value in values {
            self.release(value.reg);
        }
    }

    fn resolve_callee(&mut self, callee: ExprId, args: &[Value], mark: Mark) -> Option<Callee> {
        let program = self.program;
        let arena = self.arena();
        if let ExprKind::Ident(name) = &arena.expr(callee).kind {
            let overload = program
                .methods_named(name, self.item.file)
                .filter(|(_, method)| {
                    method.params.len() == args.len()
                        && method.params.iter().zip(args).all(|(p, a)| p.ty == a.ty)
                })
                .last();
            if let Some((_, method)) = overload {
                let frame = self.ctx.frame(&method.locals(arena));
                return Some(Callee {
                    name: method.name.clone(),
                    target: Target::Direct(method_uid(method)),
                    ret: method.ret.clone(),
                    frame,
                });
            }
            if self.binding(name).is_none() {
                self.error(mark, format!("Method {name} not found"));
                return None;
            }
        }

        let name = arena.render_expr(callee);
        let pointer = self.value(callee);
        if is_error(&pointer) {
            return None;
        }
        let Type::FunctionPointer(fp) = &pointer.ty else {
            self.error(mark, format!("Method {name} not found"));
            self.release(pointer.reg);
            return None;
        };
        if fp.params.len() != args.len() {
            self.error(
                mark,
                format!(
                    "Function pointer expects {} arguments but {} were supplied",
                    fp.params.len(),
                    args.len()
                ),
            );
            self.release(pointer.reg);
            return None;
        }
        let mut locals = vec![
            Local {
                ty: fp.ret.clone(),
                name: RETVAL.to_string(),
            },
            Local {
                ty: Type::Int,
                name: RETPTR.to_string(),
            },
        ];
        locals.extend(fp.params.iter().enumerate().map(|(i, ty)| Local {
            ty: ty.clone(),
            name: format!("arg{i}"),
        }));
        let frame = self.ctx.frame(&locals);
        Some(Callee {
            name,
            target: Target::Indirect(pointer.reg),
            ret: fp.ret.clone(),
            frame,
        })
    }
}
