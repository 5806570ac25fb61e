//! Per-method emission state, prologue and epilogue.

use pcc_ir::{Arena, ExprId, Item, Mark, Method, Program, Type, RETPTR, RETVAL};

use super::{ins, int_load, place::Place, GLOBALS_LABEL};
use crate::context::CodegenContext;
use crate::layout::Layout;
use crate::names::method_uid;
use crate::register::{Reg, RegisterFile, Value};

/// An enclosing loop, innermost last.
pub(super) enum Scope {
    /// `cont` is where `continue` jumps; `end` is created by the first
    /// `break` that needs it.
    While { cont: String, end: Option<String> },
    For,
}

/// Emission state for one method body.
pub(super) struct MethodEmitter<'c, 'a> {
    pub(super) ctx: &'c mut CodegenContext<'a>,
    pub(super) program: &'a Program,
    pub(super) item: &'a Item,
    pub(super) method: &'a Method,
    /// Layout of the locals struct.
    pub(super) frame: Layout,
    pub(super) registers: RegisterFile,
    pub(super) scopes: Vec<Scope>,
}

impl<'c, 'a> MethodEmitter<'c, 'a> {
    /// Check a method declaration and emit its body when it has one.
    #[tracing::instrument(level = "debug", skip_all, fields(method = %method.name))]
    pub(super) fn emit(ctx: &'c mut CodegenContext<'a>, item: &'a Item, method: &'a Method) {
        let program = ctx.program;
        let mark = method.mark;
        if method.is_main() {
            if item.is_extern() {
                ctx.reporter.semantic(mark, "Main method cannot be extern");
            }
            if !method.ret.is_void() {
                ctx.reporter
                    .semantic(mark, "Main method must have a 'void' return type");
            }
            if !item.is_public() {
                ctx.reporter
                    .semantic(mark, "Main method must be declared with 'public'");
            }
        }
        let body = match (item.is_extern(), method.body) {
            (false, Some(body)) => body,
            (true, None) => return,
            (true, Some(_)) => {
                ctx.reporter.semantic(mark, "Extern methods cannot declare a body");
                return;
            }
            (false, None) => {
                ctx.reporter
                    .semantic(mark, "Methods not marked with extern must declare a body");
                return;
            }
        };
        let duplicates = method.duplicate_locals(&program.arena);
        if !duplicates.is_empty() {
            ctx.reporter.semantic(
                mark,
                format!(
                    "Method '{}' contains duplicate field definitions {}",
                    method.name,
                    duplicates.join(", ")
                ),
            );
        }

        let frame = ctx.frame(&method.locals(&program.arena));
        tracing::debug!(frame = frame.size(), "method frame");
        let mut emitter = MethodEmitter {
            ctx,
            program,
            item,
            method,
            frame,
            registers: RegisterFile::new(),
            scopes: Vec::new(),
        };
        emitter.emit_header();
        emitter.ctx.indent();
        emitter.emit_prologue();
        emitter.line(body);
        if !program.arena.returns(body) {
            if !method.ret.is_void() {
                emitter.error(mark, format!("Method {} does not return a value", method.name));
            }
            emitter.lower_return(None);
        }
        if emitter.registers.allocated() > 0 {
            emitter
                .ctx
                .reporter
                .internal(mark, "Internal error: Allocated registers at end of method");
            emitter.registers.clear();
        }
        emitter.ctx.dedent();
    }

    fn emit_header(&mut self) {
        let params: Vec<String> = self
            .method
            .params
            .iter()
            .map(|param| match param.ty {
                Type::FunctionPointer(_) => param.ty.to_string(),
                _ => format!("{} {}", param.ty, param.name),
            })
            .collect();
        let visibility = if self.item.is_public() { "public" } else { "private" };
        self.ctx.comment(&format!(
            "{visibility} {} {}({})",
            self.method.ret,
            self.method.name,
            params.join(", ")
        ));
        let uid = method_uid(self.method);
        if self.item.is_public() {
            self.ctx.writeln(&format!("#global {uid}"));
        }
        self.ctx.writeln(&format!("{uid}:"));
    }

    /// `main` initializes globals; every other method saves its return
    /// address.
    fn emit_prologue(&mut self) {
        if self.method.is_main() {
            self.emit_global_init();
            return;
        }
        self.comment(&format!("{RETPTR} = r15"));
        if let Some(slot) = self.frame.slot(RETPTR) {
            ins!(self, "wr r15, r14, {}", slot.offset);
        }
    }

    fn emit_global_init(&mut self) {
        let program = self.program;
        let mut started = false;
        for (id, global) in program.globals() {
            let Some(init) = global.init else { continue };
            let Some(offset) = self.ctx.global_offset(id) else {
                continue;
            };
            if !started {
                self.comment("Global field initialization");
                started = true;
            }
            self.comment(&format!(
                "{} = {}",
                global.name,
                program.arena.render_expr(init)
            ));
            let value = self.value(init);
            let place = self.global_place(offset, global.ty.clone());
            self.store_place(place, &value, global.mark);
            self.release(value.reg);
            self.finish_line(global.mark);
        }
        if started {
            self.comment("Finish global field initialization");
        }
    }

    /// `return [value];`. Non-main methods store the value in the return
    /// slot and jump to the saved return address; `main` halts.
    pub(super) fn lower_return(&mut self, value: Option<ExprId>) {
        let arena = self.arena();
        match value {
            Some(value) => self.comment(&format!("return {}", arena.render_expr(value))),
            None => self.comment("return"),
        }
        if self.method.is_main() {
            self.ins("halt");
            return;
        }
        if let Some(value) = value {
            let result = self.value(value);
            if let Some(slot) = self.frame.slot(RETVAL).cloned() {
                let mark = arena.expr(value).mark;
                self.store_place(Place::frame(&slot), &result, mark);
            }
            self.release(result.reg);
        }
        if let Some(offset) = self.frame.slot(RETPTR).map(|slot| slot.offset) {
            let target = self.alloc();
            ins!(self, "rd {target}, r14, {offset}");
            ins!(self, "jmpr {target}");
            self.release(target);
        }
    }

    pub(super) fn arena(&self) -> &'a Arena {
        &self.program.arena
    }

    pub(super) fn error(&mut self, mark: Mark, message: impl Into<String>) {
        self.ctx.reporter.semantic(mark, message);
    }

    /// Take a free register. Exhaustion is reported and yields the
    /// invalid register so emission can continue.
    pub(super) fn alloc(&mut self) -> Reg {
        if let Some(reg) = self.registers.allocate() {
            return reg;
        }
        self.ctx.reporter.semantic(
            self.method.mark,
            "Out of registers, expression was probably too big",
        );
        Reg::Invalid
    }

    pub(super) fn release(&mut self, reg: Reg) {
        self.registers.free(reg);
    }

    /// Every line must leave no register allocated.
    pub(super) fn finish_line(&mut self, mark: Mark) {
        if self.registers.allocated() > 0 {
            self.ctx
                .reporter
                .internal(mark, "Line had remaining registers allocated");
            self.registers.clear();
        }
    }

    /// Load a constant into a fresh register.
    pub(super) fn load_int(&mut self, value: i32) -> Value {
        let reg = self.alloc();
        for line in int_load(reg, value) {
            self.ins(&line);
        }
        Value::new(reg, Type::Int)
    }

    /// Load the address of `__GLOBALS` into a fresh register.
    pub(super) fn globals_base(&mut self) -> Reg {
        let reg = self.alloc();
        ins!(self, "movi {reg}, {GLOBALS_LABEL}");
        reg
    }

    pub(super) fn ins(&mut self, line: &str) {
        self.ctx.writeln(line);
    }

    pub(super) fn comment(&mut self, text: &str) {
        self.ctx.comment(text);
    }

    pub(super) fn label(&mut self, name: &str) {
        self.ctx.writeln(&format!("{name}:"));
    }
}
