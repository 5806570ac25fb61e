//! ProgCom assembly emission.
//!
//! # Module Structure
//!
//! - `mod.rs`: whole-program emission, the `.data` and `.text` sections
//! - `method.rs`: per-method emitter state, prologue and epilogue
//! - `stmt.rs`: line lowering and control flow
//! - `expr.rs`: value lowering for literals, identifiers and casts
//! - `ops.rs`: arithmetic, comparisons, unary and step operators
//! - `place.rs`: assignable places (identifiers, fields, indexing, dereference)
//! - `call.rs`: overload resolution and the calling convention

mod call;
mod expr;
mod method;
mod ops;
mod place;
mod stmt;

use pcc_ir::{ItemKind, Node, Program};
use rustc_hash::FxHashSet;

use crate::context::CodegenContext;
use crate::names::string_label;
use crate::register::Reg;
use method::MethodEmitter;

/// Write one formatted instruction line through an emitter.
macro_rules! ins {
    ($emitter:expr, $($arg:tt)*) => {
        $emitter.ins(&format!($($arg)*))
    };
}
pub(crate) use ins;

/// Label of the block holding every non-constant global.
pub(crate) const GLOBALS_LABEL: &str = "__GLOBALS";

/// Emit the whole program: data section, then every method in
/// declaration order.
pub(crate) fn emit_program(ctx: &mut CodegenContext<'_>) {
    let program = ctx.program;
    emit_data(ctx);
    ctx.writeln(".text");
    for item in &program.items {
        match &item.kind {
            ItemKind::AsmInclude(include) => ctx.writeln(&format!("#include {}", include.path)),
            ItemKind::Method(method) => MethodEmitter::emit(ctx, item, method),
            ItemKind::Global(_) | ItemKind::Struct(_) => {}
        }
    }
}

fn emit_data(ctx: &mut CodegenContext<'_>) {
    let strings = string_literals(ctx.program);
    let words = ctx.global_words();
    if words == 0 && strings.is_empty() {
        return;
    }
    ctx.writeln(".data");
    ctx.writeln(&format!("{GLOBALS_LABEL}:"));
    if words > 0 {
        ctx.writeln(&format!("#allocate {words}"));
    }
    for content in strings {
        ctx.writeln(&format!("{}:", string_label(content)));
        let mut codes: Vec<String> = content.chars().map(|c| u32::from(c).to_string()).collect();
        codes.push("0".to_string());
        ctx.writeln(&codes.join(" "));
    }
}

/// Distinct string literals of global initializers and method bodies, in
/// order of first occurrence.
fn string_literals(program: &Program) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    let mut strings = Vec::new();
    for item in &program.items {
        let root = match &item.kind {
            ItemKind::Global(global) => global.init.map(Node::Expr),
            ItemKind::Method(method) => method.body.map(Node::Stmt),
            ItemKind::Struct(_) | ItemKind::AsmInclude(_) => None,
        };
        let Some(root) = root else { continue };
        for content in program.arena.string_literals(root) {
            if seen.insert(content) {
                strings.push(content);
            }
        }
    }
    strings
}

/// Instructions loading the constant `value` into `reg`.
///
/// Values within 16 bits of zero take one instruction; anything wider is
/// built from its high half and, when non-zero, its low half. Both halves
/// are printed unsigned.
pub(crate) fn int_load(reg: Reg, value: i32) -> Vec<String> {
    if (0..=0xFFFF).contains(&value) {
        return vec![format!("movi {reg}, {value}")];
    }
    if (-0xFFFF..0).contains(&value) {
        return vec![format!("subi {reg}, r0, {}", -value)];
    }
    let bits = value.cast_unsigned();
    let mut lines = vec![format!("movhi {reg}, {}", bits >> 16)];
    let low = bits & 0xFFFF;
    if low != 0 {
        lines.push(format!("ori {reg}, {reg}, {low}"));
    }
    lines
}

#[cfg(test)]
mod tests;
