//! ProgCom assembly generation for ProgCom C.
//!
//! # Architecture
//!
//! ```text
//! Program (all files parsed)
//!        ↓
//!   Layouts::compute       (every struct laid out once)
//!        ↓
//!   global offsets         (non-constant globals packed into __GLOBALS)
//!        ↓
//!   emit_program           (.data, then each method in declaration order)
//!        ↓
//!   assembly text + diagnostics
//! ```
//!
//! Errors are reported into the caller's [`Diagnostics`] and never stop
//! generation. The text is only meaningful when no diagnostics were
//! reported; the driver discards it otherwise.

mod context;
mod emit;
mod layout;
mod names;
mod register;

pub use layout::{type_size, Layout, Layouts, Slot};
pub use names::{content_hash, method_uid, string_label};
pub use register::{Reg, RegisterFile, Value};

use pcc_diagnostic::Diagnostics;
use pcc_ir::Program;

use context::CodegenContext;

/// Generate assembly for a whole program.
#[tracing::instrument(level = "debug", skip_all, fields(items = program.items.len()))]
pub fn generate(program: &Program, diagnostics: &mut Diagnostics) -> String {
    let mut ctx = CodegenContext::new(program, diagnostics);
    emit::emit_program(&mut ctx);
    ctx.take_output()
}

#[cfg(test)]
mod tests;
