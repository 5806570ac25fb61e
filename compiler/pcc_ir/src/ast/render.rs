//! Re-rendering nodes to source text.
//!
//! The code generator writes the rendered source of each statement as an
//! assembly comment. Binary and unary operations are fully parenthesized,
//! so the rendering is unambiguous rather than minimal.

use std::fmt::{self, Write};

use super::{Arena, ExprId, ExprKind, StmtId, StmtKind};

impl Arena {
    /// Render an expression back to source text.
    pub fn render_expr(&self, id: ExprId) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_expr(&mut out, id);
        out
    }

    /// Render a statement back to source text, on one line.
    pub fn render_stmt(&self, id: StmtId) -> String {
        let mut out = String::new();
        let _ = self.write_stmt(&mut out, id);
        out
    }

    fn write_expr(&self, out: &mut String, id: ExprId) -> fmt::Result {
        match &self.expr(id).kind {
            ExprKind::Bool(b) => write!(out, "{b}"),
            ExprKind::Int(v) => write!(out, "{v}"),
            ExprKind::Float(v) => write!(out, "{v}"),
            ExprKind::Str(s) => write_string_literal(out, s),
            ExprKind::Null => out.write_str("null"),
            ExprKind::Ident(name) => out.write_str(name),
            ExprKind::Special(name) => write!(out, "${name}"),
            ExprKind::Sizeof(ty) => write!(out, "sizeof({ty})"),
            ExprKind::Unary { op, operand } => {
                write!(out, "({}", op.as_symbol())?;
                self.write_expr(out, *operand)?;
                out.write_char(')')
            }
            ExprKind::Step { op, operand } => {
                if op.is_prefix() {
                    out.write_str(op.as_symbol())?;
                    self.write_expr(out, *operand)
                } else {
                    self.write_expr(out, *operand)?;
                    out.write_str(op.as_symbol())
                }
            }
            ExprKind::Binary { op, left, right } => {
                out.write_char('(')?;
                self.write_expr(out, *left)?;
                write!(out, " {} ", op.as_symbol())?;
                self.write_expr(out, *right)?;
                out.write_char(')')
            }
            ExprKind::Assign { target, value } => {
                self.write_expr(out, *target)?;
                out.write_str(" = ")?;
                self.write_expr(out, *value)
            }
            ExprKind::Cast { ty, value } => {
                write!(out, "({ty})")?;
                self.write_expr(out, *value)
            }
            ExprKind::Field { object, field } => {
                self.write_expr(out, *object)?;
                write!(out, ".{field}")
            }
            ExprKind::Index { base, index } => {
                self.write_expr(out, *base)?;
                out.write_char('[')?;
                self.write_expr(out, *index)?;
                out.write_char(']')
            }
            ExprKind::Call { callee, args } => {
                self.write_expr(out, *callee)?;
                out.write_char('(')?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    self.write_expr(out, *arg)?;
                }
                out.write_char(')')
            }
            ExprKind::Error => out.write_str("<error>"),
        }
    }

    fn write_stmt(&self, out: &mut String, id: StmtId) -> fmt::Result {
        match &self.stmt(id).kind {
            StmtKind::Block(lines) => {
                out.write_char('{')?;
                for line in lines {
                    out.write_char(' ')?;
                    self.write_stmt(out, *line)?;
                }
                out.write_str(" }")
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                out.write_str("if (")?;
                self.write_expr(out, *cond)?;
                out.write_str(") ")?;
                self.write_stmt(out, *then_branch)?;
                if let Some(else_branch) = else_branch {
                    out.write_str(" else ")?;
                    self.write_stmt(out, *else_branch)?;
                }
                Ok(())
            }
            StmtKind::While { cond, body } => {
                out.write_str("while (")?;
                self.write_expr(out, *cond)?;
                out.write_str(") ")?;
                self.write_stmt(out, *body)
            }
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                out.write_str("for (")?;
                self.write_for_header(out, *init, *cond, *step)?;
                out.write_str(") ")?;
                self.write_stmt(out, *body)
            }
            StmtKind::Break => out.write_str("break;"),
            StmtKind::Continue => out.write_str("continue;"),
            StmtKind::Return(None) => out.write_str("return;"),
            StmtKind::Return(Some(value)) => {
                out.write_str("return ")?;
                self.write_expr(out, *value)?;
                out.write_char(';')
            }
            StmtKind::VarDecl { ty, name, init } => {
                if ty.variable_name().is_some() {
                    write!(out, "{ty}")?;
                } else {
                    write!(out, "{ty} {name}")?;
                }
                if let Some(init) = init {
                    out.write_str(" = ")?;
                    self.write_expr(out, *init)?;
                }
                out.write_char(';')
            }
            StmtKind::Asm(text) => write!(out, "asm {{{text}}}"),
            StmtKind::Empty => out.write_char(';'),
            StmtKind::Expr(value) => {
                self.write_expr(out, *value)?;
                out.write_char(';')
            }
        }
    }

    /// Render the parenthesized part of a `for` header: `init cond; step`.
    ///
    /// The init statement carries its own `;`.
    pub fn render_for_header(
        &self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
    ) -> String {
        let mut out = String::new();
        let _ = self.write_for_header(&mut out, init, cond, step);
        out
    }

    fn write_for_header(
        &self,
        out: &mut String,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
    ) -> fmt::Result {
        if let Some(init) = init {
            self.write_stmt(out, init)?;
        }
        out.write_char(' ')?;
        if let Some(cond) = cond {
            self.write_expr(out, cond)?;
        }
        out.write_str("; ")?;
        if let Some(step) = step {
            self.write_expr(out, step)?;
        }
        Ok(())
    }
}

fn write_string_literal(out: &mut String, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{7}' => out.write_str("\\a")?,
            '\u{8}' => out.write_str("\\b")?,
            '\u{b}' => out.write_str("\\v")?,
            '\u{c}' => out.write_str("\\f")?,
            other => out.write_char(other)?,
        }
    }
    out.write_char('"')
}
