//! Line lowering and control flow.

use pcc_ir::{ExprId, ExprKind, Mark, StmtId, StmtKind, Type};
use pcc_stack::ensure_sufficient_stack;

use super::ins;
use super::method::{MethodEmitter, Scope};

impl MethodEmitter<'_, '_> {
    /// Lower one line. Each line is preceded by a comment with its source.
    pub(super) fn line(&mut self, id: StmtId) {
        ensure_sufficient_stack(|| self.line_inner(id));
    }

    fn line_inner(&mut self, id: StmtId) {
        let arena = self.arena();
        let stmt = arena.stmt(id);
        match &stmt.kind {
            StmtKind::Block(lines) => {
                self.comment("{");
                for &line in lines {
                    self.line(line);
                    self.finish_line(arena.stmt(line).mark);
                }
                self.comment("}");
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.lower_if(*cond, *then_branch, *else_branch),
            StmtKind::While { cond, body } => self.lower_while(*cond, *body),
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                let header = arena.render_for_header(*init, *cond, *step);
                self.comment(&format!("for ({header})"));
                self.lower_for(*init, *cond, *step, *body);
            }
            StmtKind::Break => self.lower_jump(stmt.mark, true),
            StmtKind::Continue => self.lower_jump(stmt.mark, false),
            StmtKind::Return(value) => self.lower_return(*value),
            StmtKind::VarDecl { ty, name, init } => {
                match ty {
                    Type::FunctionPointer(_) => self.comment(&ty.to_string()),
                    _ => self.comment(&format!("{ty} {name}")),
                }
                if let Some(init) = init {
                    let value = self.value(*init);
                    self.assign_ident(name, stmt.mark, &value);
                    self.release(value.reg);
                }
            }
            StmtKind::Asm(text) => {
                self.comment("Begin inline asm");
                self.ins(text);
                self.comment("End inline asm");
            }
            StmtKind::Empty => {}
            StmtKind::Expr(value) => {
                self.comment(&arena.render_expr(*value));
                let expr = arena.expr(*value);
                let result = match &expr.kind {
                    ExprKind::Call { callee, args } => self.call(*callee, args, expr.mark, false),
                    _ => self.value(*value),
                };
                self.release(result.reg);
            }
        }
    }

    /// A constant condition keeps only the branch that runs.
    fn lower_if(&mut self, cond: ExprId, then_branch: StmtId, else_branch: Option<StmtId>) {
        let arena = self.arena();
        if let Some(constant) = arena.fold_int(cond) {
            if constant != 0 {
                self.line(then_branch);
            } else if let Some(else_branch) = else_branch {
                self.line(else_branch);
            }
            return;
        }
        self.comment(&format!("if ({})", arena.render_expr(cond)));
        let value = self.value(cond);
        let Some(else_branch) = else_branch else {
            let end = self.ctx.fresh_label();
            let zero = self.alloc();
            ins!(self, "movi {zero}, 0");
            ins!(self, "beq {}, {zero}, {end}", value.reg);
            self.release(zero);
            self.release(value.reg);
            self.line(then_branch);
            self.label(&end);
            return;
        };

        // The else branch falls through from the test; the then branch
        // is jumped to.
        let then_label = self.ctx.fresh_label();
        ins!(self, "bi {}, {then_label}", value.reg);
        self.release(value.reg);
        self.comment("else");
        self.line(else_branch);
        let end = if arena.returns(else_branch) {
            None
        } else {
            let end = self.ctx.fresh_label();
            ins!(self, "jmp {end}");
            Some(end)
        };
        self.comment("then");
        self.label(&then_label);
        self.line(then_branch);
        if let Some(end) = end {
            self.label(&end);
        }
    }

    /// The condition is tested at the bottom of the loop. A constant
    /// zero condition drops the loop; a constant non-zero one drops the
    /// test.
    fn lower_while(&mut self, cond: ExprId, body: StmtId) {
        let arena = self.arena();
        let header = format!("while ({})", arena.render_expr(cond));
        match arena.fold_int(cond) {
            Some(0) => {}
            Some(_) => {
                self.comment(&header);
                let top = self.ctx.fresh_label();
                self.label(&top);
                self.scopes.push(Scope::While {
                    cont: top.clone(),
                    end: None,
                });
                self.line(body);
                ins!(self, "jmp {top}");
                self.close_while();
            }
            None => {
                let begin = self.ctx.fresh_label();
                let test = self.ctx.fresh_label();
                self.comment("(goto while condition)");
                ins!(self, "jmp {test}");
                self.label(&begin);
                self.scopes.push(Scope::While {
                    cont: test.clone(),
                    end: None,
                });
                self.line(body);
                self.comment(&header);
                self.label(&test);
                let value = self.value(cond);
                ins!(self, "bi {}, {begin}", value.reg);
                self.release(value.reg);
                self.close_while();
            }
        }
    }

    /// Pop the innermost `while` and place its end label if a `break`
    /// asked for one.
    fn close_while(&mut self) {
        if let Some(Scope::While { end: Some(end), .. }) = self.scopes.pop() {
            self.label(&end);
        }
    }

    fn lower_for(
        &mut self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
    ) {
        let arena = self.arena();
        if let Some(init) = init {
            self.line(init);
            self.finish_line(arena.stmt(init).mark);
        }
        let begin = self.ctx.fresh_label();
        let test = self.ctx.fresh_label();
        ins!(self, "jmp {test}");
        self.label(&begin);
        self.scopes.push(Scope::For);
        self.line(body);
        self.scopes.pop();
        if let Some(step) = step {
            self.comment(&arena.render_expr(step));
            let value = self.value(step);
            self.release(value.reg);
        }
        self.label(&test);
        match cond {
            Some(cond) => {
                self.comment(&arena.render_expr(cond));
                let value = self.value(cond);
                ins!(self, "bi {}, {begin}", value.reg);
                self.release(value.reg);
            }
            None => ins!(self, "jmp {begin}"),
        }
    }

    /// `break` / `continue`: only `while` loops are jump targets; `for`
    /// scopes are passed over.
    fn lower_jump(&mut self, mark: Mark, is_break: bool) {
        let keyword = if is_break { "Break" } else { "Continue" };
        let ctx = &mut *self.ctx;
        let target = self.scopes.iter_mut().rev().find_map(|scope| match scope {
            Scope::While { end, .. } if is_break => {
                Some(end.get_or_insert_with(|| ctx.fresh_label()).clone())
            }
            Scope::While { cont, .. } => Some(cont.clone()),
            Scope::For => None,
        });
        let Some(target) = target else {
            self.error(
                mark,
                format!("{keyword} statement not valid, no enclosing while loop"),
            );
            return;
        };
        self.comment(if is_break { "break" } else { "continue" });
        ins!(self, "jmp {target}");
    }
}
