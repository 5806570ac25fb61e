//! Line (statement) parsing.
//!
//! Dispatch is by leading token: a block, one of the keyword statements,
//! then a variable declaration, then a statement-shaped expression, then
//! an empty `;`. Whether `break`/`continue` sit inside a loop and whether
//! types exist is checked later by the code generator.

use pcc_ir::{ExprId, Mark, StmtId, StmtKind, Type};
use pcc_stack::ensure_sufficient_stack;

use crate::Parser;

const CONDITION_STOPS: &[&str] = &[";", "}", "{"];
const CLAUSE_STOPS: &[&str] = &[";", "}"];

impl Parser<'_> {
    /// Parse one line. `None` when nothing here starts a statement.
    pub(crate) fn parse_line(&mut self) -> Option<StmtId> {
        ensure_sufficient_stack(|| self.parse_line_inner())
    }

    fn parse_line_inner(&mut self) -> Option<StmtId> {
        let mark = self.mark();
        if self.eat("{") {
            return Some(self.parse_block_rest(mark));
        }
        if self.eat_keyword("if") {
            return Some(self.parse_if_rest(mark));
        }
        if self.eat_keyword("while") {
            let cond = self.parse_condition();
            let body = self.parse_body();
            return Some(self.alloc_stmt(StmtKind::While { cond, body }, mark));
        }
        if self.eat_keyword("for") {
            return Some(self.parse_for_rest(mark));
        }
        if self.eat_keyword("return") {
            return Some(self.parse_return_rest(mark));
        }
        if self.eat_keyword("break") {
            self.expect_semicolon();
            return Some(self.alloc_stmt(StmtKind::Break, mark));
        }
        if self.eat_keyword("continue") {
            self.expect_semicolon();
            return Some(self.alloc_stmt(StmtKind::Continue, mark));
        }
        if self.eat_keyword("asm") {
            return Some(self.parse_asm_rest(mark));
        }
        if let Some(decl) = self.try_parse(Self::parse_var_decl) {
            return Some(decl);
        }
        if let Some(value) = self.parse_expr() {
            self.expect_semicolon();
            if self.check_statement(value, mark) {
                return Some(self.alloc_stmt(StmtKind::Expr(value), mark));
            }
            return Some(self.alloc_stmt(StmtKind::Empty, mark));
        }
        if self.eat(";") {
            return Some(self.alloc_stmt(StmtKind::Empty, mark));
        }
        None
    }

    /// Whether `value` may stand alone as a line. Reports it otherwise,
    /// unless recovery already did.
    fn check_statement(&mut self, value: ExprId, mark: Mark) -> bool {
        let kind = &self.arena.expr(value).kind;
        if kind.is_statement() {
            return true;
        }
        if !matches!(kind, pcc_ir::ExprKind::Error) {
            self.cursor.error_at(mark, "Line is not a valid statement");
        }
        false
    }

    fn expect_semicolon(&mut self) {
        if !self.eat(";") {
            self.cursor.error("Expected semicolon", true, &[";"]);
        }
    }

    /// Lines up to the closing `}`.
    fn parse_block_rest(&mut self, mark: Mark) -> StmtId {
        let mut lines = Vec::new();
        while let Some(line) = self.parse_line() {
            lines.push(line);
        }
        if !self.eat("}") {
            self.cursor.error("Expected closing brace", true, &["}"]);
        }
        self.alloc_stmt(StmtKind::Block(lines), mark)
    }

    /// `( value )` after `if` / `while`.
    fn parse_condition(&mut self) -> ExprId {
        if !self.eat("(") {
            self.cursor
                .error("Expected opening parentheses", false, CONDITION_STOPS);
        }
        let cond = self.parse_expr();
        if cond.is_none() || !self.eat(")") {
            self.cursor
                .error("Expected closing parentheses", false, CONDITION_STOPS);
        }
        match cond {
            Some(cond) => cond,
            None => self.error_expr(),
        }
    }

    /// The statement controlled by `if`, `else`, `while` or `for`.
    fn parse_body(&mut self) -> StmtId {
        if let Some(body) = self.parse_line() {
            return body;
        }
        let mark = self.mark();
        self.cursor
            .error("Expected statement or statement body", false, &[]);
        self.alloc_stmt(StmtKind::Empty, mark)
    }

    fn parse_if_rest(&mut self, mark: Mark) -> StmtId {
        let cond = self.parse_condition();
        let then_branch = self.parse_body();
        let else_branch = if self.eat_keyword("else") {
            Some(self.parse_body())
        } else {
            None
        };
        self.alloc_stmt(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            mark,
        )
    }

    /// `( init cond ; step ) body`. The init clause is a full line and
    /// brings its own `;`.
    fn parse_for_rest(&mut self, mark: Mark) -> StmtId {
        if !self.eat("(") {
            self.cursor
                .error("Expected opening parentheses", false, CLAUSE_STOPS);
            let body = self.alloc_stmt(StmtKind::Empty, mark);
            return self.alloc_stmt(
                StmtKind::For {
                    init: None,
                    cond: None,
                    step: None,
                    body,
                },
                mark,
            );
        }
        let init = self.parse_line();
        let cond = self.parse_expr();
        if !self.eat(";") {
            self.cursor.error("Expected semicolon", false, &[]);
        }
        let step_mark = self.mark();
        let step = self.parse_expr().filter(|&step| self.check_statement(step, step_mark));
        let body = if self.eat(")") {
            self.parse_body()
        } else {
            self.cursor
                .error("Expected closing parentheses", false, CLAUSE_STOPS);
            self.alloc_stmt(StmtKind::Empty, mark)
        };
        self.alloc_stmt(
            StmtKind::For {
                init,
                cond,
                step,
                body,
            },
            mark,
        )
    }

    fn parse_return_rest(&mut self, mark: Mark) -> StmtId {
        if self.eat(";") {
            return self.alloc_stmt(StmtKind::Return(None), mark);
        }
        let value = self.parse_expr();
        if (value.is_none() || !self.eat(";"))
            && self.cursor.error("Expected semicolon", false, CLAUSE_STOPS) == Some(";")
        {
            self.eat(";");
        }
        self.alloc_stmt(StmtKind::Return(value), mark)
    }

    /// `asm { text }`. The text is kept verbatim; `\}` stands for `}`.
    fn parse_asm_rest(&mut self, mark: Mark) -> StmtId {
        if !self.cursor.take_if('{')
            && self.cursor.error("Expected opening brace", true, &["{", "}"]) != Some("{")
        {
            return self.alloc_stmt(StmtKind::Empty, mark);
        }
        let mut text = String::new();
        loop {
            if !self.cursor.has_remaining() {
                self.cursor.error("Unexpected end of file", false, &[]);
                break;
            }
            match self.cursor.bump() {
                '}' => break,
                '\\' if self.cursor.peek() == '}' => text.push(self.cursor.bump()),
                c => text.push(c),
            }
        }
        self.cursor.skip_whitespace();
        self.alloc_stmt(StmtKind::Asm(text), mark)
    }

    /// A variable declaration line, tried speculatively by `parse_line`.
    fn parse_var_decl(&mut self) -> Option<StmtId> {
        let mark = self.mark();
        let (ty, name, init) = self.parse_declaration()?;
        Some(self.alloc_stmt(StmtKind::VarDecl { ty, name, init }, mark))
    }

    /// `Type name ;`, `Type name [ size ] ;` or `Type name = value ;`.
    ///
    /// Returns `None` (and the caller rewinds) when the text is not a
    /// declaration.
    pub(crate) fn parse_declaration(&mut self) -> Option<(Type, String, Option<ExprId>)> {
        let (ty, name) = self.parse_typed_name()?;
        if self.eat(";") {
            return Some((ty, name, None));
        }
        if self.eat("[") {
            let size_mark = self.mark();
            let size = self
                .parse_expr()
                .and_then(|size| self.arena.fold_int(size))
                .and_then(|size| u32::try_from(size).ok());
            if size.is_none() {
                self.cursor.error_at(size_mark, "Array size must be constant");
            }
            if !self.eat("]") {
                return None;
            }
            self.expect_semicolon();
            return Some((Type::Array(Box::new(ty), size.unwrap_or(0)), name, None));
        }
        if !self.match_assign_op() {
            return None;
        }
        let value = self.parse_expr()?;
        if !self.eat(";") {
            return None;
        }
        Some((ty, name, Some(value)))
    }

    /// A type followed by a variable name. A function-pointer declarator
    /// already carries the name.
    pub(crate) fn parse_typed_name(&mut self) -> Option<(Type, String)> {
        let ty = self.parse_type()?;
        let name = match ty.variable_name() {
            Some(name) => name.to_string(),
            None => self.cursor.take_ident()?,
        };
        Some((ty, name))
    }
}
