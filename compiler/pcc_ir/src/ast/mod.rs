//! Flat AST.
//!
//! Value expressions and lines (statements) are stored in one [`Arena`] per
//! compilation and referenced by [`ExprId`] / [`StmtId`]. All files of a
//! compilation allocate into the same arena, so ids are unique across files.
//!
//! # Module Structure
//!
//! - `mod.rs`: node kinds and the arena
//! - `operators.rs`: binary, unary and step operators
//! - `fold.rs`: constant folding
//! - `render.rs`: re-rendering nodes to source text
//! - `visit.rs`: child lists and generic traversal

mod fold;
mod operators;
mod render;
mod visit;

pub use fold::Constant;
pub use operators::{BinaryOp, StepOp, UnaryOp};
pub use visit::Node;

use crate::{Mark, Type};

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the statement arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A value expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub mark: Mark,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Bool(bool),
    Int(i32),
    /// Parsed so that it can be rejected with a precise message.
    Float(f64),
    Str(String),
    Null,
    Ident(String),
    /// `$name`: a memory-mapped special register.
    Special(String),
    Sizeof(Type),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Step {
        op: StepOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Assign {
        target: ExprId,
        value: ExprId,
    },
    Cast {
        ty: Type,
        value: ExprId,
    },
    /// `object.field`. `p->f` is parsed as `(*p).f`.
    Field {
        object: ExprId,
        field: String,
    },
    Index {
        base: ExprId,
        index: ExprId,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    /// Placeholder left behind by syntax error recovery.
    Error,
}

impl ExprKind {
    /// Expressions that may stand alone as a statement.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            ExprKind::Assign { .. } | ExprKind::Call { .. } | ExprKind::Step { .. }
        )
    }
}

/// A line: one statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub mark: Mark,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Block(Vec<StmtId>),
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
    },
    Break,
    Continue,
    Return(Option<ExprId>),
    VarDecl {
        ty: Type,
        name: String,
        init: Option<ExprId>,
    },
    /// Verbatim assembly text.
    Asm(String),
    Empty,
    /// A statement-shaped expression: assignment, call, or step.
    Expr(ExprId),
}

/// Arena holding every expression and statement of a compilation.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, return its id.
    #[inline]
    pub fn alloc_expr(&mut self, kind: ExprKind, mark: Mark) -> ExprId {
        let id = ExprId(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(Expr { kind, mark });
        id
    }

    /// Allocate a statement, return its id.
    #[inline]
    pub fn alloc_stmt(&mut self, kind: StmtKind, mark: Mark) -> StmtId {
        let id = StmtId(u32::try_from(self.stmts.len()).unwrap_or(u32::MAX));
        self.stmts.push(Stmt { kind, mark });
        id
    }

    /// Get expression by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get statement by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Whether control never falls off the end of `id`.
    ///
    /// An `if` only returns when both branches exist and return; a `while`
    /// only when its condition is a non-zero constant and its body returns.
    pub fn returns(&self, id: StmtId) -> bool {
        match &self.stmt(id).kind {
            StmtKind::Block(lines) => lines.iter().any(|&line| self.returns(line)),
            StmtKind::If {
                then_branch,
                else_branch: Some(else_branch),
                ..
            } => self.returns(*then_branch) && self.returns(*else_branch),
            StmtKind::While { cond, body } => {
                matches!(self.fold_int(*cond), Some(c) if c != 0) && self.returns(*body)
            }
            StmtKind::For { body, .. } => self.returns(*body),
            StmtKind::Return(_) => true,
            _ => false,
        }
    }
}
