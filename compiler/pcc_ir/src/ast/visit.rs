//! Generic traversal.
//!
//! Every node reports its immediate children; [`Arena::descendants`] walks
//! a subtree in source order with an explicit stack, so arbitrarily deep
//! trees do not recurse on the native stack.

use smallvec::SmallVec;

use super::{Arena, ExprId, ExprKind, StmtId, StmtKind};

/// Either kind of AST node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Node {
    Expr(ExprId),
    Stmt(StmtId),
}

impl Arena {
    /// Immediate children of a node, in source order.
    pub fn children(&self, node: Node) -> SmallVec<[Node; 4]> {
        let mut out = SmallVec::new();
        match node {
            Node::Expr(id) => match &self.expr(id).kind {
                ExprKind::Unary { operand, .. } | ExprKind::Step { operand, .. } => {
                    out.push(Node::Expr(*operand));
                }
                ExprKind::Binary { left, right, .. } => {
                    out.push(Node::Expr(*left));
                    out.push(Node::Expr(*right));
                }
                ExprKind::Assign { target, value } => {
                    out.push(Node::Expr(*target));
                    out.push(Node::Expr(*value));
                }
                ExprKind::Cast { value, .. } => out.push(Node::Expr(*value)),
                ExprKind::Field { object, .. } => out.push(Node::Expr(*object)),
                ExprKind::Index { base, index } => {
                    out.push(Node::Expr(*base));
                    out.push(Node::Expr(*index));
                }
                ExprKind::Call { callee, args } => {
                    out.push(Node::Expr(*callee));
                    out.extend(args.iter().map(|a| Node::Expr(*a)));
                }
                ExprKind::Bool(_)
                | ExprKind::Int(_)
                | ExprKind::Float(_)
                | ExprKind::Str(_)
                | ExprKind::Null
                | ExprKind::Ident(_)
                | ExprKind::Special(_)
                | ExprKind::Sizeof(_)
                | ExprKind::Error => {}
            },
            Node::Stmt(id) => match &self.stmt(id).kind {
                StmtKind::Block(lines) => out.extend(lines.iter().map(|l| Node::Stmt(*l))),
                StmtKind::If {
                    cond,
                    then_branch,
                    else_branch,
                } => {
                    out.push(Node::Expr(*cond));
                    out.push(Node::Stmt(*then_branch));
                    if let Some(e) = else_branch {
                        out.push(Node::Stmt(*e));
                    }
                }
                StmtKind::While { cond, body } => {
                    out.push(Node::Expr(*cond));
                    out.push(Node::Stmt(*body));
                }
                StmtKind::For {
                    init,
                    cond,
                    step,
                    body,
                } => {
                    out.extend(init.map(Node::Stmt));
                    out.extend(cond.map(Node::Expr));
                    out.extend(step.map(Node::Expr));
                    out.push(Node::Stmt(*body));
                }
                StmtKind::Return(value) => out.extend(value.map(Node::Expr)),
                StmtKind::VarDecl { init, .. } => out.extend(init.map(Node::Expr)),
                StmtKind::Expr(value) => out.push(Node::Expr(*value)),
                StmtKind::Break | StmtKind::Continue | StmtKind::Asm(_) | StmtKind::Empty => {}
            },
        }
        out
    }

    /// `root` and everything below it, pre-order, in source order.
    pub fn descendants(&self, root: Node) -> Vec<Node> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    /// Every variable declaration below `root`, in source order.
    pub fn local_decls(&self, root: StmtId) -> Vec<StmtId> {
        self.descendants(Node::Stmt(root))
            .into_iter()
            .filter_map(|node| match node {
                Node::Stmt(id) if matches!(self.stmt(id).kind, StmtKind::VarDecl { .. }) => {
                    Some(id)
                }
                _ => None,
            })
            .collect()
    }

    /// Every string literal below `root`, in source order (duplicates kept).
    pub fn string_literals(&self, root: Node) -> Vec<&str> {
        self.descendants(root)
            .into_iter()
            .filter_map(|node| match node {
                Node::Expr(id) => match &self.expr(id).kind {
                    ExprKind::Str(s) => Some(s.as_str()),
                    _ => None,
                },
                Node::Stmt(_) => None,
            })
            .collect()
    }
}
