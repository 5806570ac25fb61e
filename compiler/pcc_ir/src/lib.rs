//! Intermediate representation for the ProgCom C compiler.
//!
//! Everything the parser produces and the code generator consumes lives here:
//!
//! - [`Mark`] / [`FileId`]: positions inside a source file
//! - [`SourceMap`]: every file read during one compilation
//! - [`Arena`]: flat storage for value expressions ([`Expr`]) and lines ([`Stmt`])
//! - [`Type`]: type identifiers (`int`, `void`, pointers, arrays, function pointers, structs)
//! - [`Item`]: top-level declarations tagged with origin file and visibility
//! - [`Program`]: the flat declaration registry shared by all files of a compilation
//!
//! # Design
//!
//! The AST is a closed set of enums stored in an arena and addressed by
//! [`ExprId`] / [`StmtId`]. Traversals (folding, rendering, code generation)
//! are exhaustive `match`es over those enums.

pub mod ast;
mod item;
mod program;
mod source_map;
mod span;
mod ty;

pub use ast::{
    Arena, BinaryOp, Constant, Expr, ExprId, ExprKind, Node, StepOp, Stmt, StmtId, StmtKind,
    UnaryOp,
};
pub use item::{
    AsmInclude, FieldDecl, GlobalField, Item, ItemKind, Local, Method, Modifiers, Param,
    StructDef, RETPTR, RETVAL,
};
pub use program::{ItemId, Program};
pub use source_map::{SourceFile, SourceMap};
pub use span::{FileId, Mark};
pub use ty::{FunctionPointer, StructRef, Type};
