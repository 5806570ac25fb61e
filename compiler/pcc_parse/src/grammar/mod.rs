//! Grammar productions.
//!
//! Each module extends `Parser` with the methods for one part of the
//! language:
//!
//! - `expr`: value expressions, by precedence level
//! - `stmt`: lines (statements)
//! - `ty`: type identifiers, including function-pointer declarators
//! - `item`: global fields, struct definitions and methods

mod expr;
mod item;
mod stmt;
mod ty;
