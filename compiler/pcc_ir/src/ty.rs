//! Type identifiers.
//!
//! Types are small owned trees. Struct types are only names at this level;
//! resolving a name to a definition (and a size) needs the declaration
//! registry and happens in the code generator's layout pass.
//!
//! Every scalar (int, pointer, function pointer) occupies one target word
//! and fits in a register ("register literal"). Arrays and structs are
//! aggregates handled by address.

use std::fmt;

use crate::Mark;

/// A reference to a struct by name.
///
/// The mark records where the name was written; its file decides which
/// struct declarations are visible when the name is resolved.
#[derive(Clone, Debug)]
pub struct StructRef {
    pub name: String,
    pub mark: Mark,
}

/// `ret (*name)(params...)`.
///
/// The declarator name is part of the syntax (`int (*f)(int) = ...`) and is
/// rendered, but ignored by type equality.
#[derive(Clone, Debug)]
pub struct FunctionPointer {
    pub ret: Type,
    pub name: String,
    pub params: Vec<Type>,
    pub mark: Mark,
}

#[derive(Clone, Debug)]
pub enum Type {
    Int,
    Void,
    Pointer(Box<Type>),
    /// Element type and constant length. Only produced by variable
    /// declarations with a `[N]` suffix.
    Array(Box<Type>, u32),
    FunctionPointer(Box<FunctionPointer>),
    Struct(StructRef),
}

impl Type {
    /// `T*`.
    #[must_use]
    pub fn pointer_to(self) -> Type {
        Type::Pointer(Box::new(self))
    }

    /// `void*`, the type of `null`.
    pub fn void_pointer() -> Type {
        Type::Void.pointer_to()
    }

    /// Whether values of this type live directly in one register.
    pub fn is_register_literal(&self) -> bool {
        match self {
            Type::Int | Type::Pointer(_) | Type::FunctionPointer(_) => true,
            Type::Void | Type::Array(..) | Type::Struct(_) => false,
        }
    }

    /// The pointee of a pointer type.
    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Pointer(inner) => Some(inner),
            _ => None,
        }
    }

    /// The variable name embedded in a function-pointer declarator, looking
    /// through pointer wrappers (`int (*f)(int)*`).
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Type::FunctionPointer(fp) => Some(&fp.name),
            Type::Pointer(inner) => inner.variable_name(),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Int, Type::Int) | (Type::Void, Type::Void) => true,
            (Type::Pointer(a), Type::Pointer(b)) => a == b,
            (Type::Array(a, n), Type::Array(b, m)) => n == m && a == b,
            (Type::FunctionPointer(a), Type::FunctionPointer(b)) => {
                a.ret == b.ret && a.params == b.params
            }
            (Type::Struct(a), Type::Struct(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Void => write!(f, "void"),
            Type::Pointer(inner) => write!(f, "{inner}*"),
            Type::Array(elem, len) => write!(f, "{elem}[{len}]"),
            Type::FunctionPointer(fp) => {
                write!(f, "{} (*{})(", fp.ret, fp.name)?;
                for (i, param) in fp.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")")
            }
            Type::Struct(s) => write!(f, "{}", s.name),
        }
    }
}
