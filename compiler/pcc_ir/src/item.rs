//! Top-level declarations.

use bitflags::bitflags;

use crate::{Arena, ExprId, FileId, Mark, StmtId, StmtKind, Type};

bitflags! {
    /// Declaration modifiers written before a top-level item.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u8 {
        /// `public`: visible from every file, not only the declaring one.
        const PUBLIC = 1 << 0;
        /// `extern`: a method implemented outside this compilation.
        const EXTERN = 1 << 1;
        /// `const`: a global replaced by its folded value at every use.
        const CONST = 1 << 2;
    }
}

/// `[public] [const] Type name [= value];`
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalField {
    pub name: String,
    pub ty: Type,
    pub init: Option<ExprId>,
    /// Folded initializer of a `const` field.
    pub const_value: Option<i32>,
    pub mark: Mark,
}

/// One `Type name;` line of a struct body.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub ty: Type,
    pub name: String,
    pub mark: Mark,
}

/// `[public] struct Name { fields... }`
#[derive(Clone, Debug, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub mark: Mark,
}

impl StructDef {
    /// Field names declared more than once, each reported once, in order of
    /// first repetition.
    pub fn duplicate_fields(&self) -> Vec<&str> {
        duplicates(self.fields.iter().map(|f| f.name.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub ty: Type,
    pub name: String,
}

/// One slot of a method's locals struct.
#[derive(Clone, Debug, PartialEq)]
pub struct Local {
    pub ty: Type,
    pub name: String,
}

/// Name of the return-value slot in every locals struct.
pub const RETVAL: &str = "%retval";
/// Name of the return-address slot in every locals struct.
pub const RETPTR: &str = "%retptr";

/// `[public] [extern] Type name(params) (body | ;)`
#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    pub name: String,
    pub ret: Type,
    pub params: Vec<Param>,
    /// `None` for declarations without a body.
    pub body: Option<StmtId>,
    pub mark: Mark,
}

impl Method {
    pub fn is_main(&self) -> bool {
        self.name == "main"
    }

    /// The synthesized locals struct: return-value slot, return-address
    /// slot, parameters, then every variable declared anywhere in the body.
    ///
    /// Its layout is the method's stack frame.
    pub fn locals(&self, arena: &Arena) -> Vec<Local> {
        let mut locals = vec![
            Local {
                ty: self.ret.clone(),
                name: RETVAL.to_string(),
            },
            Local {
                ty: Type::Int,
                name: RETPTR.to_string(),
            },
        ];
        locals.extend(self.params.iter().map(|p| Local {
            ty: p.ty.clone(),
            name: p.name.clone(),
        }));
        if let Some(body) = self.body {
            for decl in arena.local_decls(body) {
                if let StmtKind::VarDecl { ty, name, .. } = &arena.stmt(decl).kind {
                    locals.push(Local {
                        ty: ty.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        locals
    }

    /// Names declared more than once in the locals struct.
    pub fn duplicate_locals(&self, arena: &Arena) -> Vec<String> {
        let locals = self.locals(arena);
        duplicates(locals.iter().map(|l| l.name.as_str()))
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// `#asminclude file`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsmInclude {
    pub path: String,
    pub mark: Mark,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    Global(GlobalField),
    Struct(StructDef),
    Method(Method),
    AsmInclude(AsmInclude),
}

/// A top-level declaration with its origin file and modifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub file: FileId,
    pub modifiers: Modifiers,
}

impl Item {
    pub fn is_public(&self) -> bool {
        self.modifiers.contains(Modifiers::PUBLIC)
    }

    pub fn is_extern(&self) -> bool {
        self.modifiers.contains(Modifiers::EXTERN)
    }

    pub fn is_const(&self) -> bool {
        self.modifiers.contains(Modifiers::CONST)
    }

    /// Visibility rule: usable from `from` if public or declared there.
    /// `None` means "from anywhere", used by whole-program passes.
    pub fn is_visible_from(&self, from: Option<FileId>) -> bool {
        match from {
            None => true,
            Some(file) => self.is_public() || self.file == file,
        }
    }
}

fn duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    let mut repeated: Vec<&str> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            if !repeated.contains(&name) {
                repeated.push(name);
            }
        } else {
            seen.push(name);
        }
    }
    repeated
}
