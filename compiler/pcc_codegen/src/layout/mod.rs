//! Struct and stack-frame layout.
//!
//! Every struct definition is laid out in one pass before any method is
//! emitted, so sizes never depend on the order in which types are first
//! used. A method's frame is the layout of its locals struct and is built
//! on demand from the finished struct layouts.

use pcc_ir::{ItemId, ItemKind, Program, StructRef, Type};
use pcc_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::Reporter;

/// A named, typed slot at a word offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub name: String,
    pub ty: Type,
    pub offset: u32,
}

/// Slots packed in declaration order: a struct body or a method frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    slots: Vec<Slot>,
    size: u32,
}

impl Layout {
    /// Pack `fields` back to back, sizing each with `size_of`.
    pub fn build(
        fields: impl IntoIterator<Item = (String, Type)>,
        mut size_of: impl FnMut(&Type) -> u32,
    ) -> Self {
        let mut slots = Vec::new();
        let mut size = 0u32;
        for (name, ty) in fields {
            let width = size_of(&ty);
            slots.push(Slot {
                name,
                ty,
                offset: size,
            });
            size = size.saturating_add(width);
        }
        Layout { slots, size }
    }

    /// Total size in words.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The first slot called `name`.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

/// Size of `ty` in words. Struct sizes come from `struct_size`.
pub fn type_size(ty: &Type, struct_size: &mut impl FnMut(&StructRef) -> u32) -> u32 {
    match ty {
        Type::Int | Type::Pointer(_) | Type::FunctionPointer(_) => 1,
        Type::Void => 0,
        Type::Array(elem, len) => type_size(elem, struct_size).saturating_mul(*len),
        Type::Struct(s) => struct_size(s),
    }
}

/// Finished layouts of every struct definition in a program.
#[derive(Debug, Default)]
pub struct Layouts {
    structs: FxHashMap<ItemId, Layout>,
}

impl Layouts {
    /// Lay out all structs, reporting duplicate fields, unknown field
    /// types and structs that contain themselves.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn compute(program: &Program, reporter: &mut Reporter<'_>) -> Self {
        let mut pass = LayoutPass {
            program,
            reporter,
            done: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            cyclic: FxHashSet::default(),
        };
        for (id, _) in program.structs() {
            pass.layout(id);
        }
        tracing::debug!(structs = pass.done.len(), "laid out structs");
        Layouts { structs: pass.done }
    }

    pub fn get(&self, id: ItemId) -> Option<&Layout> {
        self.structs.get(&id)
    }

    /// Resolve a struct reference from the file it was written in.
    pub fn resolve(&self, program: &Program, s: &StructRef) -> Option<&Layout> {
        let (id, _) = program.resolve_struct(&s.name, s.mark.file)?;
        self.get(id)
    }
}

struct LayoutPass<'p, 'r, 'a> {
    program: &'p Program,
    reporter: &'r mut Reporter<'a>,
    done: FxHashMap<ItemId, Layout>,
    in_progress: FxHashSet<ItemId>,
    cyclic: FxHashSet<ItemId>,
}

impl LayoutPass<'_, '_, '_> {
    /// Lay out one struct (memoized) and return its size.
    fn layout(&mut self, id: ItemId) -> u32 {
        if let Some(done) = self.done.get(&id) {
            return done.size();
        }
        let program = self.program;
        let ItemKind::Struct(def) = &program.item(id).kind else {
            return 0;
        };
        if !self.in_progress.insert(id) {
            if self.cyclic.insert(id) {
                self.reporter.semantic(
                    def.mark,
                    format!("Struct '{}' contains itself and has no finite size", def.name),
                );
            }
            return 0;
        }
        for name in def.duplicate_fields() {
            self.reporter.semantic(
                def.mark,
                format!("Struct definition contains duplicate field name {name}"),
            );
        }
        let fields = def.fields.iter().map(|f| (f.name.clone(), f.ty.clone()));
        let layout = ensure_sufficient_stack(|| Layout::build(fields, |ty| self.field_size(ty)));
        self.in_progress.remove(&id);
        let size = layout.size();
        self.done.insert(id, layout);
        size
    }

    fn field_size(&mut self, ty: &Type) -> u32 {
        let program = self.program;
        type_size(ty, &mut |s| match program.resolve_struct(&s.name, s.mark.file) {
            Some((id, _)) => self.layout(id),
            None => {
                self.reporter.unknown_type(s);
                0
            }
        })
    }
}

#[cfg(test)]
mod tests;
