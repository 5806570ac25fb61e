//! The declaration registry of one compilation.
//!
//! All declarations from all files live in one flat list in parse order
//! (an included file's declarations precede the includer's). Lookups apply
//! the visibility rule at query time.

use crate::{Arena, FileId, GlobalField, Item, ItemKind, Method, SourceMap, StructDef};

/// Index of a declaration in [`Program::items`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct Program {
    pub sources: SourceMap,
    pub arena: Arena,
    pub items: Vec<Item>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) -> ItemId {
        let id = ItemId(u32::try_from(self.items.len()).unwrap_or(u32::MAX));
        self.items.push(item);
        id
    }

    /// Get a declaration by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }

    /// Declarations visible from `from`, in registry order.
    pub fn visible(&self, from: Option<FileId>) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.is_visible_from(from))
            .map(|(i, item)| (ItemId(u32::try_from(i).unwrap_or(u32::MAX)), item))
    }

    /// All global fields, in declaration order.
    pub fn globals(&self) -> impl Iterator<Item = (ItemId, &GlobalField)> + '_ {
        self.visible(None).filter_map(|(id, item)| match &item.kind {
            ItemKind::Global(g) => Some((id, g)),
            _ => None,
        })
    }

    /// All struct definitions with their ids.
    pub fn structs(&self) -> impl Iterator<Item = (ItemId, &StructDef)> + '_ {
        self.visible(None).filter_map(|(id, item)| match &item.kind {
            ItemKind::Struct(s) => Some((id, s)),
            _ => None,
        })
    }

    /// Resolve a struct name as seen from `from`: the last visible
    /// declaration with that name wins.
    pub fn resolve_struct(&self, name: &str, from: FileId) -> Option<(ItemId, &StructDef)> {
        self.visible(Some(from))
            .filter_map(|(id, item)| match &item.kind {
                ItemKind::Struct(s) if s.name == name => Some((id, s)),
                _ => None,
            })
            .last()
    }

    /// Methods named `name` visible from `from`, in registry order.
    pub fn methods_named<'a>(
        &'a self,
        name: &'a str,
        from: FileId,
    ) -> impl Iterator<Item = (&'a Item, &'a Method)> + 'a {
        self.visible(Some(from))
            .filter_map(move |(_, item)| match &item.kind {
                ItemKind::Method(m) if m.name == name => Some((item, m)),
                _ => None,
            })
    }

    /// First global field named `name` visible from `from`
    /// (`None` ignores visibility).
    pub fn global(&self, name: &str, from: Option<FileId>) -> Option<(ItemId, &GlobalField)> {
        self.visible(from).find_map(|(id, item)| match &item.kind {
            ItemKind::Global(g) if g.name == name => Some((id, g)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests;
