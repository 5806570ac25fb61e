//! Files read during a compilation.

use crate::FileId;

/// One source file: the name it was requested under and its full text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// All files of one compilation, in the order they were first read.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return its id.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let id = FileId::new(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(SourceFile {
            name: name.into(),
            text: text.into(),
        });
        id
    }

    /// Get a file by id.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this map.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: FileId) -> &SourceFile {
        &self.files[id.index()]
    }

    /// Look a file up by the name it was read under.
    pub fn find(&self, name: &str) -> Option<FileId> {
        self.files
            .iter()
            .position(|f| f.name == name)
            .and_then(|i| u32::try_from(i).ok())
            .map(FileId::new)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_and_find() {
        let mut map = SourceMap::new();
        assert!(map.is_empty());
        let a = map.add("a.c", "int x;");
        let b = map.add("b.c", "int y;");
        assert_eq!(map.len(), 2);
        assert_eq!(map.find("b.c"), Some(b));
        assert_eq!(map.find("a.c"), Some(a));
        assert_eq!(map.find("c.c"), None);
        assert_eq!(map.get(a).text(), "int x;");
        assert_eq!(map.get(b).name(), "b.c");
    }
}
