//! Source positions.
//!
//! A [`Mark`] is a file identity plus a byte offset. Line and column are
//! derived on demand (see `pcc_diagnostic::span_utils`), so marks stay
//! `Copy` and 8 bytes wide.

/// Index of a file in the [`SourceMap`](crate::SourceMap).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FileId(u32);

impl FileId {
    /// Create a file id from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        FileId(index)
    }

    /// Index into the source map.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A byte position inside one source file.
///
/// Marks are used both for diagnostics and for backtracking: saving a
/// mark is copying it, restoring is overwriting the cursor offset.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Mark {
    pub file: FileId,
    pub offset: u32,
}

impl Mark {
    #[inline]
    pub const fn new(file: FileId, offset: u32) -> Self {
        Mark { file, offset }
    }

    /// Same file, different offset.
    #[inline]
    #[must_use]
    pub const fn with_offset(self, offset: u32) -> Self {
        Mark {
            file: self.file,
            offset,
        }
    }
}
