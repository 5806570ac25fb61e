//! Line and column lookup for byte offsets.
//!
//! Lines are 1-based. Columns are 0-based and count characters (not bytes)
//! from the start of the line, matching how the compiler has always printed
//! positions.

/// Byte offset of each line start, for O(log L) lookup.
///
/// ```
/// use pcc_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "int x;\nint y;";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 0));
/// assert_eq!(table.offset_to_line_col(source, 11), (2, 4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the byte where line `i + 1` starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// (1-based line, 0-based column) of `offset`. Offsets past the end of
    /// `source` are clamped.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(start);
        let column = source
            .get(start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(column).unwrap_or(u32::MAX))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// One-off lookup without building a table.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, offset)
}

#[cfg(test)]
mod tests;
