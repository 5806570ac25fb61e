//! Character cursor over one source file.
//!
//! The buffer is immutable; the only state is a byte offset, so a snapshot
//! is a copy of that offset and restoring is overwriting it. Recorded
//! parse errors also live here so that recovery (see `recovery.rs`) can
//! report and skip in one step.

use pcc_ir::{FileId, Mark};

use crate::ParseError;

/// Cursor over one file's (preprocessed) text.
pub struct Cursor<'a> {
    text: &'a str,
    file: FileId,
    pos: usize,
    pub(crate) errors: Vec<ParseError>,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, file: FileId) -> Self {
        Cursor {
            text,
            file,
            pos: 0,
            errors: Vec::new(),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to a byte offset previously obtained from [`Cursor::position`].
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.text.len(), "cursor position {pos} out of bounds");
        self.pos = pos;
    }

    /// The current position as a diagnostic mark.
    #[inline]
    pub fn mark(&self) -> Mark {
        Mark::new(self.file, u32::try_from(self.pos).unwrap_or(u32::MAX))
    }

    /// Go back to a mark taken on this cursor.
    #[inline]
    pub fn reset(&mut self, mark: Mark) {
        debug_assert_eq!(mark.file, self.file, "mark from another file");
        self.set_position(mark.offset as usize);
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.text.len()
    }

    #[inline]
    fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    /// Current character, `'\0'` at end of input.
    #[inline]
    pub fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or('\0')
    }

    /// Character `n` positions ahead, `'\0'` past the end.
    pub fn peek_nth(&self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or('\0')
    }

    /// Consume one character. Returns `'\0'` at end of input.
    pub fn bump(&mut self) -> char {
        let c = self.peek();
        if c != '\0' || self.has_remaining() {
            self.pos += c.len_utf8();
        }
        c
    }

    pub fn take_if(&mut self, c: char) -> bool {
        if self.has_remaining() && self.peek() == c {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume the first of `options` that matches.
    pub fn take_any(&mut self, options: &[char]) -> Option<char> {
        options.iter().copied().find(|&c| self.take_if(c))
    }

    pub fn take_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consume the first of `options` that matches.
    pub fn take_any_str(&mut self, options: &[&'static str]) -> Option<&'static str> {
        options.iter().copied().find(|s| self.take_str(s))
    }

    /// Text between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.text.get(start..end).unwrap_or("")
    }

    /// Whether the text at the cursor starts with `s`.
    pub fn at_str(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consume `keyword` only when it is not the prefix of a longer
    /// identifier.
    pub fn take_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(keyword) {
            return false;
        }
        let next = rest[keyword.len()..].chars().next().unwrap_or('\0');
        if is_ident_continue(next) {
            return false;
        }
        self.pos += keyword.len();
        true
    }

    /// Skip whitespace, `// line` comments and `/* block */` comments.
    pub fn skip_whitespace(&mut self) {
        loop {
            while self.peek().is_whitespace() {
                self.bump();
            }
            if self.take_str("//") {
                while self.has_remaining() && self.peek() != '\n' {
                    self.bump();
                }
            } else if self.take_str("/*") {
                match self.rest().find("*/") {
                    Some(end) => self.pos += end + 2,
                    None => self.pos = self.text.len(),
                }
            } else {
                return;
            }
        }
    }

    /// Read an identifier (`[A-Za-z_][A-Za-z0-9_]*`) and skip trailing
    /// whitespace.
    pub fn take_ident(&mut self) -> Option<String> {
        if !is_ident_start(self.peek()) {
            return None;
        }
        let start = self.pos;
        while is_ident_continue(self.peek()) {
            self.bump();
        }
        let name = self.text[start..self.pos].to_string();
        self.skip_whitespace();
        Some(name)
    }
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
