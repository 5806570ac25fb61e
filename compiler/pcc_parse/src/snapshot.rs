//! Parser snapshots for speculative parsing.
//!
//! The grammar is ambiguous in a few places (`(T)x` versus `(x)`, a
//! declaration versus an expression statement, a global field versus a
//! method) and resolves them by trying one reading and rewinding on
//! failure. A snapshot records the cursor offset and the number of errors
//! recorded so far; restoring rewinds both, so an abandoned reading leaves
//! no diagnostics behind.
//!
//! Arena allocations made during an abandoned attempt are not rolled back.
//! They are unreachable and harmless.

use crate::Parser;

#[derive(Clone, Copy, Debug)]
pub struct ParserSnapshot {
    pub(crate) position: usize,
    pub(crate) error_count: usize,
}

impl Parser<'_> {
    #[inline]
    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            position: self.cursor.position(),
            error_count: self.cursor.errors.len(),
        }
    }

    #[inline]
    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.set_position(snapshot.position);
        self.cursor.errors.truncate(snapshot.error_count);
    }

    /// Run `f`; if it yields `None`, rewind as if it never ran.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let result = f(self);
        if result.is_none() {
            self.restore(snapshot);
        }
        result
    }
}
