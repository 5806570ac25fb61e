//! Error recording with skip-to-stop-token recovery.
//!
//! A syntax error never aborts the file. The error is recorded at the
//! current position, then the cursor skips forward to the first of a small
//! set of stop tokens (or end of input). Callers look at which stop was
//! found to decide how to continue, so one file can report many
//! independent errors.

use pcc_ir::Mark;

use crate::{Cursor, ParseError};

impl Cursor<'_> {
    /// Record `message` at `mark` without moving.
    pub fn error_at(&mut self, mark: Mark, message: impl Into<String>) {
        self.errors.push(ParseError::new(mark, message));
    }

    /// Record `message` at the current position and skip to the first of
    /// `stops`.
    ///
    /// The stop is consumed only when `consume_stop` is set; whitespace
    /// after the resting position is skipped either way. Returns the stop
    /// that was found, `None` at end of input or when `stops` is empty.
    pub fn error(
        &mut self,
        message: impl Into<String>,
        consume_stop: bool,
        stops: &[&'static str],
    ) -> Option<&'static str> {
        self.error_at(self.mark(), message);
        if stops.is_empty() {
            return None;
        }
        let mut found = None;
        while self.has_remaining() {
            if let Some(stop) = stops.iter().copied().find(|s| self.at_str(s)) {
                if consume_stop {
                    self.take_str(stop);
                }
                found = Some(stop);
                break;
            }
            self.bump();
        }
        self.skip_whitespace();
        found
    }
}

#[cfg(test)]
mod tests {
    use pcc_ir::FileId;
    use pretty_assertions::assert_eq;

    use crate::Cursor;

    #[test]
    fn test_skips_to_stop_without_consuming() {
        let mut c = Cursor::new("junk junk ; next", FileId::new(0));
        let found = c.error("Expected semicolon", false, &[";", "}"]);
        assert_eq!(found, Some(";"));
        assert_eq!(c.peek(), ';');
        assert_eq!(c.errors.len(), 1);
        assert_eq!(c.errors[0].mark.offset, 0);
    }

    #[test]
    fn test_consumes_stop_and_whitespace() {
        let mut c = Cursor::new("x } y", FileId::new(0));
        assert_eq!(c.error("Expected closing brace", true, &["}"]), Some("}"));
        assert_eq!(c.peek(), 'y');
    }

    #[test]
    fn test_no_stop_found_runs_to_end() {
        let mut c = Cursor::new("abc", FileId::new(0));
        assert_eq!(c.error("Expected value", false, &[")"]), None);
        assert!(!c.has_remaining());
    }

    #[test]
    fn test_no_stops_records_in_place() {
        let mut c = Cursor::new("abc", FileId::new(0));
        assert_eq!(c.error("Expected end of file", false, &[]), None);
        assert_eq!(c.position(), 0);
    }
}
