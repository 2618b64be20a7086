//! Position tracking with single-character pushback.

use crate::source::Source;
use crate::token::{Position, Span};

/// A 0-based location in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Mark {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Reads characters from a [`Source`] while tracking line, column and
/// byte offset.
///
/// The most recent read can be undone with [`Cursor::retreat`]. Undoing
/// a newline restores the position saved in `history` when that newline
/// was consumed, since the previous line's column cannot be recomputed.
pub(crate) struct Cursor<S> {
    source: S,
    mark: Mark,
    history: Vec<Mark>,
    last: Option<char>,
    pushed_back: Option<char>,
}

impl<S: Source> Cursor<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            mark: Mark {
                line: 0,
                column: 0,
                offset: 0,
            },
            history: Vec::new(),
            last: None,
            pushed_back: None,
        }
    }

    pub const fn mark(&self) -> Mark {
        self.mark
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Reads the next character. `None` at end of input, repeatedly.
    pub fn advance(&mut self) -> Option<char> {
        let next = match self.pushed_back.take() {
            Some(ch) => Some(ch),
            None => self.source.next_char(),
        };
        let Some(ch) = next else {
            self.last = None;
            return None;
        };

        if ch == '\n' {
            self.history.push(self.mark);
            self.mark.line += 1;
            self.mark.column = 0;
        } else {
            self.mark.column += 1;
        }
        self.mark.offset += ch.len_utf8();
        self.last = Some(ch);
        Some(ch)
    }

    /// Undoes the most recent [`Cursor::advance`]. The character is
    /// delivered again by the next advance.
    ///
    /// After an advance that hit end of input there is nothing to undo
    /// and this is a no-op.
    pub fn retreat(&mut self) {
        debug_assert!(
            self.pushed_back.is_none(),
            "retreat called twice without an advance in between"
        );
        let Some(ch) = self.last.take() else {
            return;
        };

        if ch == '\n' {
            if let Some(previous) = self.history.pop() {
                self.mark = previous;
            }
        } else {
            self.mark.column -= 1;
            self.mark.offset -= ch.len_utf8();
        }
        self.pushed_back = Some(ch);
    }

    /// Reported span from `start` up to the current position.
    pub const fn span_from(&self, start: Mark) -> Span {
        Span {
            start: Position {
                line: start.line + 1,
                column: start.column + 1,
                offset: start.offset,
            },
            end: Position {
                line: self.mark.line + 1,
                column: self.mark.column,
                offset: self.mark.offset,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(input: &str) -> Cursor<std::str::Chars<'_>> {
        Cursor::new(input.chars())
    }

    #[test]
    fn advance_tracks_line_and_column() {
        let mut c = cursor("ab\ncd");
        for _ in 0..4 {
            c.advance();
        }
        assert_eq!(
            c.mark(),
            Mark {
                line: 1,
                column: 1,
                offset: 4
            }
        );
    }

    #[test]
    fn retreat_over_newline_restores_column() {
        let mut c = cursor("abc\nd");
        for _ in 0..3 {
            c.advance();
        }
        let before = c.mark();
        assert_eq!(c.advance(), Some('\n'));
        assert_eq!(c.mark().line, 1);
        c.retreat();
        assert_eq!(c.mark(), before);
        assert_eq!(c.advance(), Some('\n'));
        assert_eq!(c.advance(), Some('d'));
        assert_eq!(
            c.mark(),
            Mark {
                line: 1,
                column: 1,
                offset: 5
            }
        );
    }

    #[test]
    fn retreat_multibyte_restores_offset() {
        let mut c = cursor("é!");
        assert_eq!(c.advance(), Some('é'));
        assert_eq!(c.mark().offset, 2);
        c.retreat();
        assert_eq!(c.mark(), Mark::default());
        assert_eq!(c.advance(), Some('é'));
    }

    #[test]
    fn end_of_input_is_idempotent() {
        let mut c = cursor("x");
        c.advance();
        let at_end = c.mark();
        assert_eq!(c.advance(), None);
        assert_eq!(c.advance(), None);
        assert_eq!(c.mark(), at_end);
    }

    #[test]
    fn retreat_after_end_of_input_is_noop() {
        let mut c = cursor("x");
        c.advance();
        assert_eq!(c.advance(), None);
        c.retreat();
        assert_eq!(c.mark().offset, 1);
        assert_eq!(c.advance(), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "retreat called twice")]
    fn double_retreat_breaks_pushback_contract() {
        let mut c = cursor("ab");
        c.advance();
        c.retreat();
        c.retreat();
    }

    #[test]
    fn span_reports_one_based_start() {
        let mut c = cursor("ab\n");
        let start = c.mark();
        c.advance();
        c.advance();
        let span = c.span_from(start);
        assert_eq!((span.start.line, span.start.column, span.start.offset), (1, 1, 0));
        assert_eq!((span.end.line, span.end.column, span.end.offset), (1, 2, 2));

        c.advance();
        let span = c.span_from(start);
        assert_eq!((span.end.line, span.end.column, span.end.offset), (2, 0, 3));
    }
}
