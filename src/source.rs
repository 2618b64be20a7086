//! Sequential character sources the scanner reads from.
//!
//! A [`Source`] hands out one `char` at a time and reports end of input
//! with `None`. Once `None` has been returned, every later call must
//! return `None` as well.

use std::char::REPLACEMENT_CHARACTER;
use std::io::{self, BufRead, ErrorKind};

/// A forward-only stream of characters.
pub trait Source {
    /// Next character, or `None` once the input is exhausted.
    fn next_char(&mut self) -> Option<char>;
}

impl Source for std::str::Chars<'_> {
    fn next_char(&mut self) -> Option<char> {
        self.next()
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn next_char(&mut self) -> Option<char> {
        (**self).next_char()
    }
}

/// Error raised while pulling bytes from a reader.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The underlying reader failed.
    #[error("read failed after {offset} bytes: {source}")]
    Io {
        offset: usize,
        #[source]
        source: io::Error,
    },
}

/// Decodes UTF-8 from a buffered byte reader.
///
/// Malformed input is replaced the way `String::from_utf8_lossy` does
/// it: one U+FFFD per maximal prefix of a valid sequence, and the byte
/// that breaks the sequence starts the next character. A read error
/// ends the input; it is kept until [`ReaderSource::take_error`]
/// collects it.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    bytes_read: usize,
    error: Option<ReadError>,
    done: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_read: 0,
            error: None,
            done: false,
        }
    }

    /// The error that cut the input short, if any.
    pub const fn take_error(&mut self) -> Option<ReadError> {
        self.error.take()
    }

    /// Number of raw bytes consumed from the reader so far.
    #[must_use]
    pub const fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn peek_byte(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return buf.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::debug!(offset = self.bytes_read, error = %e, "reader failed");
                    self.error = Some(ReadError::Io {
                        offset: self.bytes_read,
                        source: e,
                    });
                    self.done = true;
                    return None;
                }
            }
        }
    }

    fn bump(&mut self) {
        self.reader.consume(1);
        self.bytes_read += 1;
    }
}

impl<R: BufRead> Source for ReaderSource<R> {
    fn next_char(&mut self) -> Option<char> {
        let Some(lead) = self.peek_byte() else {
            self.done = true;
            return None;
        };
        self.bump();

        let width = utf8_width(lead);
        if width == 1 {
            return Some(char::from(lead));
        }
        if width == 0 {
            return Some(REPLACEMENT_CHARACTER);
        }

        let mut bytes = [lead, 0, 0, 0];
        for (i, slot) in bytes.iter_mut().enumerate().take(width).skip(1) {
            let (low, high) = if i == 1 {
                second_byte_bounds(lead)
            } else {
                (0x80, 0xBF)
            };
            match self.peek_byte() {
                Some(b) if (low..=high).contains(&b) => {
                    *slot = b;
                    self.bump();
                }
                _ => return Some(REPLACEMENT_CHARACTER),
            }
        }

        Some(
            std::str::from_utf8(&bytes[..width])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(REPLACEMENT_CHARACTER),
        )
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `0` when
/// `lead` cannot start a sequence.
const fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Allowed range of the byte after `lead`; excludes overlong forms,
/// surrogates and code points above U+10FFFF.
const fn second_byte_bounds(lead: u8) -> (u8, u8) {
    match lead {
        0xE0 => (0xA0, 0xBF),
        0xED => (0x80, 0x9F),
        0xF0 => (0x90, 0xBF),
        0xF4 => (0x80, 0x8F),
        _ => (0x80, 0xBF),
    }
}
