use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::mem;

use tracing::{debug, trace};

use crate::classify::{is_block_delimiter, is_comment_start, is_continuation, is_whitespace};
use crate::cursor::{Cursor, Mark};
use crate::source::Source;
use crate::token::{Token, TokenKind};

/// Text carried by the end-of-input token.
pub const END_OF_INPUT_TEXT: &str = "\0";

/// Tokenize a command script into every token up to and including the
/// final [`TokenKind::EndOfInput`].
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Scanner::new(input.chars()).collect()
}

/// Hand-written scanner for the command language.
///
/// [`Scanner::scan`] returns one token per call. A single whitespace run
/// can produce several tokens (embedded comments, the end-of-command
/// marker); the extra ones wait in a FIFO queue and are handed out by
/// the following calls before any more input is read.
pub struct Scanner<S> {
    cursor: Cursor<S>,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<S: Source> Scanner<S> {
    pub const fn new(source: S) -> Self {
        Self {
            cursor: Cursor::new(source),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Tokens already scanned but not yet returned.
    #[must_use]
    pub const fn pending(&self) -> &VecDeque<Token> {
        &self.pending
    }

    /// Gives the source back, e.g. to inspect a reader error.
    pub fn into_source(self) -> S {
        self.cursor.into_source()
    }

    /// Returns the next token.
    ///
    /// Past the end of input every call returns the same
    /// [`TokenKind::EndOfInput`] token.
    pub fn scan(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        let Some(ch) = self.cursor.advance() else {
            return self.end_of_input();
        };
        self.cursor.retreat();

        if is_whitespace(ch) {
            self.scan_whitespace()
        } else if is_comment_start(ch) {
            self.scan_comment()
        } else if is_block_delimiter(ch) {
            self.scan_block()
        } else {
            self.scan_literal()
        }
    }

    fn token(&self, kind: TokenKind, text: String, start: Mark) -> Token {
        Token {
            kind,
            text,
            span: self.cursor.span_from(start),
        }
    }

    fn end_of_input(&self) -> Token {
        self.token(
            TokenKind::EndOfInput,
            END_OF_INPUT_TEXT.to_string(),
            self.cursor.mark(),
        )
    }

    fn scan_block(&mut self) -> Token {
        let start = self.cursor.mark();
        let Some(ch) = self.cursor.advance() else {
            return self.end_of_input();
        };
        let kind = if ch == '(' {
            TokenKind::BlockStart
        } else {
            TokenKind::BlockEnd
        };
        self.token(kind, ch.to_string(), start)
    }

    fn scan_literal(&mut self) -> Token {
        let start = self.cursor.mark();
        let Some(first) = self.cursor.advance() else {
            return self.end_of_input();
        };
        let text = match first {
            '\'' | '"' => self.read_quoted(first),
            _ => self.read_bare(first),
        };
        self.token(TokenKind::Literal, text, start)
    }

    /// Body of a quoted literal; the opening quote is already consumed.
    fn read_quoted(&mut self, quote: char) -> String {
        let mut text = String::new();
        let mut escaped = false;

        while let Some(ch) = self.cursor.advance() {
            if escaped {
                text.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                return text;
            } else {
                text.push(ch);
            }
        }

        debug!(offset = self.cursor.mark().offset, "unterminated quoted literal");
        text
    }

    fn read_bare(&mut self, first: char) -> String {
        let mut text = String::from(first);

        while let Some(ch) = self.cursor.advance() {
            if is_whitespace(ch) || is_block_delimiter(ch) {
                self.cursor.retreat();
                break;
            }
            text.push(ch);
        }

        text
    }

    fn scan_comment(&mut self) -> Token {
        let start = self.cursor.mark();
        let Some(hash) = self.cursor.advance() else {
            return self.end_of_input();
        };
        let mut text = String::from(hash);

        let block = if self.cursor.advance() == Some('(') {
            text.push('(');
            true
        } else {
            self.cursor.retreat();
            false
        };

        let mut previous = None;
        while let Some(ch) = self.cursor.advance() {
            text.push(ch);
            if block && ch == '#' && previous == Some(')') {
                return self.token(TokenKind::CommentBlock, text, start);
            }
            if !block && ch == '\n' {
                return self.token(TokenKind::CommentLine, text, start);
            }
            previous = Some(ch);
        }

        if block {
            debug!(offset = start.offset, "block comment left open at end of input");
        }
        self.token(TokenKind::CommentLine, text, start)
    }

    /// Scans a run of whitespace and the comments embedded in it.
    ///
    /// The run is cut into whitespace segments at every comment. The
    /// segment holding the first newline that no continuation comma
    /// follows becomes the end-of-command token. The newline closing a
    /// line comment belongs to the comment and ends nothing.
    fn scan_whitespace(&mut self) -> Token {
        let run_start = self.cursor.mark();
        let mut run: Vec<Token> = Vec::new();
        let mut segment = String::new();
        let mut segment_start = run_start;
        let mut candidate: Option<usize> = None;

        loop {
            match self.cursor.advance() {
                Some(ch) if is_whitespace(ch) => {
                    segment.push(ch);
                    if ch == '\n' && candidate.is_none() {
                        candidate = Some(run.len());
                    }
                }
                Some(ch) if is_comment_start(ch) => {
                    self.cursor.retreat();
                    run.push(self.token(
                        TokenKind::Whitespace,
                        mem::take(&mut segment),
                        segment_start,
                    ));
                    run.push(self.scan_comment());
                    segment_start = self.cursor.mark();
                }
                Some(ch) if is_continuation(ch) && candidate.is_some() => {
                    trace!(offset = self.cursor.mark().offset, "line continuation");
                    segment.push(ch);
                    candidate = None;
                }
                Some(_) => {
                    self.cursor.retreat();
                    break;
                }
                None => break,
            }
        }
        run.push(self.token(TokenKind::Whitespace, segment, segment_start));

        if let Some(index) = candidate {
            run[index].kind = TokenKind::EndOfCommand;
        }

        let mut tokens = run
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace || !t.text.is_empty());
        let Some(first) = tokens.next() else {
            return self.token(TokenKind::Whitespace, String::new(), run_start);
        };
        self.pending.extend(tokens);
        if !self.pending.is_empty() {
            trace!(queued = self.pending.len(), "whitespace run split into several tokens");
        }
        first
    }
}

impl<S: Source> Iterator for Scanner<S> {
    type Item = Token;

    /// Yields tokens up to and including the first end-of-input token.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.scan();
        self.finished = token.kind == TokenKind::EndOfInput;
        Some(token)
    }
}

impl<S: Source> FusedIterator for Scanner<S> {}
