//! Scanner for a line-oriented command language.
//!
//! A command is a sequence of bare or quoted literals ending at a
//! newline. A comma as the first character of the next line continues
//! the command. Parentheses delimit blocks, `#` starts a line comment
//! and `#( ... )#` a block comment.
//!
//! The scanner never fails: unterminated quotes and comments end at the
//! end of input, and any other character is literal content.
//!
//! # Quick start
//!
//! ```
//! use cmdlang::{tokenize, TokenKind};
//!
//! let tokens = tokenize("deploy 'web app'\n\t,(with cache)\nstatus\n");
//! let commands = tokens
//!     .iter()
//!     .filter(|t| t.kind == TokenKind::EndOfCommand)
//!     .count();
//! assert_eq!(commands, 2);
//! assert_eq!(tokens[2].text, "web app");
//! ```
//!
//! ## Scanning a reader
//!
//! ```
//! use cmdlang::{ReaderSource, Scanner, TokenKind};
//!
//! let mut source = ReaderSource::new(&b"run (fast)"[..]);
//! let kinds: Vec<_> = Scanner::new(&mut source).map(|t| t.kind).collect();
//! assert_eq!(kinds[2], TokenKind::BlockStart);
//! assert!(source.take_error().is_none());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod classify;
mod cursor;
pub mod scanner;
pub mod source;
pub mod token;

pub use scanner::{END_OF_INPUT_TEXT, Scanner, tokenize};
pub use source::{ReadError, ReaderSource, Source};
pub use token::{Position, Span, Token, TokenKind};
