use std::fmt;

/// A reported source location.
///
/// `line` and `column` are 1-based at the start of a token. `offset` is
/// the 0-based byte offset into the UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Start and end of a token.
///
/// `end.offset` is exclusive. `end.column` is the column of the last
/// character of the token, or `0` when the token ends right after a
/// newline; an empty token at the very start of a line therefore has
/// `end.column == start.column - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Number of source bytes covered by the span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved, never produced by the scanner.
    Illegal,
    /// Bare word or quoted literal.
    Literal,
    /// A run of whitespace that does not end the command.
    Whitespace,
    /// End of input. Carries a single `\0` as its text.
    EndOfInput,
    /// A newline not suppressed by a continuation comma.
    EndOfCommand,
    /// Opening parenthesis `(`.
    BlockStart,
    /// Closing parenthesis `)`.
    BlockEnd,
    /// Closed block comment `#( ... )#`.
    CommentBlock,
    /// Line comment `# ...`, or a block comment left open at end of input.
    CommentLine,
}

impl TokenKind {
    /// Short upper-case name used in token listings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Literal => "IDENT",
            Self::Whitespace => "WHITESPACE",
            Self::EndOfInput => "EOF",
            Self::EndOfCommand => "EOC",
            Self::BlockStart => "BLOCK_START",
            Self::BlockEnd => "BLOCK_END",
            Self::CommentBlock => "COMMENT_BLOCK",
            Self::CommentLine => "COMMENT_LINE",
        }
    }

    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::Literal)
    }

    /// Structural tokens: whitespace, end markers and block delimiters.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::EndOfInput
                | Self::EndOfCommand
                | Self::BlockStart
                | Self::BlockEnd
        )
    }

    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::CommentBlock | Self::CommentLine)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, text, and source span.
///
/// For quoted literals `text` holds the unescaped body while `span`
/// covers the raw source, quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Span { start, end } = self.span;
        write!(
            f,
            "Line: {} - {} Col: {} - {} Pos: {} - {} {} {:?}",
            start.line,
            end.line,
            start.column,
            end.column,
            start.offset,
            end.offset,
            self.kind,
            self.text
        )
    }
}
