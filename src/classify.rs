//! Character classes of the command language.

/// Marker that continues a command onto the next line when it is the
/// first character after a newline.
pub const CONTINUATION: char = ',';

#[must_use]
pub const fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

#[must_use]
pub const fn is_comment_start(ch: char) -> bool {
    ch == '#'
}

#[must_use]
pub const fn is_block_delimiter(ch: char) -> bool {
    matches!(ch, '(' | ')')
}

#[must_use]
pub const fn is_continuation(ch: char) -> bool {
    ch == CONTINUATION
}
