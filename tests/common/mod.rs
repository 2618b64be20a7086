#![allow(dead_code)]

use cmdlang::{Token, TokenKind, tokenize};

pub fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).iter().map(|t| t.kind).collect()
}

/// Kinds and texts, without the trailing end-of-input token.
pub fn summary(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
        .into_iter()
        .filter(|t| t.kind != TokenKind::EndOfInput)
        .map(|t| (t.kind, t.text))
        .collect()
}

/// Asserts the token spans tile `input` exactly and that every token
/// other than quoted literals carries its source text verbatim.
pub fn assert_covers(input: &str, tokens: &[Token]) {
    let mut offset = 0;
    for token in tokens {
        assert_eq!(
            token.span.start.offset, offset,
            "gap or overlap before {token}\n--- input ---\n{input:?}"
        );
        offset = token.span.end.offset;

        let raw = &input[token.span.start.offset..token.span.end.offset];
        let quoted = raw.starts_with('\'') || raw.starts_with('"');
        if token.kind != TokenKind::EndOfInput && !(token.kind == TokenKind::Literal && quoted) {
            assert_eq!(raw, token.text, "text mismatch for {token}");
        }
    }
    assert_eq!(offset, input.len(), "tokens stop short of the input end");

    let last = tokens.last().expect("at least the end-of-input token");
    assert_eq!(last.kind, TokenKind::EndOfInput);
    assert!(last.span.is_empty());
}

/// Asserts reported line and column agree with the offsets.
pub fn assert_lines_consistent(input: &str, tokens: &[Token]) {
    for token in tokens {
        let before = &input[..token.span.start.offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = input[line_start..token.span.start.offset].chars().count() + 1;
        assert_eq!(token.span.start.line, line, "start line of {token}");
        assert_eq!(token.span.start.column, column, "start column of {token}");

        let upto = &input[..token.span.end.offset];
        let end_line = upto.matches('\n').count() + 1;
        let end_line_start = upto.rfind('\n').map_or(0, |i| i + 1);
        let end_column = input[end_line_start..token.span.end.offset].chars().count();
        assert_eq!(token.span.end.line, end_line, "end line of {token}");
        assert_eq!(token.span.end.column, end_column, "end column of {token}");
    }
}
