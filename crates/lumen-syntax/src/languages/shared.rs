//! Pattern fragments and helpers shared by the rule tables.

use crate::error::HighlightError;
use crate::rule::{Pattern, Rule};
use crate::span::TokenKind;

/// ASCII identifier.
pub(super) const IDENT: &str = "[a-zA-Z_][a-zA-Z0-9_]*";

/// Binary, octal, hex and decimal literals with `_` separators.
pub(super) const NUMBER: &str = r"\b(?:0[bB][01_]+|0[oO][0-7_]+|0[xX][0-9a-fA-F_]+|[0-9][0-9_]*(?:\.[0-9_]+)?(?:[eE][+-]?[0-9][0-9_]*)?)\b";

/// Double-quoted string, allowed to span lines.
pub(super) const STRING_DQ: &str = r#""(?:[^"\\\n]|\\.|\n)*""#;

/// Single-quoted string, allowed to span lines.
pub(super) const STRING_SQ: &str = r"'(?:[^'\\\n]|\\.|\n)*'";

pub(super) fn simple(source: &str, kind: TokenKind, priority: i32) -> Result<Rule, HighlightError> {
    Ok(Rule::simple(Pattern::new(source)?, kind, priority))
}

/// Simple rule labelling capture group `focus` of each match.
pub(super) fn focused(
    source: &str,
    focus: usize,
    kind: TokenKind,
    priority: i32,
) -> Result<Rule, HighlightError> {
    Ok(Rule::simple(Pattern::with_focus(source, focus)?, kind, priority))
}

/// Whole-word alternation over `words`.
pub(super) fn word_list(
    words: &[&str],
    kind: TokenKind,
    priority: i32,
) -> Result<Rule, HighlightError> {
    let alternation = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    simple(&format!(r"\b(?:{alternation})\b"), kind, priority)
}

/// Keyword rule at the conventional keyword priority.
pub(super) fn keywords(words: &[&str]) -> Result<Rule, HighlightError> {
    word_list(words, TokenKind::Keyword, 9)
}

pub(super) const fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Byte before `pos`, skipping ASCII whitespace.
pub(super) fn prev_non_space(bytes: &[u8], pos: usize) -> Option<u8> {
    bytes
        .get(..pos)?
        .iter()
        .rev()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}
