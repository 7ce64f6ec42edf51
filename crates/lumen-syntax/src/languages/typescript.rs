//! TypeScript rule table, layered on JavaScript.

use regex::Captures;

use super::javascript;
use super::shared::{is_ident_byte, keywords, prev_non_space, simple, word_list};
use crate::error::HighlightError;
use crate::rule::{Emitter, Pattern, Rule, RuleSet};
use crate::span::TokenKind;

const DECLARATION_KEYWORDS: &[&str] = &["interface", "type", "enum", "namespace", "module"];

const EXTRA_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "protected",
    "readonly",
    "abstract",
    "override",
    "static",
    "keyof",
    "infer",
    "unique",
    "satisfies",
    "asserts",
    "is",
    "implements",
    "declare",
    "global",
];

const PRIMITIVE_TYPES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "bigint",
    "symbol",
    "object",
    "unknown",
    "never",
    "any",
    "void",
    "null",
    "undefined",
];

/// Labels every identifier within `from..to` as a type.
///
/// Dotted qualifications (`A.B.C`) form a single span as long as they stay
/// within the range.
fn emit_type_idents(bytes: &[u8], from: usize, to: usize, out: &mut Emitter<'_>) {
    let mut i = from;
    while i < to {
        let starts_ident = bytes
            .get(i)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_');
        if !starts_ident {
            i += 1;
            continue;
        }
        let mut end = i + 1;
        while bytes
            .get(end)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            end += 1;
        }
        while end < to
            && bytes.get(end) == Some(&b'.')
            && bytes.get(end + 1).copied().is_some_and(is_ident_byte)
        {
            let mut next = end + 1;
            while next < to && bytes.get(next).copied().is_some_and(is_ident_byte) {
                next += 1;
            }
            end = next;
        }
        out.emit(i, end, TokenKind::Type, 9);
        i = end;
    }
}

/// Emitter labelling the identifiers inside capture group `group`.
fn types_in_group(
    group: usize,
) -> impl Fn(&str, &Captures<'_>, &mut Emitter<'_>) + Send + Sync + 'static {
    move |text: &str, captures: &Captures<'_>, out: &mut Emitter<'_>| {
        if let Some(body) = captures.get(group) {
            emit_type_idents(text.as_bytes(), body.start(), body.end(), out);
        }
    }
}

/// Types after a colon, skipped when the colon follows a `?`.
fn emit_types_after_colon(text: &str, captures: &Captures<'_>, out: &mut Emitter<'_>) {
    let (Some(whole), Some(body)) = (captures.get(0), captures.get(1)) else {
        return;
    };
    let bytes = text.as_bytes();
    if prev_non_space(bytes, whole.start()) == Some(b'?') {
        return;
    }
    emit_type_idents(bytes, body.start(), body.end(), out);
}

/// Builds the TypeScript rule set.
pub(super) fn rules() -> Result<RuleSet, HighlightError> {
    let extra = [
        word_list(DECLARATION_KEYWORDS, TokenKind::KeywordDecl, 9)?,
        keywords(EXTRA_KEYWORDS)?,
        word_list(PRIMITIVE_TYPES, TokenKind::Type, 6)?,
        simple(
            r"@\s*[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*",
            TokenKind::Builtin,
            8,
        )?,
        Rule::composite(
            Pattern::new(r":\s*([^=;{}()\n`]+)")?,
            9,
            emit_types_after_colon,
        ),
        Rule::composite(
            Pattern::new(r"\bas\s+([^\s,;()<>\[\]{}`]+)")?,
            9,
            types_in_group(1),
        ),
        Rule::composite(
            Pattern::new(r"\b(extends|implements)\s+([^{;`]+)")?,
            9,
            types_in_group(2),
        ),
        Rule::composite(Pattern::new(r"<[^>`]*>")?, 8, types_in_group(0)),
    ];
    Ok(javascript::rules()?.extend("typescript", extra, Some("TypeScript")))
}
