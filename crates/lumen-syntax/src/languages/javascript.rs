//! JavaScript rule table.

use regex::Captures;

use super::shared::{IDENT, NUMBER, STRING_DQ, STRING_SQ, focused, keywords, simple};
use crate::error::HighlightError;
use crate::rule::{Emitter, Pattern, Rule, RuleSet};
use crate::span::TokenKind;

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "export",
    "extends",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    "await",
    "of",
    "as",
    "from",
];

/// Backtick-delimited template literal, lazily up to the first backtick.
pub(super) const TEMPLATE: &str = r"`(?s:.*?)`";

/// A `/regex/flags` literal, accepted only after an operator-like byte or at
/// the start of the input. Group 1 is the literal itself.
const REGEX_LITERAL: &str = concat!(
    r"(?:^|[=(:,;!&|?{}\[\]+\-*/~%^<>]\s*)",
    r"(/(?:\\.|\[(?:\\.|[^\]\\])*\]|[^/*\\\n\r\[])",
    r"(?:\\.|\[(?:\\.|[^\]\\])*\]|[^/\\\n\r\[])*/[dgimsuvy]*)",
);

/// How a template segmenter labels `${...}` interpolations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Interpolation {
    /// Only the `$` sigil; both braces are left to the rainbow pass.
    Marker,
    /// The whole `${...}` expression, braces included.
    Whole,
}

/// Splits a template literal starting at `start` into `string` segments and
/// `interpolation` spans.
///
/// Interpolations nest on unescaped braces. An unterminated interpolation
/// runs to the end of the literal.
pub(super) fn emit_template_segments(
    start: usize,
    raw: &str,
    style: Interpolation,
    out: &mut Emitter<'_>,
) {
    let bytes = raw.as_bytes();
    let mut segment_start = 0;
    // Skip the opening backtick so it stays part of the first segment.
    let mut i = 1;
    while let Some(&byte) = bytes.get(i) {
        let escaped = i > 0 && bytes.get(i - 1) == Some(&b'\\');
        if byte == b'$' && bytes.get(i + 1) == Some(&b'{') && !escaped {
            if i > segment_start {
                out.emit(start + segment_start, start + i, TokenKind::String, 10);
            }
            let entry = i;
            if style == Interpolation::Marker {
                out.emit(start + i, start + i + 1, TokenKind::Interpolation, 12);
            }
            i = skip_braced(bytes, i + 2);
            if style == Interpolation::Whole {
                out.emit(start + entry, start + i, TokenKind::Interpolation, 12);
            }
            segment_start = i;
            continue;
        }
        i += 1;
        if byte == b'`' && !escaped {
            break;
        }
    }
    if i > segment_start {
        out.emit(start + segment_start, start + i, TokenKind::String, 10);
    }
}

/// Returns the offset just past the brace closing an expression whose body
/// starts at `i`, or the end of `bytes`.
fn skip_braced(bytes: &[u8], mut i: usize) -> usize {
    let mut depth = 1_usize;
    while depth > 0 {
        let Some(&byte) = bytes.get(i) else {
            break;
        };
        let escaped = bytes.get(i.wrapping_sub(1)) == Some(&b'\\');
        match byte {
            b'{' if !escaped => depth += 1,
            b'}' if !escaped => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    i
}

fn emit_template(_text: &str, captures: &Captures<'_>, out: &mut Emitter<'_>) {
    if let Some(whole) = captures.get(0) {
        emit_template_segments(whole.start(), whole.as_str(), Interpolation::Marker, out);
    }
}

/// Builds the JavaScript rule set.
pub(super) fn rules() -> Result<RuleSet, HighlightError> {
    Ok(RuleSet::new("javascript")
        .with_name("JavaScript")
        .with_rules([
            simple(r"//[^\n]*", TokenKind::Comment, 10)?,
            simple(r"/\*(?s:.*?)\*/", TokenKind::Comment, 10)?,
            keywords(KEYWORDS)?,
            simple(NUMBER, TokenKind::Number, 6)?,
            simple(r"\b[0-9][0-9_]*n\b", TokenKind::Number, 6)?,
            simple(STRING_DQ, TokenKind::String, 6)?,
            simple(STRING_SQ, TokenKind::String, 6)?,
            Rule::composite(Pattern::new(TEMPLATE)?, 11, emit_template),
            focused(REGEX_LITERAL, 1, TokenKind::Regex, 7)?,
            focused(&format!(r"\b({IDENT})\s*\("), 1, TokenKind::Function, 7)?,
            focused(&format!(r"\.({IDENT})"), 1, TokenKind::Property, 5)?,
            simple(&format!(r"\b{IDENT}\b"), TokenKind::Variable, 1)?,
            simple(r"[{}()\[\].,;:?<>]", TokenKind::Punctuation, 1)?,
            simple(r"\.\.\.|=>", TokenKind::Operator, 2)?,
            simple(r"\?\?=?|\?\.(?:\(|\[)?", TokenKind::Operator, 2)?,
            simple(
                r"&&|\|\||\*\*|<<|>>>?|[+\-*/%&|^!=<>]=?",
                TokenKind::Operator,
                1,
            )?,
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::resolve;
    use rstest::{fixture, rstest};

    #[fixture]
    fn javascript() -> RuleSet {
        rules().expect("javascript rules compile")
    }

    fn labelled<'t>(text: &'t str, rule_set: &RuleSet) -> Vec<(&'t str, TokenKind)> {
        resolve(text, rule_set)
            .iter()
            .filter_map(|span| span.text(text).map(|slice| (slice, span.kind)))
            .collect()
    }

    #[rstest]
    fn labels_a_simple_statement(javascript: RuleSet) {
        assert_eq!(
            labelled("const x = f(1);", &javascript),
            vec![
                ("const", TokenKind::Keyword),
                ("x", TokenKind::Variable),
                ("=", TokenKind::Operator),
                ("f", TokenKind::Function),
                ("(", TokenKind::Punctuation),
                ("1", TokenKind::Number),
                (")", TokenKind::Punctuation),
                (";", TokenKind::Punctuation),
            ]
        );
    }

    #[rstest]
    fn comments_swallow_their_content(javascript: RuleSet) {
        let text = "a // let (b)\n/* c */";
        assert_eq!(
            labelled(text, &javascript),
            vec![
                ("a", TokenKind::Variable),
                ("// let (b)", TokenKind::Comment),
                ("/* c */", TokenKind::Comment),
            ]
        );
    }

    #[rstest]
    fn properties_are_labelled_after_a_dot(javascript: RuleSet) {
        let tokens = labelled("a.b.c()", &javascript);
        assert_eq!(
            tokens,
            vec![
                ("a", TokenKind::Variable),
                (".", TokenKind::Punctuation),
                ("b", TokenKind::Property),
                (".", TokenKind::Punctuation),
                ("c", TokenKind::Function),
                ("(", TokenKind::Punctuation),
                (")", TokenKind::Punctuation),
            ]
        );
    }

    #[rstest]
    fn template_literals_mark_interpolation_entries(javascript: RuleSet) {
        let text = "`a${x}b`";
        assert_eq!(
            labelled(text, &javascript),
            vec![
                ("`a", TokenKind::String),
                ("$", TokenKind::Interpolation),
                ("{", TokenKind::Punctuation),
                ("x", TokenKind::Variable),
                ("}", TokenKind::Punctuation),
                ("b`", TokenKind::String),
            ]
        );
    }

    #[rstest]
    fn template_without_interpolation_is_one_string(javascript: RuleSet) {
        assert_eq!(
            labelled("`plain text`", &javascript),
            vec![("`plain text`", TokenKind::String)]
        );
    }

    #[rstest]
    #[case("x = /ab+c/g;", "/ab+c/g")]
    #[case("f(/[/]x/)", "/[/]x/")]
    #[case("/^a/.test(s)", "/^a/")]
    fn regex_literals_follow_operator_context(
        javascript: RuleSet,
        #[case] text: &str,
        #[case] literal: &str,
    ) {
        assert!(
            labelled(text, &javascript).contains(&(literal, TokenKind::Regex)),
            "expected {literal} as a regex in {text}"
        );
    }

    #[rstest]
    fn division_is_not_a_regex(javascript: RuleSet) {
        let tokens = labelled("a / b / c", &javascript);
        assert!(tokens.iter().all(|(_, kind)| *kind != TokenKind::Regex));
    }

    #[rstest]
    #[case("0xFF_FF")]
    #[case("1_000.5e-3")]
    #[case("10n")]
    fn numbers(javascript: RuleSet, #[case] text: &str) {
        assert_eq!(labelled(text, &javascript), vec![(text, TokenKind::Number)]);
    }

    #[rstest]
    fn modern_operators_win_over_single_characters(javascript: RuleSet) {
        let tokens = labelled("a ?? b?.c", &javascript);
        assert!(tokens.contains(&("??", TokenKind::Operator)));
        assert!(tokens.contains(&("?.", TokenKind::Operator)));
    }
}
