//! Python rule table.

use regex::Captures;

use super::shared::{IDENT, NUMBER, STRING_DQ, STRING_SQ, focused, keywords, simple};
use crate::error::HighlightError;
use crate::rule::{Emitter, Pattern, Rule, RuleSet};
use crate::span::TokenKind;

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "False", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "None",
    "nonlocal", "not", "or", "pass", "raise", "return", "True", "try", "while", "with", "yield",
];

/// `f`, `rf` or `fr` prefixed literal with any quote style.
const FORMAT_STRING: &str =
    r#"\b(?:[rR]?[fF]|[fF][rR])(?:"""(?s:.*?)"""|'''(?s:.*?)'''|"(?s:.*?)"|'(?s:.*?)')"#;

/// Splits an f-string into `string` segments and top-level `{...}`
/// interpolations. Doubled braces are escapes and stay in the string.
fn emit_format_string(_text: &str, captures: &Captures<'_>, out: &mut Emitter<'_>) {
    let Some(whole) = captures.get(0) else {
        return;
    };
    let start = whole.start();
    let raw = whole.as_str();
    let Some(prefix_len) = raw.find(['"', '\'']) else {
        return;
    };
    let quoted = raw.get(prefix_len..).unwrap_or_default();
    let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    let body_start = prefix_len + quote_len;
    let body_end = raw.len().saturating_sub(quote_len).max(body_start);
    let body = raw.as_bytes().get(body_start..body_end).unwrap_or_default();

    let mut segment_start = 0;
    let mut depth = 0_usize;
    let mut open = 0;
    let mut i = 0;
    while let Some(&byte) = body.get(i) {
        let next = body.get(i + 1).copied();
        match (byte, next) {
            (b'{', Some(b'{')) | (b'}', Some(b'}')) => {
                i += 2;
                continue;
            }
            (b'{', _) => {
                if depth == 0 {
                    open = i;
                }
                depth += 1;
            }
            (b'}', _) if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let from = body_start + open;
                    let to = body_start + i + 1;
                    if from > segment_start {
                        out.emit(start + segment_start, start + from, TokenKind::String, 8);
                    }
                    out.emit(start + from, start + to, TokenKind::Interpolation, 12);
                    segment_start = to;
                }
            }
            _ => {}
        }
        i += 1;
    }
    if raw.len() > segment_start {
        out.emit(start + segment_start, start + raw.len(), TokenKind::String, 8);
    }
}

/// Builds the Python rule set.
pub(super) fn rules() -> Result<RuleSet, HighlightError> {
    Ok(RuleSet::new("python").with_name("Python").with_rules([
        simple(r"#[^\n]*", TokenKind::Comment, 10)?,
        keywords(KEYWORDS)?,
        simple(NUMBER, TokenKind::Number, 6)?,
        simple(STRING_DQ, TokenKind::String, 6)?,
        simple(STRING_SQ, TokenKind::String, 6)?,
        simple(r#""""(?s:.*?)""""#, TokenKind::String, 6)?,
        simple(r"'''(?s:.*?)'''", TokenKind::String, 6)?,
        Rule::composite(Pattern::new(FORMAT_STRING)?, 11, emit_format_string),
        focused(&format!(r"\b({IDENT})\s*\("), 1, TokenKind::Function, 7)?,
        focused(&format!(r"\.({IDENT})"), 1, TokenKind::Property, 5)?,
        simple(&format!(r"\b{IDENT}\b"), TokenKind::Variable, 1)?,
        simple(r"[{}()\[\].,;:@]", TokenKind::Punctuation, 1)?,
        simple(
            r"[+\-*/%=&|^!<>]=?|\|\||&&|\*\*|:=",
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
    fn python() -> RuleSet {
        rules().expect("python rules compile")
    }

    fn labelled<'t>(text: &'t str, rule_set: &RuleSet) -> Vec<(&'t str, TokenKind)> {
        resolve(text, rule_set)
            .iter()
            .filter_map(|span| span.text(text).map(|slice| (slice, span.kind)))
            .collect()
    }

    #[rstest]
    fn function_definition(python: RuleSet) {
        assert_eq!(
            labelled("def f(x): # done", &python),
            vec![
                ("def", TokenKind::Keyword),
                ("f", TokenKind::Function),
                ("(", TokenKind::Punctuation),
                ("x", TokenKind::Variable),
                (")", TokenKind::Punctuation),
                (":", TokenKind::Punctuation),
                ("# done", TokenKind::Comment),
            ]
        );
    }

    #[rstest]
    fn format_string_interpolations_survive_selection(python: RuleSet) {
        assert_eq!(
            labelled(r#"f"a{b}c""#, &python),
            vec![
                (r#"f"a"#, TokenKind::String),
                ("{b}", TokenKind::Interpolation),
                (r#"c""#, TokenKind::String),
            ]
        );
    }

    #[rstest]
    #[case(r#"f"{{x}}""#)]
    #[case(r"rf'{{}}'")]
    fn doubled_braces_are_not_interpolations(python: RuleSet, #[case] text: &str) {
        assert_eq!(labelled(text, &python), vec![(text, TokenKind::String)]);
    }

    #[rstest]
    fn nested_braces_form_one_interpolation(python: RuleSet) {
        let text = r#"f"{d[{1: 2}[1]]}!""#;
        let tokens = labelled(text, &python);
        assert!(
            tokens.contains(&("{d[{1: 2}[1]]}", TokenKind::Interpolation)),
            "{tokens:?}"
        );
    }

    #[rstest]
    fn triple_quoted_strings_span_lines(python: RuleSet) {
        let text = "'''a\n'b'\n'''";
        assert_eq!(labelled(text, &python), vec![(text, TokenKind::String)]);
    }

    #[rstest]
    fn walrus_and_constants(python: RuleSet) {
        let tokens = labelled("if (n := None):", &python);
        assert!(tokens.contains(&(":=", TokenKind::Operator)));
        assert!(tokens.contains(&("None", TokenKind::Keyword)));
    }
}
