//! LaTeX rule table.
//!
//! Only delimiters and command names are labelled; math and environment
//! bodies stay open to the other rules and to the rainbow pass.

use regex::Captures;

use super::shared::simple;
use crate::error::HighlightError;
use crate::rule::{Emitter, Pattern, Rule, RuleSet};
use crate::span::TokenKind;

const REFERENCE_COMMANDS: &[&str] = &[
    "label",
    "ref",
    "eqref",
    "pageref",
    "autoref",
    "nameref",
    "vref",
    "Vref",
    "cref",
    "Cref",
    "cite",
    "citep",
    "citet",
    "citet*",
    "citep*",
    "citeauthor",
    "citeyear",
];

/// `\begin` or `\end` (backslash included) as a declaration keyword and the
/// environment name as a type.
fn emit_environment(_text: &str, captures: &Captures<'_>, out: &mut Emitter<'_>) {
    if let Some(command) = captures.get(1) {
        let from = command.start().saturating_sub(1);
        out.emit(from, command.end(), TokenKind::KeywordDecl, 9);
    }
    if let Some(name) = captures.get(2).filter(|m| !m.is_empty()) {
        out.emit(name.start(), name.end(), TokenKind::Type, 9);
    }
}

/// The key of a label, reference or citation command.
fn emit_reference_key(_text: &str, captures: &Captures<'_>, out: &mut Emitter<'_>) {
    if let Some(key) = captures.get(1).filter(|m| !m.is_empty()) {
        out.emit(key.start(), key.end(), TokenKind::Variable, 8);
    }
}

/// Builds the LaTeX rule set.
pub(super) fn rules() -> Result<RuleSet, HighlightError> {
    let references = REFERENCE_COMMANDS
        .iter()
        .map(|command| regex::escape(command))
        .collect::<Vec<_>>()
        .join("|");
    Ok(RuleSet::new("latex").with_name("LaTeX").with_rules([
        simple(r"%[^\n]*", TokenKind::Comment, 10)?,
        Rule::composite(
            Pattern::new(r"\\(begin|end)\s*\{([^}]*)\}")?,
            9,
            emit_environment,
        ),
        simple(r"\\[\\{}$%&#_^~]", TokenKind::Operator, 8)?,
        simple(r"\\[A-Za-z@]+", TokenKind::Function, 7)?,
        simple(r"\$\$|\$|\\\[|\\\]|\\\(|\\\)", TokenKind::Operator, 7)?,
        Rule::composite(
            Pattern::new(&format!(r"\\(?:{references})\s*\{{([^}}]*)\}}"))?,
            8,
            emit_reference_key,
        ),
        simple(
            r"\b[0-9]+(?:\.[0-9]+)?(?:pt|bp|mm|cm|in|ex|em|pc)?\b",
            TokenKind::Number,
            6,
        )?,
        simple(r"[{}\[\](),.;:]", TokenKind::Punctuation, 1)?,
        simple(r"[+\-*/=^&_]", TokenKind::Operator, 1)?,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::resolve;
    use rstest::{fixture, rstest};

    #[fixture]
    fn latex() -> RuleSet {
        rules().expect("latex rules compile")
    }

    fn labelled<'t>(text: &'t str, rule_set: &RuleSet) -> Vec<(&'t str, TokenKind)> {
        resolve(text, rule_set)
            .iter()
            .filter_map(|span| span.text(text).map(|slice| (slice, span.kind)))
            .collect()
    }

    #[rstest]
    fn environments(latex: RuleSet) {
        assert_eq!(
            labelled(r"\begin{itemize} % list", &latex),
            vec![
                (r"\begin", TokenKind::KeywordDecl),
                ("{", TokenKind::Punctuation),
                ("itemize", TokenKind::Type),
                ("}", TokenKind::Punctuation),
                ("% list", TokenKind::Comment),
            ]
        );
    }

    #[rstest]
    #[case(r"\ref{fig:a}", "fig:a")]
    #[case(r"\citet*{knuth84}", "knuth84")]
    #[case(r"\label {sec}", "sec")]
    fn reference_keys(latex: RuleSet, #[case] text: &str, #[case] key: &str) {
        let tokens = labelled(text, &latex);
        assert!(tokens.contains(&(key, TokenKind::Variable)), "{tokens:?}");
    }

    #[rstest]
    fn escaped_percent_is_not_a_comment(latex: RuleSet) {
        let tokens = labelled(r"50\% off", &latex);
        assert_eq!(
            tokens,
            vec![("50", TokenKind::Number), (r"\%", TokenKind::Operator)]
        );
    }

    #[rstest]
    fn dimensions_and_math(latex: RuleSet) {
        let tokens = labelled(r"\hspace{12pt} $x^2$", &latex);
        assert!(tokens.contains(&(r"\hspace", TokenKind::Function)));
        assert!(tokens.contains(&("12pt", TokenKind::Number)));
        assert!(tokens.contains(&("$", TokenKind::Operator)));
        assert!(tokens.contains(&("^", TokenKind::Operator)));
    }
}
