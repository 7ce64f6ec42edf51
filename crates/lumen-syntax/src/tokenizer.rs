//! Rule execution engine.
//!
//! Turns a [`RuleSet`] into a flat candidate list, reduces it to a
//! non-overlapping cover, runs the optional refinement pass and finally the
//! rainbow bracket pass.

use tracing::debug;

use crate::priority::resolve_cover;
use crate::rainbow::{DEFAULT_ANGLE_SCAN_LIMIT, RainbowOptions, apply_rainbow_brackets};
use crate::rule::{Emitter, Rule, RuleSet};
use crate::span::Span;

/// Whether type-parameter angle brackets take part in the rainbow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleBrackets {
    /// Enabled for TypeScript dialects, detected from the rule-set id
    /// (`typescript`, or any id containing `ts` such as `tsx`).
    #[default]
    Auto,
    /// Always attempt angle brackets.
    Enabled,
    /// Never attempt angle brackets.
    Disabled,
}

impl AngleBrackets {
    /// Resolves the mode against a rule set.
    #[must_use]
    pub fn resolve(self, rule_set: &RuleSet) -> bool {
        match self {
            Self::Auto => {
                let id = rule_set.id().to_ascii_lowercase();
                id.contains("typescript") || id.contains("ts")
            }
            Self::Enabled => true,
            Self::Disabled => false,
        }
    }
}

/// Options for [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Runs the rainbow bracket pass.
    pub rainbow: bool,
    /// Angle-bracket mode for the rainbow pass.
    pub angle_brackets: AngleBrackets,
    /// Forward scan limit used when looking for a closing angle bracket.
    pub angle_scan_limit: usize,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            rainbow: true,
            angle_brackets: AngleBrackets::Auto,
            angle_scan_limit: DEFAULT_ANGLE_SCAN_LIMIT,
        }
    }
}

/// Applies every rule to `text` and returns the unsorted candidate spans.
///
/// Rules run in declaration order. Simple rules emit one span per match
/// covering the pattern's focus group; composite rules hand each match to
/// their emitter.
#[must_use]
pub fn collect_candidates(text: &str, rule_set: &RuleSet) -> Vec<Span> {
    let mut candidates = Vec::new();
    for rule in rule_set.rules() {
        match rule {
            Rule::Simple {
                pattern,
                kind,
                priority,
            } => {
                for captures in pattern.matches(text) {
                    if let Some(range) = pattern.focus_range(&captures) {
                        candidates.push(Span {
                            priority: *priority,
                            ..Span::new(range.start, range.end, *kind)
                        });
                    }
                }
            }
            Rule::Composite {
                pattern,
                emit,
                priority,
            } => {
                let mut emitter = Emitter::new(&mut candidates, *priority, text.len());
                for captures in pattern.matches(text) {
                    emit(text, &captures, &mut emitter);
                }
            }
        }
    }
    candidates
}

/// Produces the resolved, non-overlapping token list for `text`.
///
/// Candidates are sorted and reduced by cover selection. If the rule set has a
/// refinement pass its result is returned as is.
#[must_use]
pub fn resolve(text: &str, rule_set: &RuleSet) -> Vec<Span> {
    let candidates = collect_candidates(text, rule_set);
    let candidate_count = candidates.len();
    let cover = resolve_cover(candidates);
    debug!(
        language = rule_set.id(),
        candidates = candidate_count,
        selected = cover.len(),
        "resolved token cover"
    );
    match rule_set.refinement() {
        Some(refine) => refine(cover, text),
        None => cover,
    }
}

/// Runs the full pipeline: rule execution followed by the rainbow pass.
///
/// # Examples
///
/// ```
/// use lumen_syntax::{SupportedLanguage, TokenKind, TokenizeOptions, tokenize};
///
/// let rules = SupportedLanguage::JavaScript.rule_set()?;
/// let tokens = tokenize("f(x)", rules, &TokenizeOptions::default());
/// assert_eq!(tokens[0].kind, TokenKind::Function);
/// # Ok::<(), lumen_syntax::HighlightError>(())
/// ```
#[must_use]
pub fn tokenize(text: &str, rule_set: &RuleSet, options: &TokenizeOptions) -> Vec<Span> {
    let resolved = resolve(text, rule_set);
    if !options.rainbow {
        return resolved;
    }
    let rainbow = RainbowOptions {
        angle_brackets: options.angle_brackets.resolve(rule_set),
        angle_scan_limit: options.angle_scan_limit,
    };
    apply_rainbow_brackets(text, resolved, &rainbow)
}
