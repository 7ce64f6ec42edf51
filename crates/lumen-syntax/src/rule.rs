//! Rules and rule sets.
//!
//! A [`RuleSet`] is the declarative description of an input dialect: an
//! ordered list of [`Rule`]s plus an optional refinement pass. Rules pair a
//! [`Pattern`] with label assignment logic, either a fixed label
//! ([`Rule::Simple`]) or an emitter procedure ([`Rule::Composite`]) that
//! decomposes one match into several spans.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use regex::{Captures, Regex};

use crate::error::HighlightError;
use crate::span::{Span, TokenKind};

/// Emitter procedure of a composite rule.
///
/// Receives the full input text, the captures of one match, and an
/// [`Emitter`] collecting the spans derived from that match.
pub type EmitFn = Arc<dyn Fn(&str, &Captures<'_>, &mut Emitter<'_>) + Send + Sync>;

/// Post-selection refinement pass of a rule set.
///
/// Receives the selected cover and the input text and returns the final span
/// list. The result is not re-selected, so the function must keep spans
/// ordered and disjoint.
pub type RefineFn = Arc<dyn Fn(Vec<Span>, &str) -> Vec<Span> + Send + Sync>;

/// A compiled pattern evaluated globally across the input.
///
/// The *focus group* selects which capture group becomes the span of a
/// simple rule. Group 0 (the default) is the whole match; a higher group
/// lets a pattern require surrounding context without labelling it.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    focus: usize,
}

impl Pattern {
    /// Compiles a pattern whose whole match is labelled.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::InvalidPattern`] if the regex does not
    /// compile.
    pub fn new(source: &str) -> Result<Self, HighlightError> {
        Self::with_focus(source, 0)
    }

    /// Compiles a pattern whose capture group `focus` is labelled.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::InvalidPattern`] if the regex does not
    /// compile.
    pub fn with_focus(source: &str, focus: usize) -> Result<Self, HighlightError> {
        let regex =
            Regex::new(source).map_err(|err| HighlightError::invalid_pattern(source, err))?;
        Ok(Self { regex, focus })
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the focus group index.
    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// Iterates over every match in `text`, left to right.
    ///
    /// After a zero-length match the scan resumes one character further, so
    /// patterns that can match the empty string still terminate.
    #[must_use]
    pub const fn matches<'p, 't>(&'p self, text: &'t str) -> PatternMatches<'p, 't> {
        PatternMatches {
            pattern: self,
            text,
            cursor: 0,
        }
    }

    /// Returns the byte range of the focus group within `captures`.
    #[must_use]
    pub fn focus_range(&self, captures: &Captures<'_>) -> Option<Range<usize>> {
        captures.get(self.focus).map(|m| m.range())
    }
}

/// Iterator over the matches of a [`Pattern`].
#[derive(Debug)]
pub struct PatternMatches<'p, 't> {
    pattern: &'p Pattern,
    text: &'t str,
    cursor: usize,
}

impl<'t> Iterator for PatternMatches<'_, 't> {
    type Item = Captures<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor > self.text.len() {
            return None;
        }
        let captures = self.pattern.regex.captures_at(self.text, self.cursor)?;
        let whole = captures.get(0)?;
        self.cursor = if whole.is_empty() {
            step_past(self.text, whole.end())
        } else {
            whole.end()
        };
        Some(captures)
    }
}

/// Returns the offset one character after `pos`, or past the end of `text`.
fn step_past(text: &str, pos: usize) -> usize {
    text.get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(pos + 1, |ch| pos + ch.len_utf8())
}

/// Collects the spans emitted by composite rules.
///
/// Spans pushed without a priority inherit the priority of the rule that
/// produced them.
pub struct Emitter<'a> {
    sink: &'a mut Vec<Span>,
    default_priority: Option<i32>,
    text_len: usize,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(
        sink: &'a mut Vec<Span>,
        default_priority: Option<i32>,
        text_len: usize,
    ) -> Self {
        Self {
            sink,
            default_priority,
            text_len,
        }
    }

    /// Pushes a span, defaulting its priority to the rule's.
    pub fn push(&mut self, mut span: Span) {
        debug_assert!(
            span.from <= span.to && span.to <= self.text_len,
            "span {}..{} is out of bounds for text of length {}",
            span.from,
            span.to,
            self.text_len
        );
        if span.priority.is_none() {
            span.priority = self.default_priority;
        }
        self.sink.push(span);
    }

    /// Pushes a span with an explicit priority.
    pub fn emit(&mut self, from: usize, to: usize, kind: TokenKind, priority: i32) {
        self.push(Span::new(from, to, kind).with_priority(priority));
    }
}

impl fmt::Debug for Emitter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("emitted", &self.sink.len())
            .field("default_priority", &self.default_priority)
            .finish()
    }
}

/// A pattern plus label assignment logic.
#[derive(Clone)]
pub enum Rule {
    /// Every match becomes exactly one span covering the focus group.
    Simple {
        /// Pattern evaluated across the input.
        pattern: Pattern,
        /// Label of every emitted span.
        kind: TokenKind,
        /// Priority of every emitted span.
        priority: Option<i32>,
    },
    /// Every match is handed to an emitter that may push any number of spans.
    Composite {
        /// Pattern evaluated across the input.
        pattern: Pattern,
        /// Procedure deriving spans from one match.
        emit: EmitFn,
        /// Priority given to emitted spans that carry none.
        priority: Option<i32>,
    },
}

impl Rule {
    /// Creates a simple rule.
    #[must_use]
    pub fn simple(pattern: Pattern, kind: TokenKind, priority: i32) -> Self {
        Self::Simple {
            pattern,
            kind,
            priority: Some(priority),
        }
    }

    /// Creates a composite rule.
    #[must_use]
    pub fn composite<F>(pattern: Pattern, priority: i32, emit: F) -> Self
    where
        F: Fn(&str, &Captures<'_>, &mut Emitter<'_>) + Send + Sync + 'static,
    {
        Self::Composite {
            pattern,
            emit: Arc::new(emit),
            priority: Some(priority),
        }
    }

    /// Returns the rule's pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        match self {
            Self::Simple { pattern, .. } | Self::Composite { pattern, .. } => pattern,
        }
    }

    /// Returns the rule's declared priority.
    #[must_use]
    pub const fn priority(&self) -> Option<i32> {
        match self {
            Self::Simple { priority, .. } | Self::Composite { priority, .. } => *priority,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple {
                pattern,
                kind,
                priority,
            } => f
                .debug_struct("Simple")
                .field("pattern", &pattern.as_str())
                .field("kind", kind)
                .field("priority", priority)
                .finish(),
            Self::Composite {
                pattern, priority, ..
            } => f
                .debug_struct("Composite")
                .field("pattern", &pattern.as_str())
                .field("priority", priority)
                .finish_non_exhaustive(),
        }
    }
}

/// An ordered collection of rules describing one input dialect.
#[derive(Clone)]
pub struct RuleSet {
    id: String,
    name: Option<String>,
    rules: Vec<Rule>,
    refine: Option<RefineFn>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            rules: Vec::new(),
            refine: None,
        }
    }

    /// Sets the human-readable name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends several rules, keeping their order.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Installs the post-selection refinement pass.
    #[must_use]
    pub fn with_refinement<F>(mut self, refine: F) -> Self
    where
        F: Fn(Vec<Span>, &str) -> Vec<Span> + Send + Sync + 'static,
    {
        self.refine = Some(Arc::new(refine));
        self
    }

    /// Derives a rule set that runs this set's rules followed by `extra`.
    ///
    /// The refinement pass is inherited; the name defaults to `id`.
    #[must_use]
    pub fn extend(
        &self,
        id: impl Into<String>,
        extra: impl IntoIterator<Item = Rule>,
        name: Option<&str>,
    ) -> Self {
        let derived_id = id.into();
        let display_name = name.map_or_else(|| derived_id.clone(), str::to_owned);
        Self {
            id: derived_id,
            name: Some(display_name),
            rules: self.rules.iter().cloned().chain(extra).collect(),
            refine: self.refine.clone(),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name, falling back to the identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Returns the rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the refinement pass, if any.
    #[must_use]
    pub fn refinement(&self) -> Option<&RefineFn> {
        self.refine.as_ref()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field("refine", &self.refine.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_ranges(pattern: &Pattern, text: &str) -> Vec<Range<usize>> {
        pattern
            .matches(text)
            .filter_map(|caps| pattern.focus_range(&caps))
            .collect()
    }

    #[test]
    fn matches_are_global_and_ordered() {
        let pattern = Pattern::new(r"\d+").expect("compile");
        assert_eq!(match_ranges(&pattern, "a1 b22 c333"), vec![1..2, 4..6, 8..11]);
    }

    #[test]
    fn zero_length_matches_terminate() {
        let pattern = Pattern::new("x*").expect("compile");
        let ranges = match_ranges(&pattern, "ab");
        assert_eq!(ranges, vec![0..0, 1..1, 2..2]);
    }

    #[test]
    fn zero_length_matches_step_over_multibyte_characters() {
        let pattern = Pattern::new("").expect("compile");
        let ranges = match_ranges(&pattern, "é!");
        assert_eq!(ranges, vec![0..0, 2..2, 3..3]);
    }

    #[test]
    fn focus_group_narrows_the_labelled_range() {
        let pattern = Pattern::with_focus(r"([a-z]+)\s*\(", 1).expect("compile");
        assert_eq!(match_ranges(&pattern, "call (x)"), vec![0..4]);
    }

    #[test]
    fn invalid_patterns_are_reported() {
        let err = Pattern::new("(").expect_err("unbalanced group must fail");
        assert!(matches!(err, HighlightError::InvalidPattern { .. }));
    }

    #[test]
    fn extend_appends_rules_after_base() {
        let base = RuleSet::new("base").with_rule(Rule::simple(
            Pattern::new("a").expect("compile"),
            TokenKind::Keyword,
            1,
        ));
        let derived = base.extend(
            "derived",
            [Rule::simple(
                Pattern::new("b").expect("compile"),
                TokenKind::Variable,
                2,
            )],
            None,
        );
        let sources: Vec<_> = derived.rules().iter().map(|r| r.pattern().as_str()).collect();
        assert_eq!(sources, vec!["a", "b"]);
        assert_eq!(derived.name(), "derived");
        assert_eq!(base.rules().len(), 1);
    }
}
