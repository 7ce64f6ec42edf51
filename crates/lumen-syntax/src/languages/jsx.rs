//! JSX markup tags, layered on JavaScript (and on TypeScript for TSX).

use std::ops::Range;

use regex::Captures;

use super::javascript::{self, Interpolation, TEMPLATE, emit_template_segments};
use crate::error::HighlightError;
use crate::rule::{Emitter, Pattern, Rule, RuleSet};
use crate::span::{Span, TokenKind};

/// Named tags (`<Div ...>`, `</Div>`, `<Div .../>`) and fragments.
const TAG: &str = r"(?:</?[A-Za-z][\w$.:~-]*(?:\s+[^<>]*?)?\s*/?>)|(?:</?>)";

/// Priority of the `<`, `/` and `>` delimiters of a tag.
const DELIMITER_PRIORITY: i32 = 15;

/// Sub-patterns applied within one matched tag.
struct TagPatterns {
    name: Pattern,
    attr_with_value: Pattern,
    attr_alone: Pattern,
    value_dq: Pattern,
    value_sq: Pattern,
    template: Pattern,
}

impl TagPatterns {
    fn compile() -> Result<Self, HighlightError> {
        Ok(Self {
            name: Pattern::with_focus(r"^</?\s*([A-Za-z][\w$.:~-]*)", 1)?,
            attr_with_value: Pattern::with_focus(r"([A-Za-z_:][\w:.-]*)\s*=", 1)?,
            attr_alone: Pattern::with_focus(r"(?:^|[\s<])([A-Za-z_:][\w:.-]*)", 1)?,
            value_dq: Pattern::new(r#""(?:[^"\\]|\\.|[\n\r])*""#)?,
            value_sq: Pattern::new(r"'(?:[^'\\]|\\.|[\n\r])*'")?,
            template: Pattern::new(TEMPLATE)?,
        })
    }

    fn emit(&self, captures: &Captures<'_>, out: &mut Emitter<'_>) {
        let Some(whole) = captures.get(0) else {
            return;
        };
        let base = whole.start();
        let raw = whole.as_str();

        emit_delimiters(base, raw, out);

        let name = self
            .name
            .matches(raw)
            .next()
            .and_then(|caps| self.name.focus_range(&caps));
        if let Some(range) = &name {
            out.emit(base + range.start, base + range.end, TokenKind::Tag, 12);
        }

        let braces = brace_ranges(raw.as_bytes());
        let in_brace = |pos: usize| braces.iter().any(|range| range.contains(&pos));

        for range in focus_ranges(&self.attr_with_value, raw) {
            if !in_brace(range.start) {
                out.emit(base + range.start, base + range.end, TokenKind::AttrName, 11);
            }
        }

        let name_end = name.as_ref().map(|range| range.end);
        for range in focus_ranges(&self.attr_alone, raw) {
            let followed_by_boundary = raw.get(range.end..).is_some_and(|rest| {
                rest.starts_with(|c: char| c.is_whitespace())
                    || rest.starts_with('>')
                    || rest.starts_with("/>")
            });
            let after_name = name_end.is_none_or(|end| range.start > end);
            if followed_by_boundary && after_name && !in_brace(range.start) {
                out.emit(base + range.start, base + range.end, TokenKind::AttrName, 10);
            }
        }

        for pattern in [&self.value_dq, &self.value_sq] {
            for range in focus_ranges(pattern, raw) {
                if !in_brace(range.start) {
                    out.emit(base + range.start, base + range.end, TokenKind::AttrValue, 10);
                }
            }
        }

        for brace in &braces {
            let Some(body) = raw.get(brace.clone()) else {
                continue;
            };
            for caps in self.template.matches(body) {
                if let Some(literal) = caps.get(0) {
                    emit_template_segments(
                        base + brace.start + literal.start(),
                        literal.as_str(),
                        Interpolation::Whole,
                        out,
                    );
                }
            }
        }

        for (i, byte) in raw.bytes().enumerate() {
            let escaped = i > 0 && raw.as_bytes().get(i - 1) == Some(&b'\\');
            if matches!(byte, b'{' | b'}') && !escaped {
                out.emit(base + i, base + i + 1, TokenKind::Punctuation, 9);
            }
        }
    }
}

fn focus_ranges(pattern: &Pattern, text: &str) -> Vec<Range<usize>> {
    pattern
        .matches(text)
        .filter_map(|caps| pattern.focus_range(&caps))
        .collect()
}

/// Emits the `<`, optional `/` and `>` delimiters of a tag as markup
/// punctuation.
fn emit_delimiters(base: usize, raw: &str, out: &mut Emitter<'_>) {
    out.push(Span::markup_delimiter(base, '<', DELIMITER_PRIORITY));
    let closing = raw.starts_with("</");
    if closing {
        out.push(Span::markup_delimiter(base + 1, '/', DELIMITER_PRIORITY));
    }
    let Some(gt) = raw.rfind('>') else {
        return;
    };
    if !closing {
        let before = raw.get(..gt).unwrap_or_default().trim_end();
        if before.ends_with('/') {
            let slash = before.len() - 1;
            out.push(Span::markup_delimiter(base + slash, '/', DELIMITER_PRIORITY));
        }
    }
    out.push(Span::markup_delimiter(base + gt, '>', DELIMITER_PRIORITY));
}

/// Top-level `{...}` ranges of a tag, braces included.
fn brace_ranges(bytes: &[u8]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut depth = 0_isize;
    let mut start = None;
    for (i, &byte) in bytes.iter().enumerate() {
        let escaped = i > 0 && bytes.get(i - 1) == Some(&b'\\');
        if escaped {
            continue;
        }
        match byte {
            b'{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    if let Some(open) = start.take() {
                        ranges.push(open..i + 1);
                    }
                }
            }
            _ => {}
        }
    }
    ranges
}

/// Builds the composite rule labelling markup tags.
pub(super) fn markup_tag_rule() -> Result<Rule, HighlightError> {
    let patterns = TagPatterns::compile()?;
    Ok(Rule::composite(
        Pattern::new(TAG)?,
        12,
        move |_text, captures, out| patterns.emit(captures, out),
    ))
}

/// Builds the JSX rule set.
pub(super) fn rules() -> Result<RuleSet, HighlightError> {
    Ok(javascript::rules()?.extend("jsx", [markup_tag_rule()?], Some("JSX")))
}
