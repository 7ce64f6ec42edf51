//! Span ordering and greedy cover selection.
//!
//! Every pass that merges competing spans goes through the same two
//! primitives: [`by_span_priority`] orders candidates, and
//! [`select_non_overlapping`] sweeps the ordered list keeping the first span
//! to claim each region.

use std::cmp::Ordering;

use crate::span::Span;

/// Total order used whenever two spans compete for the same text.
///
/// Keys, in order of precedence:
///
/// 1. ascending start offset;
/// 2. descending priority, an absent priority counting as zero;
/// 3. descending length.
///
/// Spans equal under all three keys compare as equal, so a stable sort keeps
/// their original relative order.
#[must_use]
pub fn by_span_priority(a: &Span, b: &Span) -> Ordering {
    a.from
        .cmp(&b.from)
        .then_with(|| b.effective_priority().cmp(&a.effective_priority()))
        .then_with(|| b.len().cmp(&a.len()))
}

/// Sorts spans in place using [`by_span_priority`].
pub fn sort_spans(spans: &mut [Span]) {
    spans.sort_by(by_span_priority);
}

/// Greedily selects a non-overlapping subsequence of pre-sorted spans.
///
/// A span is kept when it starts at or after the exclusive end of the last
/// kept span; otherwise it is dropped without being merged or truncated.
#[must_use]
pub fn select_non_overlapping<I>(spans: I) -> Vec<Span>
where
    I: IntoIterator<Item = Span>,
{
    let mut selected = Vec::new();
    let mut cursor = 0;
    for span in spans {
        if span.from >= cursor {
            cursor = span.to;
            selected.push(span);
        }
    }
    selected
}

/// Sorts the candidates and reduces them to a non-overlapping cover.
#[must_use]
pub fn resolve_cover(mut spans: Vec<Span>) -> Vec<Span> {
    sort_spans(&mut spans);
    select_non_overlapping(spans)
}
