//! Nested-delimiter depth matching ("rainbow brackets").
//!
//! A second pass over the raw text that pairs `()`, `{}`, `[]` and, when
//! enabled, type-parameter `<>` delimiters, labelling each pair with a cyclic
//! depth class. Regions already resolved as opaque content (literals,
//! comments) are never scanned, and angle brackets claimed by a markup-tag
//! rule are never reconsidered.
//!
//! Angle brackets are syntactically overloaded, so they only open a pair when
//! a set of local heuristics accepts them:
//!
//! - the `<` is not a markup delimiter and is not followed by `=`, `<` or `/`;
//! - the previous non-space byte is an identifier byte or one of `) ] } >`;
//! - the next non-space byte is an identifier byte, `{` or `[`;
//! - a plausible closing `>` exists within [`DEFAULT_ANGLE_SCAN_LIMIT`] bytes.
//!
//! This is best-effort: `a<b && c>(d)` is classified as a type-parameter pair,
//! because a `(` may follow a closing type argument list.

use std::collections::BTreeSet;
use std::ops::Range;

use tracing::{debug, trace};

use crate::priority::resolve_cover;
use crate::span::{Span, TokenKind};

/// Default forward scan limit when looking for a closing angle bracket.
pub const DEFAULT_ANGLE_SCAN_LIMIT: usize = 2000;

/// Priority of the synthetic depth-class spans.
pub const BRACKET_PRIORITY: i32 = 20;

/// Labels whose spans are opaque to delimiter scanning.
pub const OPAQUE_KINDS: [TokenKind; 4] = [
    TokenKind::String,
    TokenKind::Comment,
    TokenKind::Regex,
    TokenKind::AttrValue,
];

/// Configuration of the rainbow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainbowOptions {
    /// Attempts type-parameter angle brackets.
    pub angle_brackets: bool,
    /// Forward scan limit used when looking for a closing angle bracket.
    pub angle_scan_limit: usize,
}

impl Default for RainbowOptions {
    fn default() -> Self {
        Self {
            angle_brackets: false,
            angle_scan_limit: DEFAULT_ANGLE_SCAN_LIMIT,
        }
    }
}

/// An open delimiter awaiting its closer.
#[derive(Debug, Clone, Copy)]
struct Frame {
    delimiter: u8,
    position: usize,
    depth: usize,
}

/// Membership test over sorted exclusion regions for ascending positions.
///
/// The cursor only moves forward, so a left-to-right scan costs amortised
/// constant time per position. Positions must be queried in non-decreasing
/// order.
#[derive(Debug, Clone, Copy)]
struct ExclusionCursor<'a> {
    regions: &'a [Range<usize>],
    next: usize,
}

impl<'a> ExclusionCursor<'a> {
    const fn new(regions: &'a [Range<usize>]) -> Self {
        Self { regions, next: 0 }
    }

    fn contains(&mut self, pos: usize) -> bool {
        while self
            .regions
            .get(self.next)
            .is_some_and(|region| region.end <= pos)
        {
            self.next += 1;
        }
        self.regions
            .get(self.next)
            .is_some_and(|region| region.contains(&pos))
    }
}

/// Positions of `<` and `>` delimiters claimed by a markup-tag rule.
#[must_use]
pub fn markup_delimiter_positions(spans: &[Span]) -> BTreeSet<usize> {
    spans
        .iter()
        .filter(|span| span.kind == TokenKind::Punctuation)
        .filter(|span| matches!(span.markup_char(), Some('<' | '>')))
        .map(|span| span.from)
        .collect()
}

/// Adds depth-class spans for matched delimiters to a resolved token list.
///
/// Markup delimiter positions are derived from `spans` (see
/// [`markup_delimiter_positions`]).
#[must_use]
pub fn apply_rainbow_brackets(text: &str, spans: Vec<Span>, options: &RainbowOptions) -> Vec<Span> {
    let reserved = markup_delimiter_positions(&spans);
    apply_rainbow_brackets_with_reserved(text, spans, &reserved, options)
}

/// Adds depth-class spans for matched delimiters, with explicit reserved
/// angle positions.
///
/// The synthetic spans are merged with `spans` through cover selection, so
/// delimiters inside earlier-starting spans are dropped.
#[must_use]
pub fn apply_rainbow_brackets_with_reserved(
    text: &str,
    spans: Vec<Span>,
    reserved: &BTreeSet<usize>,
    options: &RainbowOptions,
) -> Vec<Span> {
    let excluded = exclusion_regions(&spans);
    let brackets = BracketScanner {
        bytes: text.as_bytes(),
        excluded: &excluded,
        reserved,
        options,
    }
    .scan();
    debug!(
        brackets = brackets.len(),
        angle_brackets = options.angle_brackets,
        "matched nested delimiters"
    );
    let mut merged = spans;
    merged.extend(brackets);
    resolve_cover(merged)
}

fn exclusion_regions(spans: &[Span]) -> Vec<Range<usize>> {
    let mut regions: Vec<Range<usize>> = spans
        .iter()
        .filter(|span| OPAQUE_KINDS.contains(&span.kind))
        .map(|span| span.from..span.to)
        .collect();
    regions.sort_by_key(|region| region.start);
    regions
}

struct BracketScanner<'a> {
    bytes: &'a [u8],
    excluded: &'a [Range<usize>],
    reserved: &'a BTreeSet<usize>,
    options: &'a RainbowOptions,
}

impl BracketScanner<'_> {
    fn scan(&self) -> Vec<Span> {
        let mut out = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut cursor = ExclusionCursor::new(self.excluded);

        for (pos, &byte) in self.bytes.iter().enumerate() {
            if cursor.contains(pos) {
                continue;
            }

            if matches!(byte, b'(' | b'{' | b'[') {
                out.push(depth_span(pos, stack.len()));
                stack.push(Frame {
                    delimiter: byte,
                    position: pos,
                    depth: stack.len(),
                });
                continue;
            }

            if self.options.angle_brackets
                && byte == b'<'
                && self.is_likely_angle_open(pos)
                && self.find_angle_close(pos, cursor).is_some()
            {
                out.push(depth_span(pos, stack.len()));
                stack.push(Frame {
                    delimiter: byte,
                    position: pos,
                    depth: stack.len(),
                });
                continue;
            }

            let closes = matches!(byte, b')' | b'}' | b']')
                || (self.options.angle_brackets
                    && byte == b'>'
                    && self.is_likely_angle_close(pos));
            if !closes {
                continue;
            }
            let Some(opener) = opener_for(byte) else {
                continue;
            };
            let Some(index) = stack.iter().rposition(|frame| frame.delimiter == opener) else {
                continue;
            };
            if let Some(frame) = stack.get(index).copied() {
                stack.truncate(index);
                trace!(open = frame.position, close = pos, depth = frame.depth, "paired delimiters");
                out.push(depth_span(pos, frame.depth));
            }
        }

        out
    }

    fn byte(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    fn prev_non_space(&self, pos: usize) -> Option<u8> {
        self.bytes
            .get(..pos)?
            .iter()
            .rev()
            .copied()
            .find(|b| !b.is_ascii_whitespace())
    }

    fn next_non_space(&self, pos: usize) -> Option<u8> {
        self.bytes
            .get(pos + 1..)?
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace())
    }

    fn is_likely_angle_open(&self, pos: usize) -> bool {
        if self.reserved.contains(&pos) {
            return false;
        }
        if matches!(self.byte(pos + 1), Some(b'=' | b'<' | b'/')) {
            return false;
        }
        let (Some(prev), Some(next)) = (self.prev_non_space(pos), self.next_non_space(pos)) else {
            return false;
        };
        let plausible = (is_ident_byte(prev) || matches!(prev, b')' | b']' | b'}' | b'>'))
            && (is_ident_byte(next) || matches!(next, b'{' | b'['));
        if !plausible {
            trace!(pos, "rejected angle bracket opener");
        }
        plausible
    }

    fn is_likely_angle_close(&self, pos: usize) -> bool {
        if self.reserved.contains(&pos) {
            return false;
        }
        if pos > 0 && self.byte(pos - 1) == Some(b'=') {
            return false;
        }
        self.next_non_space(pos).is_none_or(|next| {
            matches!(
                next,
                b')' | b']' | b'}' | b',' | b';' | b':' | b'|' | b'&' | b'=' | b'>' | b'.' | b'('
            )
        })
    }

    /// Looks ahead for a plausible `>` closing the `<` at `open`.
    ///
    /// Uses a copy of the exclusion cursor so the caller's cursor keeps
    /// tracking the main scan position.
    fn find_angle_close(&self, open: usize, mut lookahead: ExclusionCursor<'_>) -> Option<usize> {
        let mut pos = open + 1;
        while pos < self.bytes.len() {
            let skip = lookahead.contains(pos) || self.reserved.contains(&pos);
            if !skip && self.byte(pos) == Some(b'>') && self.is_likely_angle_close(pos) {
                return Some(pos);
            }
            pos += 1;
            if pos - open > self.options.angle_scan_limit {
                break;
            }
        }
        trace!(open, "no plausible closing angle bracket");
        None
    }
}

const fn opener_for(closer: u8) -> Option<u8> {
    match closer {
        b')' => Some(b'('),
        b'}' => Some(b'{'),
        b']' => Some(b'['),
        b'>' => Some(b'<'),
        _ => None,
    }
}

const fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

fn depth_span(pos: usize, depth: usize) -> Span {
    Span::new(pos, pos + 1, TokenKind::depth_class(depth)).with_priority(BRACKET_PRIORITY)
}
