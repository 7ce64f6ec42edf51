//! Lexical annotation for source text.
//!
//! This crate turns plain text into a flat, ordered, non-overlapping list of
//! labelled [`Span`]s:
//!
//! - **Rules** via [`RuleSet`]: ordered regex-driven rules, either simple
//!   (one label per match) or composite (an emitter decomposes each match)
//! - **Cover selection** via [`resolve_cover`]: the competing candidates are
//!   ordered by [`by_span_priority`] and greedily reduced to a cover
//! - **Rainbow delimiters** via [`apply_rainbow_brackets`]: matched `()`,
//!   `[]`, `{}` (and, for TypeScript dialects, `<>`) are labelled by nesting
//!   depth
//! - **Rendering** via [`render_html`] and [`render_document`]
//!
//! # Supported Languages
//!
//! - JavaScript (`.js`, `.mjs`, `.cjs`) and JSX (`.jsx`)
//! - TypeScript (`.ts`, `.mts`, `.cts`) and TSX (`.tsx`)
//! - Python (`.py`, `.pyi`)
//! - LaTeX (`.tex`, `.sty`, `.cls`, `.ltx`)
//!
//! # Example
//!
//! ```
//! use lumen_syntax::{BuiltinTheme, SupportedLanguage, TokenizeOptions, render_html, tokenize};
//!
//! let source = "const xs = [f(1), g(2)];";
//! let rules = SupportedLanguage::JavaScript.rule_set()?;
//! let tokens = tokenize(source, rules, &TokenizeOptions::default());
//! let html = render_html(source, &tokens, &BuiltinTheme::JsDark.theme());
//! assert!(html.contains("tok-bracket1"));
//! # Ok::<(), lumen_syntax::HighlightError>(())
//! ```
//!
//! Offsets are byte offsets into the UTF-8 input and always fall on
//! character boundaries.

mod error;
mod languages;
mod priority;
mod rainbow;
mod render;
mod rule;
mod span;
mod theme;
mod tokenizer;

pub use error::HighlightError;
pub use languages::{LanguageParseError, SupportedLanguage};
pub use priority::{by_span_priority, resolve_cover, select_non_overlapping, sort_spans};
pub use rainbow::{
    BRACKET_PRIORITY, DEFAULT_ANGLE_SCAN_LIMIT, OPAQUE_KINDS, RainbowOptions,
    apply_rainbow_brackets, apply_rainbow_brackets_with_reserved, markup_delimiter_positions,
};
pub use render::{RenderOptions, escape_html, render_document, render_html};
pub use rule::{EmitFn, Emitter, Pattern, PatternMatches, RefineFn, Rule, RuleSet};
pub use span::{DEPTH_CLASSES, META_CHAR, META_MARKUP, Metadata, Span, TokenKind};
pub use theme::{BuiltinTheme, Theme};
pub use tokenizer::{AngleBrackets, TokenizeOptions, collect_candidates, resolve, tokenize};

#[cfg(test)]
mod tests;
