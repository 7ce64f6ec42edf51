//! Labelled spans over source text.
//!
//! A [`Span`] is the atomic output unit of the tokenizer: a half-open byte
//! range `[from, to)` carrying a [`TokenKind`], an optional priority used to
//! break ties between competing candidates, and optional metadata used by
//! later passes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Number of cyclic depth classes used for nested delimiters.
pub const DEPTH_CLASSES: usize = 3;

/// Metadata key flagging a delimiter claimed by a markup-tag rule.
pub const META_MARKUP: &str = "markup";

/// Metadata key recording the delimiter character of a markup span.
pub const META_CHAR: &str = "ch";

/// Pass-specific flags attached to a span.
pub type Metadata = BTreeMap<String, Value>;

/// Label assigned to a span.
///
/// The set is open: [`TokenKind::Custom`] carries labels defined by rule
/// authors outside the built-in vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Line or block comment.
    Comment,
    /// Quoted literal.
    String,
    /// Numeric literal.
    Number,
    /// Reserved word.
    Keyword,
    /// Declaration keyword (`interface`, `\begin`, ...).
    KeywordDecl,
    /// Boolean literal.
    Boolean,
    /// Null-like literal.
    Null,
    /// Regular-expression literal.
    Regex,
    /// Operator.
    Operator,
    /// Punctuation.
    Punctuation,
    /// Function or command name.
    Function,
    /// Plain identifier.
    Variable,
    /// Member access.
    Property,
    /// Type name.
    Type,
    /// Namespace name.
    Namespace,
    /// Built-in or decorator.
    Builtin,
    /// Interpolation inside a literal.
    Interpolation,
    /// Plain text.
    Text,
    /// Markup tag name.
    Tag,
    /// Markup attribute name.
    AttrName,
    /// Markup attribute value.
    AttrValue,
    /// Delimiter at nesting depth `0 mod 3`.
    Bracket0,
    /// Delimiter at nesting depth `1 mod 3`.
    Bracket1,
    /// Delimiter at nesting depth `2 mod 3`.
    Bracket2,
    /// Label defined outside the built-in vocabulary.
    Custom(&'static str),
}

impl TokenKind {
    /// Returns the depth class for a delimiter opened at `depth`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_syntax::TokenKind;
    ///
    /// assert_eq!(TokenKind::depth_class(0), TokenKind::Bracket0);
    /// assert_eq!(TokenKind::depth_class(4), TokenKind::Bracket1);
    /// ```
    #[must_use]
    pub const fn depth_class(depth: usize) -> Self {
        match depth.rem_euclid(DEPTH_CLASSES) {
            0 => Self::Bracket0,
            1 => Self::Bracket1,
            _ => Self::Bracket2,
        }
    }

    /// Returns whether this is one of the cyclic depth classes.
    #[must_use]
    pub const fn is_depth_class(self) -> bool {
        matches!(self, Self::Bracket0 | Self::Bracket1 | Self::Bracket2)
    }

    /// Returns the identifier used for CSS classes, theme keys and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Keyword => "keyword",
            Self::KeywordDecl => "keywordDecl",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Regex => "regex",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Property => "property",
            Self::Type => "type",
            Self::Namespace => "namespace",
            Self::Builtin => "builtin",
            Self::Interpolation => "interpolation",
            Self::Text => "text",
            Self::Tag => "tag",
            Self::AttrName => "attrName",
            Self::AttrValue => "attrValue",
            Self::Bracket0 => "bracket0",
            Self::Bracket1 => "bracket1",
            Self::Bracket2 => "bracket2",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A labelled half-open byte range `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Inclusive start offset.
    pub from: usize,
    /// Exclusive end offset.
    pub to: usize,
    /// Label assigned to the range.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Tie-break priority; absent counts as zero and higher wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Pass-specific flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
}

impl Span {
    /// Creates a span without priority or metadata.
    #[must_use]
    pub const fn new(from: usize, to: usize, kind: TokenKind) -> Self {
        Self {
            from,
            to,
            kind,
            priority: None,
            meta: None,
        }
    }

    /// Sets the tie-break priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }

    /// Creates a single-byte punctuation span claimed by a markup-tag rule.
    #[must_use]
    pub fn markup_delimiter(at: usize, ch: char, priority: i32) -> Self {
        Self::new(at, at + ch.len_utf8(), TokenKind::Punctuation)
            .with_priority(priority)
            .with_meta(META_MARKUP, true)
            .with_meta(META_CHAR, ch.to_string())
    }

    /// Returns the delimiter character when this span was claimed by a
    /// markup-tag rule.
    #[must_use]
    pub fn markup_char(&self) -> Option<char> {
        let meta = self.meta.as_ref()?;
        if meta.get(META_MARKUP).and_then(Value::as_bool) != Some(true) {
            return None;
        }
        let mut chars = meta.get(META_CHAR)?.as_str()?.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    /// Priority used for ordering, treating an absent priority as zero.
    #[must_use]
    pub const fn effective_priority(&self) -> i32 {
        match self.priority {
            Some(priority) => priority,
            None => 0,
        }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Returns whether the range is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.to <= self.from
    }

    /// Returns whether `pos` lies inside the range.
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        self.from <= pos && pos < self.to
    }

    /// Returns whether the two ranges share at least one offset.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Returns the covered text, if the range is valid for `text`.
    #[must_use]
    pub fn text<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.from..self.to)
    }
}
