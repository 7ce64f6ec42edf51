//! Colour themes.
//!
//! A [`Theme`] maps token kinds to CSS colours plus a handful of editor
//! colours. Themes serialise to a flat JSON object whose colour keys are the
//! token kind identifiers (`keywordDecl`, `bracket0`, ...).

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::HighlightError;
use crate::span::TokenKind;

/// Colour scheme consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Theme {
    /// Page background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Colour of unlabelled text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    /// Caret colour, kept for editor front ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caret: Option<String>,
    /// Selection colour, kept for editor front ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    /// Line-number gutter background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gutter: Option<String>,
    /// Colours keyed by token kind identifier.
    #[serde(flatten)]
    pub colors: BTreeMap<String, String>,
}

impl Theme {
    /// Returns the colour for `kind`, if the theme defines one.
    #[must_use]
    pub fn color(&self, kind: TokenKind) -> Option<&str> {
        self.colors.get(kind.as_str()).map(String::as_str)
    }

    /// Sets the colour for `kind`.
    #[must_use]
    pub fn with_color(mut self, kind: TokenKind, color: impl Into<String>) -> Self {
        self.colors.insert(kind.as_str().to_owned(), color.into());
        self
    }

    /// Parses a theme from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::InvalidTheme`] if the document is not an
    /// object of string values.
    pub fn from_json(json: &str) -> Result<Self, HighlightError> {
        serde_json::from_str(json).map_err(|err| HighlightError::invalid_theme(err.to_string()))
    }

    /// Looks up a built-in theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::UnknownTheme`] if no built-in theme has that
    /// name.
    pub fn named(name: &str) -> Result<Self, HighlightError> {
        BuiltinTheme::from_str(name.trim())
            .map(BuiltinTheme::theme)
            .map_err(|_| HighlightError::unknown_theme(name))
    }
}

/// Themes that ship with the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BuiltinTheme {
    /// General-purpose dark theme.
    #[default]
    Dark,
    /// Dark theme tuned for JavaScript dialects.
    JsDark,
    /// Dark theme tuned for LaTeX.
    LatexDark,
    /// Light theme tuned for LaTeX.
    LatexClair,
}

const BASE_COLORS: &[(TokenKind, &str)] = &[
    (TokenKind::Comment, "#6b7280"),
    (TokenKind::String, "#9f7360"),
    (TokenKind::Number, "#fde68a"),
    (TokenKind::Keyword, "#b87eb3"),
    (TokenKind::KeywordDecl, "#569cd6"),
    (TokenKind::Boolean, "#fca5a5"),
    (TokenKind::Null, "#fca5a5"),
    (TokenKind::Regex, "#fcd34d"),
    (TokenKind::Operator, "#e5e7eb"),
    (TokenKind::Punctuation, "#9ca3af"),
    (TokenKind::Function, "#c0c095"),
    (TokenKind::Variable, "#4ab0e7"),
    (TokenKind::Property, "#8bc3e0"),
    (TokenKind::Type, "#47b19b"),
    (TokenKind::Namespace, "#47b19b"),
    (TokenKind::Builtin, "#fdba74"),
    (TokenKind::Interpolation, "#9f7360"),
    (TokenKind::Tag, "#508fc3"),
    (TokenKind::AttrName, "#8bc3e0"),
    (TokenKind::AttrValue, "#9f7360"),
    (TokenKind::Bracket0, "#ebc505"),
    (TokenKind::Bracket1, "#a1579e"),
    (TokenKind::Bracket2, "#1b80ca"),
];

const JS_DARK_OVERRIDES: &[(TokenKind, &str)] = &[
    (TokenKind::AttrValue, "#a7f3d0"),
    (TokenKind::Bracket0, "#fde68a"),
    (TokenKind::Bracket1, "#93c5fd"),
    (TokenKind::Bracket2, "#f472b6"),
];

const LATEX_DARK_OVERRIDES: &[(TokenKind, &str)] = &[
    (TokenKind::Comment, "#85b565ff"),
    (TokenKind::Number, "#d2d6db"),
    (TokenKind::KeywordDecl, "#7dd3fc"),
    (TokenKind::Operator, "#d2d6db"),
    (TokenKind::Function, "#7dd3fc"),
];

const LATEX_CLAIR_OVERRIDES: &[(TokenKind, &str)] = &[
    (TokenKind::Comment, "#62864aff"),
    (TokenKind::Number, "#000000ff"),
    (TokenKind::KeywordDecl, "blue"),
    (TokenKind::Operator, "#000000ff"),
    (TokenKind::Function, "blue"),
];

impl BuiltinTheme {
    /// Returns all built-in themes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dark, Self::JsDark, Self::LatexDark, Self::LatexClair]
    }

    /// Builds the theme.
    #[must_use]
    pub fn theme(self) -> Theme {
        let mut theme = Theme {
            background: Some("#020202".to_owned()),
            foreground: Some("#d2d6db".to_owned()),
            caret: Some("#7dd3fc".to_owned()),
            selection: Some("#1f2937".to_owned()),
            gutter: Some("transparent".to_owned()),
            colors: BTreeMap::new(),
        };
        let overrides: &[(TokenKind, &str)] = match self {
            Self::Dark => &[],
            Self::JsDark => JS_DARK_OVERRIDES,
            Self::LatexDark => LATEX_DARK_OVERRIDES,
            Self::LatexClair => {
                theme.background = Some("#ffffff".to_owned());
                theme.foreground = Some("#000000ff".to_owned());
                LATEX_CLAIR_OVERRIDES
            }
        };
        for (kind, color) in BASE_COLORS.iter().chain(overrides) {
            theme = theme.with_color(*kind, *color);
        }
        theme
    }
}

impl From<BuiltinTheme> for Theme {
    fn from(builtin: BuiltinTheme) -> Self {
        builtin.theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dark", BuiltinTheme::Dark)]
    #[case("js-dark", BuiltinTheme::JsDark)]
    #[case("LaTeX-Dark", BuiltinTheme::LatexDark)]
    #[case("latex-clair", BuiltinTheme::LatexClair)]
    fn builtin_names_parse(#[case] name: &str, #[case] expected: BuiltinTheme) {
        assert_eq!(name.parse::<BuiltinTheme>(), Ok(expected));
    }

    #[test]
    fn builtin_names_round_trip_through_display() {
        for builtin in BuiltinTheme::all() {
            assert_eq!(builtin.to_string().parse::<BuiltinTheme>(), Ok(*builtin));
        }
    }

    #[test]
    fn dark_theme_colours_depth_classes() {
        let theme = BuiltinTheme::Dark.theme();
        assert_eq!(theme.color(TokenKind::Bracket0), Some("#ebc505"));
        assert_eq!(theme.color(TokenKind::Bracket1), Some("#a1579e"));
        assert_eq!(theme.color(TokenKind::Bracket2), Some("#1b80ca"));
    }

    #[test]
    fn overrides_replace_base_colours() {
        let theme = BuiltinTheme::LatexClair.theme();
        assert_eq!(theme.color(TokenKind::Function), Some("blue"));
        assert_eq!(theme.background.as_deref(), Some("#ffffff"));
        assert_eq!(theme.color(TokenKind::Tag), Some("#508fc3"));
    }

    #[test]
    fn unknown_builtin_is_reported() {
        let err = Theme::named("solarized").expect_err("no such theme");
        assert!(matches!(err, HighlightError::UnknownTheme { ref name } if name == "solarized"));
    }

    #[test]
    fn custom_theme_parses_flat_json() {
        let theme = Theme::from_json(r##"{"background":"#000","keyword":"red","myKind":"#123"}"##)
            .expect("theme parses");
        assert_eq!(theme.background.as_deref(), Some("#000"));
        assert_eq!(theme.color(TokenKind::Keyword), Some("red"));
        assert_eq!(theme.color(TokenKind::Custom("myKind")), Some("#123"));
        assert_eq!(theme.color(TokenKind::String), None);
    }

    #[test]
    fn non_string_colours_are_rejected() {
        let err = Theme::from_json(r#"{"keyword": 3}"#).expect_err("colour must be a string");
        assert!(matches!(err, HighlightError::InvalidTheme { .. }));
    }
}
