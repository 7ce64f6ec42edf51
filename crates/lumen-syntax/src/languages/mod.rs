//! Built-in rule tables and language detection.
//!
//! This module provides the [`SupportedLanguage`] enum identifying the input
//! dialects that ship with a rule set, and maps each one to its compiled
//! [`RuleSet`].

mod javascript;
mod jsx;
mod latex;
mod python;
mod shared;
mod typescript;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::error::HighlightError;
use crate::rule::RuleSet;
use crate::theme::BuiltinTheme;

/// Languages with a built-in rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// JavaScript source files (`.js`, `.mjs`, `.cjs`).
    #[default]
    JavaScript,
    /// TypeScript source files (`.ts`, `.mts`, `.cts`).
    TypeScript,
    /// JavaScript with markup tags (`.jsx`).
    Jsx,
    /// TypeScript with markup tags (`.tsx`).
    Tsx,
    /// Python source files (`.py`, `.pyi`).
    Python,
    /// LaTeX documents and packages (`.tex`, `.sty`, `.cls`, `.ltx`).
    Latex,
}

static JAVASCRIPT: OnceCell<RuleSet> = OnceCell::new();
static TYPESCRIPT: OnceCell<RuleSet> = OnceCell::new();
static JSX: OnceCell<RuleSet> = OnceCell::new();
static TSX: OnceCell<RuleSet> = OnceCell::new();
static PYTHON: OnceCell<RuleSet> = OnceCell::new();
static LATEX: OnceCell<RuleSet> = OnceCell::new();

impl SupportedLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_syntax::SupportedLanguage;
    ///
    /// assert_eq!(
    ///     SupportedLanguage::from_extension("tsx"),
    ///     Some(SupportedLanguage::Tsx)
    /// );
    /// assert_eq!(SupportedLanguage::from_extension("json"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::all().iter().copied().find(|language| {
            language
                .extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    /// Detects the language from a file path by examining its extension.
    ///
    /// Returns `None` if the path has no extension or the extension is not
    /// recognised.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Like [`Self::from_path`] but explains why detection failed.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::UnknownLanguage`] when the path has no
    /// extension and [`HighlightError::UnsupportedExtension`] when the
    /// extension is not recognised.
    pub fn detect(path: &Path) -> Result<Self, HighlightError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| HighlightError::unknown_language(path.to_path_buf()))?;
        Self::from_extension(ext).ok_or_else(|| HighlightError::unsupported_extension(ext))
    }

    /// Returns the compiled rule set, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::InvalidPattern`] if one of the built-in
    /// patterns fails to compile.
    pub fn rule_set(self) -> Result<&'static RuleSet, HighlightError> {
        self.cache().get_or_try_init(|| self.build_rule_set())
    }

    fn cache(self) -> &'static OnceCell<RuleSet> {
        match self {
            Self::JavaScript => &JAVASCRIPT,
            Self::TypeScript => &TYPESCRIPT,
            Self::Jsx => &JSX,
            Self::Tsx => &TSX,
            Self::Python => &PYTHON,
            Self::Latex => &LATEX,
        }
    }

    fn build_rule_set(self) -> Result<RuleSet, HighlightError> {
        match self {
            Self::JavaScript => javascript::rules(),
            Self::TypeScript => typescript::rules(),
            Self::Jsx => jsx::rules(),
            Self::Tsx => Ok(typescript::rules()?.extend(
                "tsx",
                [jsx::markup_tag_rule()?],
                Some("TSX"),
            )),
            Self::Python => python::rules(),
            Self::Latex => latex::rules(),
        }
    }

    /// Returns the theme used when none is configured.
    #[must_use]
    pub const fn default_theme(self) -> BuiltinTheme {
        match self {
            Self::JavaScript | Self::TypeScript | Self::Jsx | Self::Tsx => BuiltinTheme::JsDark,
            Self::Latex => BuiltinTheme::LatexDark,
            Self::Python => BuiltinTheme::Dark,
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
            Self::Python => "python",
            Self::Latex => "latex",
        }
    }

    /// Returns the human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Jsx => "JSX",
            Self::Tsx => "TSX",
            Self::Python => "Python",
            Self::Latex => "LaTeX",
        }
    }

    /// Returns the file extensions (without the dot) mapped to this language.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::Jsx => &["jsx"],
            Self::Tsx => &["tsx"],
            Self::Python => &["py", "pyi"],
            Self::Latex => &["tex", "sty", "cls", "ltx"],
        }
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::JavaScript,
            Self::TypeScript,
            Self::Jsx,
            Self::Tsx,
            Self::Python,
            Self::Latex,
        ]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "javascript" | "js" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "jsx" => Ok(Self::Jsx),
            "tsx" => Ok(Self::Tsx),
            "python" | "py" => Ok(Self::Python),
            "latex" | "tex" => Ok(Self::Latex),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}
