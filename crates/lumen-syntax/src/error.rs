//! Error types for highlighting operations.
//!
//! The tokenizer and bracket matcher never fail: degenerate input is absorbed
//! silently. Errors only arise at the edges, when rule tables are compiled,
//! themes are loaded, or a language has to be inferred from a path.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from highlighting operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HighlightError {
    /// A rule pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern source that was rejected.
        pattern: String,
        /// The underlying regex compilation error.
        #[source]
        source: Box<regex::Error>,
    },

    /// The requested built-in theme does not exist.
    #[error("unknown theme: {name}")]
    UnknownTheme {
        /// The theme name that was not recognised.
        name: String,
    },

    /// A theme document could not be parsed.
    #[error("invalid theme: {message}")]
    InvalidTheme {
        /// Description of the parse failure.
        message: String,
    },

    /// The file extension is not supported for highlighting.
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension {
        /// The extension that was not recognised.
        extension: String,
    },

    /// Failed to determine language from file path.
    #[error("could not determine language for path: {}", path.display())]
    UnknownLanguage {
        /// The path that could not be mapped to a language.
        path: PathBuf,
    },
}

impl HighlightError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }

    /// Creates an unknown theme error.
    #[must_use]
    pub fn unknown_theme(name: impl Into<String>) -> Self {
        Self::UnknownTheme { name: name.into() }
    }

    /// Creates an invalid theme error.
    #[must_use]
    pub fn invalid_theme(message: impl Into<String>) -> Self {
        Self::InvalidTheme {
            message: message.into(),
        }
    }

    /// Creates an unsupported extension error.
    #[must_use]
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }

    /// Creates an unknown language error.
    #[must_use]
    pub const fn unknown_language(path: PathBuf) -> Self {
        Self::UnknownLanguage { path }
    }
}
