//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use lumen_syntax::HighlightError;
use ortho_config::OrthoError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures reported to the operator as a single line on standard error.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(String),
    #[error("--language is required when reading standard input")]
    MissingLanguage,
    #[error("failed to load configuration: {}", single_line(.0))]
    LoadConfiguration(Arc<OrthoError>),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {}: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("failed to read standard input: {0}")]
    ReadStdin(io::Error),
    #[error("failed to read theme {}: {source}", path.display())]
    ReadTheme { path: PathBuf, source: io::Error },
    #[error("{0}")]
    Highlight(#[from] HighlightError),
    #[error("failed to serialise tokens: {0}")]
    SerialiseTokens(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}

/// Joins a possibly multi-line loader report into one line.
fn single_line(error: &OrthoError) -> String {
    error.to_string().split_whitespace().collect::<Vec<_>>().join(" ")
}

impl AppError {
    /// Reduces a clap error to its headline so failures stay on one line.
    pub(crate) fn usage(error: &clap::Error) -> Self {
        let rendered = error.to_string();
        let headline = rendered.lines().next().unwrap_or_default();
        Self::CliUsage(headline.to_owned())
    }
}
