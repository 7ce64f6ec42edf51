//! Rendering of highlighted input in the selected output format.

use lumen_syntax::{RenderOptions, Span, SupportedLanguage, Theme, render_document, render_html};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::errors::AppError;

/// JSON payload emitted by `--format json`.
#[derive(Debug, Serialize)]
struct TokenDocument<'a> {
    language: &'static str,
    tokens: &'a [Span],
}

/// Everything needed to render one highlighted input.
#[derive(Debug)]
pub(crate) struct Highlighted<'a> {
    pub(crate) language: SupportedLanguage,
    pub(crate) source: &'a str,
    pub(crate) tokens: &'a [Span],
    pub(crate) theme: &'a Theme,
    pub(crate) line_numbers: bool,
}

/// Renders `highlighted` and appends a trailing newline.
pub(crate) fn render(format: OutputFormat, highlighted: &Highlighted<'_>) -> Result<String, AppError> {
    let mut rendered = match format {
        OutputFormat::Html => render_html(highlighted.source, highlighted.tokens, highlighted.theme),
        OutputFormat::Document => {
            let options = RenderOptions {
                line_numbers: highlighted.line_numbers,
                ..RenderOptions::default()
            };
            render_document(
                highlighted.source,
                highlighted.tokens,
                highlighted.theme,
                &options,
            )
        }
        OutputFormat::Json => serde_json::to_string_pretty(&TokenDocument {
            language: highlighted.language.as_str(),
            tokens: highlighted.tokens,
        })
        .map_err(AppError::SerialiseTokens)?,
    };
    rendered.push('\n');
    Ok(rendered)
}
