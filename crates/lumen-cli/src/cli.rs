//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lumen_syntax::SupportedLanguage;

/// Rendering selected with `--format`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Bare highlighted markup.
    #[default]
    Html,
    /// A standalone `<pre>` block with theme colours and optional gutter.
    Document,
    /// The resolved token list as JSON.
    Json,
}

/// Configuration flags handled by the configuration loader. They must come
/// before every other argument.
const CONFIG_HELP: &str = "\
Config options (before any other argument; also LUMEN_* variables):
      --config-path <PATH>       TOML configuration file [default: .lumen.toml]
      --log-filter <FILTER>      Tracing filter expression [default: warn]
      --log-format <FORMAT>      json or compact [default: compact]
      --theme <NAME>             Built-in theme, see --list-themes
      --angle-brackets <MODE>    auto, on or off [default: auto]
      --line-numbers             Adds a line-number gutter to document output
      --no-rainbow               Skips the rainbow delimiter pass";

/// Command-line interface for the lumen highlighter.
#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    version,
    about = "Highlights source text with rainbow delimiters",
    override_usage = "lumen [CONFIG OPTIONS] [OPTIONS] [FILE]",
    after_help = CONFIG_HELP
)]
pub(crate) struct Cli {
    /// File to highlight. Reads standard input when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub(crate) file: Option<PathBuf>,
    /// Language of the input; inferred from the file extension by default.
    #[arg(long, short = 'l', value_name = "LANGUAGE", env = "LUMEN_LANGUAGE")]
    pub(crate) language: Option<SupportedLanguage>,
    /// JSON theme document, used instead of a built-in theme.
    #[arg(long, value_name = "PATH", env = "LUMEN_THEME_FILE")]
    pub(crate) theme_file: Option<PathBuf>,
    /// Output rendering.
    #[arg(
        long,
        short = 'f',
        value_enum,
        default_value_t = OutputFormat::Html,
        env = "LUMEN_FORMAT"
    )]
    pub(crate) format: OutputFormat,
    /// Prints the supported languages and exits.
    #[arg(long)]
    pub(crate) list_languages: bool,
    /// Prints the built-in themes and exits.
    #[arg(long)]
    pub(crate) list_themes: bool,
}

impl Cli {
    /// Returns the input path, or `None` for standard input.
    pub(crate) fn input_path(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
