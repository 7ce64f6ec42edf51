//! Configuration for the lumen highlighter.
//!
//! Settings are layered by [`ortho_config`]: built-in defaults, then a TOML
//! file, then `LUMEN_*` environment variables and finally command-line flags.
//! The file is taken from `--config-path` or `LUMEN_CONFIG_PATH`, falling back
//! to a discovered `.lumen.toml`.
//!
//! ```toml
//! log_filter = "lumen_syntax=debug"
//! log_format = "json"
//! theme = "latex-clair"
//! angle_brackets = "off"
//! line_numbers = true
//! ```

mod angle;
mod defaults;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use angle::AngleBracketMode;
pub use defaults::{
    CONFIG_PATH_ENV, DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "LUMEN")]
pub struct Config {
    /// Tracing filter expression, e.g. `lumen_syntax=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Diagnostic log format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Built-in theme name; `None` picks the language's default theme.
    pub theme: Option<String>,
    /// Treatment of type-parameter angle brackets.
    #[ortho_config(default = AngleBracketMode::Auto)]
    pub angle_brackets: AngleBracketMode,
    /// Emits a line-number gutter in document output.
    #[ortho_config(default = false)]
    pub line_numbers: bool,
    /// Skips the rainbow delimiter pass.
    #[ortho_config(default = false)]
    pub no_rainbow: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            theme: None,
            angle_brackets: AngleBracketMode::default(),
            line_numbers: false,
            no_rainbow: false,
        }
    }
}

impl Config {
    /// Loads the layered configuration for the current process.
    ///
    /// # Errors
    ///
    /// Returns the loader error when a source cannot be read or merged.
    pub fn load() -> Result<Self, Arc<OrthoError>> {
        Self::load_from_iter(std::env::args_os())
    }

    /// Loads the layered configuration using `args` as the command line. The
    /// first item is the program name.
    ///
    /// # Errors
    ///
    /// Returns the loader error for unrecognised flags, unreadable or
    /// malformed files, and values that do not fit their field.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as OrthoConfig>::load_from_iter(args)
    }

    /// Returns whether the rainbow delimiter pass runs.
    #[must_use]
    pub const fn rainbow(&self) -> bool {
        !self.no_rainbow
    }
}
