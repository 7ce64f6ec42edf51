//! Command-line runtime for the lumen highlighter.
//!
//! [`run`] owns argument parsing, configuration loading, input handling and
//! output rendering. It takes its IO streams as parameters so tests can drive
//! it without spawning a process.

use std::ffi::OsString;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use lumen_config::Config;
use lumen_syntax::{BuiltinTheme, SupportedLanguage, Theme, TokenizeOptions, tokenize};
use tracing::{debug, info};

mod cli;
mod config;
mod errors;
mod output;
mod telemetry;

use cli::Cli;
pub use cli::OutputFormat;
use config::{ConfigLoader, OrthoConfigLoader, prepare_cli_arguments, split_config_arguments};
use errors::AppError;
use output::Highlighted;

/// Bundles the IO streams provided to the CLI runtime.
struct IoStreams<'a, R: Read, W: Write, E: Write> {
    stdin: &'a mut R,
    stdout: &'a mut W,
    stderr: &'a mut E,
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Returns success after writing the rendered input, or failure after
/// writing a one-line diagnostic to `stderr`.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let mut io = IoStreams {
        stdin,
        stdout,
        stderr,
    };
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    match execute(args, io, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(io.stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&arguments);
    let cli = match Cli::try_parse_from(prepare_cli_arguments(&arguments, &split)) {
        Ok(cli) => cli,
        // Help and version requests are not failures.
        Err(error) if !error.use_stderr() => {
            return write_output(io.stdout, &error.to_string());
        }
        Err(error) => return Err(AppError::usage(&error)),
    };

    if cli.list_languages {
        return write_output(io.stdout, &language_listing());
    }
    if cli.list_themes {
        return write_output(io.stdout, &theme_listing());
    }

    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;
    debug!(?config, "configuration resolved");

    let (language, source) = read_input(&cli, io.stdin)?;
    let theme = resolve_theme(cli.theme_file.as_deref(), &config, language)?;
    let rules = language.rule_set()?;
    let options = TokenizeOptions {
        rainbow: config.rainbow(),
        angle_brackets: config.angle_brackets.into(),
        ..TokenizeOptions::default()
    };
    let tokens = tokenize(&source, rules, &options);
    info!(
        language = %language,
        bytes = source.len(),
        tokens = tokens.len(),
        "highlighted input"
    );

    let rendered = output::render(
        cli.format,
        &Highlighted {
            language,
            source: &source,
            tokens: &tokens,
            theme: &theme,
            line_numbers: config.line_numbers,
        },
    )?;
    write_output(io.stdout, &rendered)
}

fn read_input<R: Read>(cli: &Cli, stdin: &mut R) -> Result<(SupportedLanguage, String), AppError> {
    if let Some(path) = cli.input_path() {
        let language = cli
            .language
            .map_or_else(|| SupportedLanguage::detect(path), Ok)?;
        let source = fs::read_to_string(path).map_err(|source| AppError::ReadInput {
            path: path.clone(),
            source,
        })?;
        return Ok((language, source));
    }

    let language = cli.language.ok_or(AppError::MissingLanguage)?;
    let mut source = String::new();
    stdin
        .read_to_string(&mut source)
        .map_err(AppError::ReadStdin)?;
    Ok((language, source))
}

/// Picks the theme file, then the configured built-in, then the language's
/// default theme.
fn resolve_theme(
    theme_file: Option<&Path>,
    config: &Config,
    language: SupportedLanguage,
) -> Result<Theme, AppError> {
    if let Some(path) = theme_file {
        let json = fs::read_to_string(path).map_err(|source| AppError::ReadTheme {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(Theme::from_json(&json)?);
    }
    config
        .theme
        .as_deref()
        .map_or_else(|| Ok(language.default_theme().theme()), Theme::named)
        .map_err(AppError::from)
}

fn language_listing() -> String {
    SupportedLanguage::all()
        .iter()
        .map(|language| {
            let extensions = language
                .extensions()
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}\t{}\t{extensions}\n", language.as_str(), language.name())
        })
        .collect()
}

fn theme_listing() -> String {
    BuiltinTheme::all()
        .iter()
        .map(|theme| format!("{theme}\n"))
        .collect()
}

fn write_output<W: Write>(stdout: &mut W, text: &str) -> Result<(), AppError> {
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(AppError::WriteOutput)
}
