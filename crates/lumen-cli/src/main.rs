//! CLI entrypoint for the lumen highlighter.
//!
//! The binary delegates to [`lumen_cli::run`], which parses arguments, loads
//! configuration, highlights the input and writes the rendered result.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    lumen_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
