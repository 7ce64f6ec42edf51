//! Integration tests for the `lumen` binary entry point.
//!
//! Verifies stdin and file input, configuration files and user-facing error
//! handling.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn highlights_standard_input() {
    let mut command = cargo_bin_cmd!("lumen");
    command
        .args(["--language", "python"])
        .env_remove("LUMEN_CONFIG_PATH")
        .write_stdin("print([1])\n");
    command
        .assert()
        .success()
        .stdout(contains(r#"<span class="tok-bracket0""#))
        .stdout(contains(r#"<span class="tok-bracket1""#));
}

#[test]
fn configuration_file_is_honoured() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("lumen.toml");
    fs::write(&config, "line_numbers = true\ntheme = \"latex-clair\"\n").expect("write config");
    let source = dir.path().join("doc.tex");
    fs::write(&source, "\\emph{x}\n").expect("write source");

    let mut command = cargo_bin_cmd!("lumen");
    command
        .arg(&source)
        .args(["--format", "document"])
        .env("LUMEN_CONFIG_PATH", &config);
    command
        .assert()
        .success()
        .stdout(contains("lumen-gutter"))
        .stdout(contains("background:#ffffff"));
}

#[test]
fn missing_file_exits_with_failure() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent.js");

    let mut command = cargo_bin_cmd!("lumen");
    command.arg(&missing);
    command
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("failed to read").and(contains("absent.js")));
}

#[test]
fn malformed_configuration_exits_with_failure() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("lumen.toml");
    fs::write(&config, "theme = ").expect("write config");

    let mut command = cargo_bin_cmd!("lumen");
    command
        .arg("--config-path")
        .arg(&config)
        .args(["--language", "js"])
        .env_remove("LUMEN_CONFIG_PATH")
        .write_stdin("x");
    command
        .assert()
        .failure()
        .stderr(contains("failed to load configuration"))
        .stderr(predicate::function(|text: &str| text.lines().count() == 1));
}

#[test]
fn logging_goes_to_stderr() {
    let mut command = cargo_bin_cmd!("lumen");
    command
        .args(["--log-filter", "lumen_cli=info", "--log-format", "json", "--language", "js"])
        .write_stdin("f(x)");
    command
        .assert()
        .success()
        .stdout(contains("tok-function"))
        .stderr(contains("highlighted input"));
}
