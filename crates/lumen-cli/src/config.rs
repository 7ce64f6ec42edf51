//! Configuration loading for the lumen CLI.
//!
//! Leading configuration flags are routed to the `ortho_config` loader; the
//! remaining tokens are parsed by the [`crate::cli::Cli`] definition.

use std::ffi::{OsStr, OsString};

use lumen_config::Config;

use crate::AppError;

/// Flags recognised by the configuration loader that take a value.
///
/// MAINTENANCE: keep this list and [`CONFIG_CLI_SWITCHES`] in sync with the
/// fields of [`lumen_config::Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--theme",
    "--angle-brackets",
];

/// Boolean configuration flags that never consume a following token.
pub(crate) const CONFIG_CLI_SWITCHES: &[&str] = &["--line-numbers", "--no-rainbow"];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the filtered configuration arguments.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags must appear before any other option or the input
    /// path. Later occurrences are handed to the main parser, which rejects
    /// them.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        if !argument_text.starts_with("--") {
            return FlagAction::Skip;
        }

        let mut flag_parts = argument_text.splitn(2, '=');
        let flag = flag_parts.next().unwrap_or_default();
        let has_inline_value = flag_parts.next().is_some();

        if CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }
        if CONFIG_CLI_SWITCHES.contains(&flag) {
            return FlagAction::Include { needs_value: false };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

/// Splits the leading configuration flags (with the program name) from the
/// rest of the command line.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(program) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered = vec![program.clone()];
    let mut command_start = 1_usize;
    let mut pending_value = false;

    for argument in args.iter().skip(1) {
        if pending_value {
            filtered.push(argument.clone());
            pending_value = false;
            command_start += 1;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                filtered.push(argument.clone());
                command_start += 1;
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}

/// Rebuilds the command line seen by the main parser: the program name plus
/// everything after the configuration flags.
pub(crate) fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn inline_value_flags_do_not_need_follow_up_value() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--theme=dark"));
        match result {
            FlagAction::Include { needs_value } => assert!(!needs_value),
            FlagAction::Skip => panic!("expected include for known inline flag"),
        }
    }

    #[test]
    fn separate_value_flags_consume_following_argument() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--log-filter"));
        match result {
            FlagAction::Include { needs_value } => assert!(needs_value),
            FlagAction::Skip => panic!("expected include for known separated flag"),
        }
    }

    #[rstest]
    #[case("main.js")]
    #[case("--language")]
    #[case("--unknown")]
    fn other_tokens_signal_stop(#[case] token: &str) {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new(token));
        assert!(matches!(result, FlagAction::Skip), "should skip {token}");
    }

    #[test]
    fn leading_configuration_flags_are_split_off() {
        let args = os_args(&[
            "lumen",
            "--no-rainbow",
            "--theme",
            "dark",
            "--log-format=json",
            "main.js",
            "--format",
            "json",
        ]);
        let split = split_config_arguments(&args);
        assert_eq!(
            split.config_arguments,
            os_args(&["lumen", "--no-rainbow", "--theme", "dark", "--log-format=json"])
        );
        assert_eq!(
            prepare_cli_arguments(&args, &split),
            os_args(&["lumen", "main.js", "--format", "json"])
        );
    }

    #[test]
    fn switches_do_not_swallow_the_input_path() {
        let args = os_args(&["lumen", "--line-numbers", "main.js"]);
        let split = split_config_arguments(&args);
        assert_eq!(split.command_start, 2);
        assert_eq!(
            prepare_cli_arguments(&args, &split),
            os_args(&["lumen", "main.js"])
        );
    }

    #[test]
    fn empty_arguments_split_cleanly() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert_eq!(split.command_start, 0);
    }
}
