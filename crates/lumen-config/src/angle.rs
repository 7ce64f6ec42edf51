use clap::ValueEnum;
use lumen_syntax::AngleBrackets;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Configured treatment of type-parameter angle brackets.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AngleBracketMode {
    /// Pair angle brackets for TypeScript dialects only.
    #[default]
    Auto,
    /// Always attempt to pair angle brackets.
    On,
    /// Never pair angle brackets.
    Off,
}

impl From<AngleBracketMode> for AngleBrackets {
    fn from(mode: AngleBracketMode) -> Self {
        match mode {
            AngleBracketMode::Auto => Self::Auto,
            AngleBracketMode::On => Self::Enabled,
            AngleBracketMode::Off => Self::Disabled,
        }
    }
}
