//! Built-in spring presets
//!
//! The fixed table of named configurations offered as shortcuts. The table is
//! read-only; lookups by name either hit one of the six entries or fail with
//! [`ParsePresetError`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::spring::SpringConfig;

/// Returned when a preset name is not in the table
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown spring preset `{0}`")]
pub struct ParsePresetError(pub String);

/// Built-in preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpringPreset {
    /// k=100, c=10, m=1
    Default,
    /// k=400, c=17, m=1
    Bouncy,
    /// k=120, c=14, m=1
    Gentle,
    /// k=180, c=12, m=1
    Wobbly,
    /// k=210, c=20, m=1
    Stiff,
    /// k=280, c=60, m=10
    Slow,
}

impl SpringPreset {
    /// Stable preset name for config/serialization.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Bouncy => "bouncy",
            Self::Gentle => "gentle",
            Self::Wobbly => "wobbly",
            Self::Stiff => "stiff",
            Self::Slow => "slow",
        }
    }

    /// Full preset list, in display order.
    pub fn all() -> &'static [SpringPreset] {
        const PRESETS: [SpringPreset; 6] = [
            SpringPreset::Default,
            SpringPreset::Bouncy,
            SpringPreset::Gentle,
            SpringPreset::Wobbly,
            SpringPreset::Stiff,
            SpringPreset::Slow,
        ];
        &PRESETS
    }

    /// The configuration this preset stands for. Initial velocity is always zero.
    pub fn config(self) -> SpringConfig {
        match self {
            Self::Default => SpringConfig::standard(),
            Self::Bouncy => SpringConfig::bouncy(),
            Self::Gentle => SpringConfig::gentle(),
            Self::Wobbly => SpringConfig::wobbly(),
            Self::Stiff => SpringConfig::stiff(),
            Self::Slow => SpringConfig::slow(),
        }
    }

    /// Look a preset up by name (exact, case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.name() == name)
    }

    /// Label key for hosts that localize preset names (`presets.<name>`).
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Default => "presets.default",
            Self::Bouncy => "presets.bouncy",
            Self::Gentle => "presets.gentle",
            Self::Wobbly => "presets.wobbly",
            Self::Stiff => "presets.stiff",
            Self::Slow => "presets.slow",
        }
    }

    /// The preset whose configuration equals `config`, if any.
    pub fn matching(config: &SpringConfig) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.config() == *config)
    }
}

impl Display for SpringPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpringPreset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParsePresetError(s.to_string()))
    }
}

impl From<SpringPreset> for SpringConfig {
    fn from(preset: SpringPreset) -> Self {
        preset.config()
    }
}
