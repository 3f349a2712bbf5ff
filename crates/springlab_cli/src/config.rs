//! springlab configuration file handling

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use springlab_preview::engine::DEFAULT_SESSION_WINDOW_SECS;
use springlab_preview::{ConfigField, SessionPolicy};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "springlab.toml";

/// Highest frame rate a simulation samples at
pub const MAX_FPS: u32 = 1000;

/// Longest fixed duration a simulation runs (seconds)
pub const MAX_DURATION_SECS: f32 = 600.0;

/// Top-level springlab configuration (springlab.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpringlabConfig {
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub spring: SpringOverrides,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// What the preview animates and how long a session counts as animating
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PreviewConfig {
    /// Starting preset
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Animation type: translate, scale or rotate
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub policy: PolicyName,
    /// Animating window for the `window` policy
    #[serde(default = "default_window_ms")]
    pub window_ms: u32,
}

fn default_preset() -> String {
    "default".to_string()
}

fn default_kind() -> String {
    "translate".to_string()
}

fn default_window_ms() -> u32 {
    (DEFAULT_SESSION_WINDOW_SECS * 1000.0).round() as u32
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            kind: default_kind(),
            policy: PolicyName::default(),
            window_ms: default_window_ms(),
        }
    }
}

/// Session policy as written in config files and on the command line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyName {
    /// Animating for a fixed window after each trigger
    #[default]
    Window,
    /// Animating until every spring settles
    Settle,
}

/// Per-field overrides applied on top of the preset
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpringOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stiffness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f32>,
}

impl SpringOverrides {
    pub fn get(&self, field: ConfigField) -> Option<f32> {
        match field {
            ConfigField::Stiffness => self.stiffness,
            ConfigField::Damping => self.damping,
            ConfigField::Mass => self.mass,
            ConfigField::Velocity => self.velocity,
        }
    }

    /// Overrides that are set, in field order
    pub fn iter(&self) -> impl Iterator<Item = (ConfigField, f32)> + '_ {
        ConfigField::all()
            .iter()
            .filter_map(|&field| self.get(field).map(|value| (field, value)))
    }

    /// Fill in fields set in `other`
    pub fn merge(&mut self, other: SpringOverrides) {
        self.stiffness = other.stiffness.or(self.stiffness);
        self.damping = other.damping.or(self.damping);
        self.mass = other.mass.or(self.mass);
        self.velocity = other.velocity.or(self.velocity);
    }
}

/// Headless simulation settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Seconds to simulate; runs until settled when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

fn default_fps() -> u32 {
    60
}

impl SimulationConfig {
    /// Reject frame rates and durations that would sample an unbounded
    /// number of frames
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_FPS).contains(&self.fps) {
            anyhow::bail!("fps must be between 1 and {MAX_FPS}, got {}", self.fps);
        }
        if let Some(secs) = self.duration {
            if !(0.0..=MAX_DURATION_SECS).contains(&secs) {
                anyhow::bail!(
                    "duration must be between 0 and {MAX_DURATION_SECS} seconds, got {secs}"
                );
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration: None,
        }
    }
}

impl SpringlabConfig {
    /// Load configuration from a file, or from `springlab.toml` in a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `springlab init` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load an explicit config file, else `./springlab.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        let local = PathBuf::from(CONFIG_FILE);
        if local.is_file() {
            tracing::debug!(path = %local.display(), "using local config");
            Self::load_from_path(&local)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid springlab configuration")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn session_policy(&self) -> SessionPolicy {
        match self.preview.policy {
            PolicyName::Window => {
                SessionPolicy::FixedWindow(self.preview.window_ms as f32 / 1000.0)
            }
            PolicyName::Settle => SessionPolicy::UntilSettled,
        }
    }
}
