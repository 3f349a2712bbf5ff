//! Spring configuration model
//!
//! Holds the four tunable spring parameters for a session and applies
//! presets. Edits replace the configuration whole; nothing here clamps.
//! Hosts that accept free-form input either clamp through
//! [`FieldBounds::clamp`] (as sliders do) or reject through
//! [`SpringConfigModel::set_checked`].

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use springlab_animation::{SpringConfig, SpringPreset};
use tracing::{debug, warn};

use crate::error::PreviewError;

/// One tunable parameter of [`SpringConfig`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigField {
    Stiffness,
    Damping,
    Mass,
    Velocity,
}

impl ConfigField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Stiffness => "stiffness",
            Self::Damping => "damping",
            Self::Mass => "mass",
            Self::Velocity => "velocity",
        }
    }

    /// All fields, in control-panel order.
    pub fn all() -> &'static [ConfigField] {
        const FIELDS: [ConfigField; 4] = [
            ConfigField::Stiffness,
            ConfigField::Damping,
            ConfigField::Mass,
            ConfigField::Velocity,
        ];
        &FIELDS
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }

    /// Control range for this field
    pub fn bounds(self) -> FieldBounds {
        match self {
            Self::Stiffness => FieldBounds::new(1.0, 500.0, 1.0),
            Self::Damping => FieldBounds::new(1.0, 100.0, 1.0),
            Self::Mass => FieldBounds::new(0.1, 20.0, 0.1),
            Self::Velocity => FieldBounds::new(-100.0, 100.0, 1.0),
        }
    }

    /// Read this field out of a configuration
    pub fn get(self, config: &SpringConfig) -> f32 {
        match self {
            Self::Stiffness => config.stiffness,
            Self::Damping => config.damping,
            Self::Mass => config.mass,
            Self::Velocity => config.velocity,
        }
    }

    /// Copy of `config` with only this field replaced
    pub fn with_value(self, config: SpringConfig, value: f32) -> SpringConfig {
        let mut next = config;
        match self {
            Self::Stiffness => next.stiffness = value,
            Self::Damping => next.damping = value,
            Self::Mass => next.mass = value,
            Self::Velocity => next.velocity = value,
        }
        next
    }
}

impl Display for ConfigField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigField {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PreviewError::UnknownField(s.to_string()))
    }
}

/// Inclusive range and step grid of a numeric control
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBounds {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl FieldBounds {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into range and snap to the nearest step, the way a slider does.
    ///
    /// NaN lands on `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }

        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).clamp(self.min, self.max);

        // 0.1 + 4 * 0.1 is not 0.5 in binary; round to the step's precision
        let scale = 10f32.powi(self.step_decimals());
        (snapped * scale).round() / scale
    }

    fn step_decimals(&self) -> i32 {
        let mut decimals = 0;
        let mut step = self.step;
        while (step - step.round()).abs() > 1e-4 && decimals < 6 {
            step *= 10.0;
            decimals += 1;
        }
        decimals
    }
}

/// Check every field of `config` against its control bounds
pub fn validate(config: &SpringConfig) -> Result<(), PreviewError> {
    for &field in ConfigField::all() {
        check(field, field.get(config))?;
    }
    Ok(())
}

fn check(field: ConfigField, value: f32) -> Result<(), PreviewError> {
    let bounds = field.bounds();
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(PreviewError::OutOfRange {
            field,
            value,
            min: bounds.min,
            max: bounds.max,
        })
    }
}

/// The current spring configuration of a playground session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfigModel {
    current: SpringConfig,
}

impl SpringConfigModel {
    pub fn new(config: SpringConfig) -> Self {
        Self { current: config }
    }

    pub fn get(&self) -> SpringConfig {
        self.current
    }

    /// Replace exactly one field. The value is stored as given.
    pub fn set(&mut self, field: ConfigField, value: f32) -> SpringConfig {
        self.current = field.with_value(self.current, value);
        debug!(%field, value, "spring parameter changed");
        self.current
    }

    /// [`set`](Self::set) addressed by field name
    pub fn set_by_name(&mut self, field: &str, value: f32) -> Result<SpringConfig, PreviewError> {
        let field = field.parse::<ConfigField>().map_err(|err| {
            warn!(%err, "rejected spring parameter");
            err
        })?;
        Ok(self.set(field, value))
    }

    /// [`set`](Self::set) that refuses values outside the field's bounds
    pub fn set_checked(
        &mut self,
        field: ConfigField,
        value: f32,
    ) -> Result<SpringConfig, PreviewError> {
        check(field, value).map_err(|err| {
            warn!(%err, "rejected spring parameter");
            err
        })?;
        Ok(self.set(field, value))
    }

    /// Replace the whole configuration with a named preset.
    ///
    /// An unknown name is an error and leaves the configuration as it was.
    pub fn apply_preset(&mut self, name: &str) -> Result<SpringConfig, PreviewError> {
        let preset = name.parse::<SpringPreset>().map_err(|err| {
            warn!(%err, "rejected spring preset");
            PreviewError::from(err)
        })?;
        Ok(self.apply(preset))
    }

    pub fn apply(&mut self, preset: SpringPreset) -> SpringConfig {
        self.current = preset.config();
        debug!(%preset, "spring preset applied");
        self.current
    }

    /// The preset the current configuration is equal to, if any
    pub fn active_preset(&self) -> Option<SpringPreset> {
        SpringPreset::matching(&self.current)
    }
}

impl Default for SpringConfigModel {
    fn default() -> Self {
        Self::new(SpringPreset::Default.config())
    }
}
