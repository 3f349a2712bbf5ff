//! Label keys for user-facing text
//!
//! The preview never renders text itself. Controls are described by stable
//! keys, and the host resolves them through a [`LabelSource`], typically
//! its localized message catalog.

use springlab_animation::SpringConfig;

use crate::model::ConfigField;
use crate::pose::AnimationKind;

pub const TITLE: &str = "title";
pub const SUBTITLE: &str = "subtitle";

pub const SPRING_CONFIGURATION_TITLE: &str = "springConfiguration.title";
pub const PRESETS_TITLE: &str = "presets.title";
pub const ANIMATION_TYPE_TITLE: &str = "animationType.title";

pub const PREVIEW_TITLE: &str = "preview.title";
pub const PREVIEW_DESCRIPTION: &str = "preview.description";
pub const PREVIEW_GUIDE: &str = "preview.guide";
pub const PREVIEW_TRIGGER: &str = "preview.triggerButton";
pub const PREVIEW_CURRENT_CONFIG: &str = "preview.currentConfig";

pub const UNDERSTANDING_TITLE: &str = "understanding.title";

/// Resolves a label key to display text
pub trait LabelSource {
    fn label(&self, key: &str) -> String;
}

/// Echoes keys back; useful headless and as a fallback
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyLabels;

impl LabelSource for KeyLabels {
    fn label(&self, key: &str) -> String {
        key.to_string()
    }
}

impl<F> LabelSource for F
where
    F: Fn(&str) -> String,
{
    fn label(&self, key: &str) -> String {
        self(key)
    }
}

impl ConfigField {
    /// `springConfiguration.<field>.label`
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Stiffness => "springConfiguration.stiffness.label",
            Self::Damping => "springConfiguration.damping.label",
            Self::Mass => "springConfiguration.mass.label",
            Self::Velocity => "springConfiguration.velocity.label",
        }
    }

    /// `springConfiguration.<field>.description`
    pub fn description_key(self) -> &'static str {
        match self {
            Self::Stiffness => "springConfiguration.stiffness.description",
            Self::Damping => "springConfiguration.damping.description",
            Self::Mass => "springConfiguration.mass.description",
            Self::Velocity => "springConfiguration.velocity.description",
        }
    }

    /// Longer explanation of what the parameter does physically
    pub fn understanding_key(self) -> &'static str {
        match self {
            Self::Stiffness => "understanding.stiffness",
            Self::Damping => "understanding.damping",
            Self::Mass => "understanding.mass",
            Self::Velocity => "understanding.velocity",
        }
    }
}

impl AnimationKind {
    /// `animationType.<kind>`
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Translate => "animationType.translate",
            Self::Scale => "animationType.scale",
            Self::Rotate => "animationType.rotate",
        }
    }
}

/// The "current config" readout: one resolved label and value per field
pub fn config_summary(config: &SpringConfig, labels: &impl LabelSource) -> Vec<(String, f32)> {
    ConfigField::all()
        .iter()
        .map(|&field| (labels.label(field.label_key()), field.get(config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use springlab_animation::SpringPreset;

    #[test]
    fn keys_follow_naming_scheme() {
        for &field in ConfigField::all() {
            assert_eq!(
                field.label_key(),
                format!("springConfiguration.{}.label", field.name())
            );
            assert_eq!(
                field.description_key(),
                format!("springConfiguration.{}.description", field.name())
            );
            assert_eq!(
                field.understanding_key(),
                format!("understanding.{}", field.name())
            );
        }
        for &kind in AnimationKind::all() {
            assert_eq!(kind.label_key(), format!("animationType.{}", kind.name()));
        }
        for preset in SpringPreset::all() {
            assert_eq!(preset.label_key(), format!("presets.{}", preset.name()));
        }
    }

    #[test]
    fn page_keys_are_distinct_and_sectioned() {
        let keys = [
            TITLE,
            SUBTITLE,
            SPRING_CONFIGURATION_TITLE,
            PRESETS_TITLE,
            ANIMATION_TYPE_TITLE,
            PREVIEW_TITLE,
            PREVIEW_DESCRIPTION,
            PREVIEW_GUIDE,
            PREVIEW_TRIGGER,
            PREVIEW_CURRENT_CONFIG,
            UNDERSTANDING_TITLE,
        ];
        let mut unique = keys.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());

        assert_eq!(PREVIEW_TRIGGER, "preview.triggerButton");
        assert!(keys[5..10].iter().all(|key| key.starts_with("preview.")));
        assert_eq!(KeyLabels.label(UNDERSTANDING_TITLE), "understanding.title");
    }

    #[test]
    fn summary_resolves_through_source() {
        let summary = config_summary(&SpringConfig::bouncy(), &KeyLabels);
        assert_eq!(
            summary,
            vec![
                ("springConfiguration.stiffness.label".to_string(), 400.0),
                ("springConfiguration.damping.label".to_string(), 17.0),
                ("springConfiguration.mass.label".to_string(), 1.0),
                ("springConfiguration.velocity.label".to_string(), 0.0),
            ]
        );

        let upper = |key: &str| key.to_uppercase();
        assert_eq!(
            config_summary(&SpringConfig::bouncy(), &upper)[2].0,
            "SPRINGCONFIGURATION.MASS.LABEL"
        );
    }
}
