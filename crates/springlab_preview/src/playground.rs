//! The playground session
//!
//! Owns the configuration model, the preview engine and the demos, and keeps
//! them in step. Hosts hold one `Playground` per open playground and pass it
//! around explicitly.

use smallvec::SmallVec;
use springlab_animation::{SpringConfig, SpringPreset};
use springlab_core::{InteractionState, PointerEvent};

use crate::demos::{CardFlip, Demo, InteractiveButton, StaggeredList, DEFAULT_ITEM_COUNT};
use crate::engine::{AnimationPreviewEngine, Frame, SessionPolicy};
use crate::error::PreviewError;
use crate::model::{ConfigField, SpringConfigModel};
use crate::pose::{AnimationKind, Pose};

pub struct Playground {
    model: SpringConfigModel,
    engine: AnimationPreviewEngine,
    list: StaggeredList,
    button: InteractiveButton,
    card: CardFlip,
}

impl Playground {
    /// Default preset, translate selected, fixed-window sessions
    pub fn new() -> Self {
        Self::from_config(SpringPreset::Default.config())
    }

    pub fn from_config(config: SpringConfig) -> Self {
        Self {
            model: SpringConfigModel::new(config),
            engine: AnimationPreviewEngine::new(config),
            list: StaggeredList::new(config, DEFAULT_ITEM_COUNT),
            button: InteractiveButton::new(config),
            card: CardFlip::new(config),
        }
    }

    pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.engine.set_policy(policy);
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.model.get()
    }

    pub fn model(&self) -> &SpringConfigModel {
        &self.model
    }

    pub fn set(&mut self, field: ConfigField, value: f32) -> SpringConfig {
        let config = self.model.set(field, value);
        self.push_config(config);
        config
    }

    pub fn set_by_name(&mut self, field: &str, value: f32) -> Result<SpringConfig, PreviewError> {
        let config = self.model.set_by_name(field, value)?;
        self.push_config(config);
        Ok(config)
    }

    /// Apply a preset by name; an unknown name changes nothing
    pub fn apply_preset(&mut self, name: &str) -> Result<SpringConfig, PreviewError> {
        let config = self.model.apply_preset(name)?;
        self.push_config(config);
        Ok(config)
    }

    pub fn apply(&mut self, preset: SpringPreset) -> SpringConfig {
        let config = self.model.apply(preset);
        self.push_config(config);
        config
    }

    fn push_config(&mut self, config: SpringConfig) {
        self.engine.set_config(config);
        self.list.set_config(config);
        self.button.set_config(config);
        self.card.set_config(config);
    }

    pub fn selector(&self) -> Option<AnimationKind> {
        self.engine.selector()
    }

    pub fn select(&mut self, kind: AnimationKind) {
        self.engine.select(kind);
    }

    pub fn select_name(&mut self, name: &str) -> Option<AnimationKind> {
        self.engine.select_name(name)
    }

    /// Animate the preview toward the selected target and play that kind's demo
    pub fn trigger(&mut self) {
        self.engine.trigger();
        if let Some(demo) = self.active_demo_mut() {
            demo.trigger();
        }
    }

    /// Animate the preview back to rest
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Pointer input for the interactive button
    pub fn pointer(&mut self, event: PointerEvent) -> InteractionState {
        self.button.send(event)
    }

    pub fn tick(&mut self, dt: f32) -> Frame {
        self.list.tick(dt);
        self.button.tick(dt);
        self.card.tick(dt);
        self.engine.tick(dt)
    }

    pub fn frame(&self) -> Frame {
        self.engine.frame()
    }

    pub fn pose(&self) -> Pose {
        self.engine.pose()
    }

    pub fn engine(&self) -> &AnimationPreviewEngine {
        &self.engine
    }

    pub fn stagger_list(&self) -> &StaggeredList {
        &self.list
    }

    pub fn button(&self) -> &InteractiveButton {
        &self.button
    }

    pub fn card(&self) -> &CardFlip {
        &self.card
    }

    /// Demo for the current selector, if any
    pub fn active_demo(&self) -> Option<&dyn Demo> {
        match self.engine.selector()? {
            AnimationKind::Translate => Some(&self.list),
            AnimationKind::Scale => Some(&self.button),
            AnimationKind::Rotate => Some(&self.card),
        }
    }

    fn active_demo_mut(&mut self) -> Option<&mut dyn Demo> {
        match self.engine.selector()? {
            AnimationKind::Translate => Some(&mut self.list),
            AnimationKind::Scale => Some(&mut self.button),
            AnimationKind::Rotate => Some(&mut self.card),
        }
    }

    /// Element poses of the active demo
    pub fn demo_poses(&self) -> SmallVec<[Pose; 8]> {
        self.active_demo()
            .map(|demo| demo.poses())
            .unwrap_or_default()
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn config_changes_reach_engine_and_demos() {
        let mut playground = Playground::new();
        playground.set(ConfigField::Stiffness, 250.0);

        assert_eq!(playground.engine().config().stiffness, 250.0);
        assert_eq!(playground.button().active_config().stiffness, 250.0);

        playground.apply(SpringPreset::Wobbly);
        assert_eq!(playground.engine().config(), SpringConfig::wobbly());
    }

    #[test]
    fn failed_preset_changes_nothing_downstream() {
        let mut playground = Playground::new();
        playground.apply(SpringPreset::Stiff);

        assert!(playground.apply_preset("nope").is_err());
        assert_eq!(playground.config(), SpringConfig::stiff());
        assert_eq!(playground.engine().config(), SpringConfig::stiff());
    }

    #[test]
    fn trigger_plays_only_the_selected_demo() {
        let mut playground = Playground::new();
        playground.select(AnimationKind::Rotate);
        playground.trigger();

        assert!(playground.card().is_flipped());
        assert_eq!(playground.button().state(), InteractionState::Idle);
        assert!(playground.stagger_list().is_settled());

        for _ in 0..300 {
            playground.tick(FRAME);
        }
        assert_eq!(playground.demo_poses()[0].rotation, 180.0);
    }

    #[test]
    fn unknown_selector_has_no_demo() {
        let mut playground = Playground::new();
        playground.select_name("zoom");
        assert!(playground.active_demo().is_none());
        assert!(playground.demo_poses().is_empty());

        playground.trigger();
        assert_eq!(playground.tick(FRAME).pose, Pose::REST);
    }
}
