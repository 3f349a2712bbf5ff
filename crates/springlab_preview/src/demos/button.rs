//! Interactive button: the interaction state picks scale target and spring feel

use smallvec::{smallvec, SmallVec};
use springlab_animation::{Spring, SpringConfig};
use springlab_core::{interaction_machine, InteractionState, PointerEvent, StateMachine};
use tracing::debug;

use super::Demo;
use crate::pose::{AnimationKind, Pose};

pub const IDLE_SCALE: f32 = 1.0;
pub const HOVER_SCALE: f32 = 1.05;
pub const PRESS_SCALE: f32 = 0.95;

pub const HOVER_STIFFNESS_FACTOR: f32 = 1.5;
pub const HOVER_DAMPING_FACTOR: f32 = 0.8;
pub const PRESS_STIFFNESS_FACTOR: f32 = 2.0;
pub const PRESS_DAMPING_FACTOR: f32 = 0.5;

/// How long a triggered click holds the button down (seconds)
pub const PRESS_HOLD_SECS: f32 = 0.15;

// The button travels a few hundredths of a unit
const REST_DELTA: f32 = 0.0005;
const REST_SPEED: f32 = 0.0005;

/// Spring parameters for `state` derived from the base configuration.
///
/// Hover is snappier and a little looser, press is twice as stiff with half
/// the damping. Idle uses the base as is.
pub fn interaction_config(base: SpringConfig, state: InteractionState) -> SpringConfig {
    match state {
        InteractionState::Idle => base,
        InteractionState::Hovered => base.scaled(HOVER_STIFFNESS_FACTOR, HOVER_DAMPING_FACTOR),
        InteractionState::Pressed => base.scaled(PRESS_STIFFNESS_FACTOR, PRESS_DAMPING_FACTOR),
    }
}

pub fn interaction_scale(state: InteractionState) -> f32 {
    match state {
        InteractionState::Idle => IDLE_SCALE,
        InteractionState::Hovered => HOVER_SCALE,
        InteractionState::Pressed => PRESS_SCALE,
    }
}

pub struct InteractiveButton {
    machine: StateMachine<InteractionState, PointerEvent>,
    spring: Spring,
    base: SpringConfig,
    /// Time left until a triggered click releases
    release_in: Option<f32>,
}

impl InteractiveButton {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            machine: interaction_machine(),
            spring: Spring::new(config, IDLE_SCALE).with_rest_thresholds(REST_DELTA, REST_SPEED),
            base: config,
            release_in: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.machine.current_state()
    }

    pub fn scale(&self) -> f32 {
        self.spring.value()
    }

    /// Parameters the spring runs with right now
    pub fn active_config(&self) -> SpringConfig {
        self.spring.config()
    }

    /// Feed a pointer event. A state change retargets the spring and swaps
    /// its parameters; an ignored event changes nothing.
    pub fn send(&mut self, event: PointerEvent) -> InteractionState {
        let before = self.machine.current_state();
        let after = self.machine.send(event);
        if after != before {
            self.enter(after);
        }
        after
    }

    fn enter(&mut self, state: InteractionState) {
        self.spring.set_config(interaction_config(self.base, state));
        self.spring.set_target(interaction_scale(state));
        debug!(state = state.name(), "button state changed");
    }
}

impl Demo for InteractiveButton {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Scale
    }

    fn set_config(&mut self, config: SpringConfig) {
        self.base = config;
        self.spring.set_config(interaction_config(config, self.state()));
    }

    /// A click: press now, release after [`PRESS_HOLD_SECS`]
    fn trigger(&mut self) {
        self.send(PointerEvent::Down);
        self.release_in = Some(PRESS_HOLD_SECS);
    }

    fn tick(&mut self, dt: f32) {
        if let Some(remaining) = self.release_in {
            if remaining <= dt {
                self.release_in = None;
                self.spring.step(remaining);
                self.send(PointerEvent::Up);
                self.spring.step(dt - remaining);
                return;
            }
            self.release_in = Some(remaining - dt);
        }
        self.spring.step(dt);
    }

    fn is_settled(&self) -> bool {
        self.release_in.is_none() && self.spring.is_settled()
    }

    fn poses(&self) -> SmallVec<[Pose; 8]> {
        smallvec![Pose {
            scale: self.spring.value(),
            ..Pose::REST
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FRAME: f32 = 1.0 / 60.0;

    fn run(button: &mut InteractiveButton, seconds: f32) {
        for _ in 0..(seconds / FRAME).round() as usize {
            button.tick(FRAME);
        }
    }

    #[test]
    fn multipliers_are_exact() {
        let base = SpringConfig::new(100.0, 10.0, 1.0);

        let hover = interaction_config(base, InteractionState::Hovered);
        assert_eq!((hover.stiffness, hover.damping, hover.mass), (150.0, 8.0, 1.0));

        let press = interaction_config(base, InteractionState::Pressed);
        assert_eq!((press.stiffness, press.damping, press.mass), (200.0, 5.0, 1.0));

        assert_eq!(interaction_config(base, InteractionState::Idle), base);
    }

    #[test]
    fn hover_grows_and_leave_shrinks() {
        let mut button = InteractiveButton::new(SpringConfig::standard());
        assert_eq!(button.send(PointerEvent::Enter), InteractionState::Hovered);
        assert_eq!(button.active_config().stiffness, 150.0);

        run(&mut button, 3.0);
        assert_eq!(button.scale(), HOVER_SCALE);

        button.send(PointerEvent::Leave);
        assert_eq!(button.active_config(), SpringConfig::standard());
        run(&mut button, 3.0);
        assert_eq!(button.scale(), IDLE_SCALE);
    }

    #[test]
    fn click_presses_then_releases() {
        let mut button = InteractiveButton::new(SpringConfig::standard());
        button.trigger();
        assert_eq!(button.state(), InteractionState::Pressed);

        run(&mut button, 0.1);
        assert!(button.scale() < IDLE_SCALE);
        assert_eq!(button.state(), InteractionState::Pressed);

        run(&mut button, 0.1);
        assert_eq!(button.state(), InteractionState::Hovered);

        run(&mut button, 3.0);
        assert!(button.is_settled());
        assert_eq!(button.scale(), HOVER_SCALE);
    }

    #[test]
    fn base_config_change_keeps_state_multipliers() {
        let mut button = InteractiveButton::new(SpringConfig::standard());
        button.send(PointerEvent::Down);
        button.set_config(SpringConfig::new(200.0, 20.0, 2.0));

        let active = button.active_config();
        assert_eq!((active.stiffness, active.damping, active.mass), (400.0, 10.0, 2.0));
    }

    #[test]
    fn ignored_events_do_not_retarget() {
        let mut button = InteractiveButton::new(SpringConfig::standard());
        assert_eq!(button.send(PointerEvent::Up), InteractionState::Idle);
        assert!(button.is_settled());
    }
}
