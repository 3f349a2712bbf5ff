//! Spring physics
//!
//! A damped harmonic oscillator `m·x'' + c·x' + k·(x - target) = 0`,
//! advanced with fixed-size RK4 substeps.

use serde::{Deserialize, Serialize};

/// Largest integration substep (seconds).
const MAX_STEP_SECS: f32 = 1.0 / 240.0;

/// Default position delta below which a spring may come to rest.
pub const DEFAULT_REST_DELTA: f32 = 0.01;

/// Default speed below which a spring may come to rest.
pub const DEFAULT_REST_SPEED: f32 = 0.01;

/// Spring tuning: stiffness `k`, damping `c`, mass `m` and initial velocity `v0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Velocity applied when a resting spring starts moving (units/second)
    pub velocity: f32,
}

impl SpringConfig {
    /// Create a config with zero initial velocity
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            velocity: 0.0,
        }
    }

    /// Set the initial velocity
    pub const fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Balanced default (k=100, c=10, m=1)
    pub const fn standard() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }

    /// Quick response with visible overshoot
    pub const fn bouncy() -> Self {
        Self::new(400.0, 17.0, 1.0)
    }

    /// Soft, slightly underdamped motion
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Pronounced oscillation
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Fast with little overshoot
    pub const fn stiff() -> Self {
        Self::new(210.0, 20.0, 1.0)
    }

    /// Heavy, sluggish motion
    pub const fn slow() -> Self {
        Self::new(280.0, 60.0, 10.0)
    }

    /// Damping ratio `ζ = c / (2·sqrt(k·m))`.
    ///
    /// `ζ < 1` oscillates, `ζ = 1` is critically damped, `ζ > 1` creeps.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency `ω0 = sqrt(k/m)` in rad/s
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Copy with stiffness and damping multiplied by the given factors
    pub fn scaled(&self, stiffness_factor: f32, damping_factor: f32) -> Self {
        Self {
            stiffness: self.stiffness * stiffness_factor,
            damping: self.damping * damping_factor,
            ..*self
        }
    }

    /// Substep length that keeps RK4 inside its stability region.
    ///
    /// The fastest eigenvalue of the system is bounded by `c/m + ω0`.
    fn max_stable_step(&self) -> f32 {
        let fastest = self.damping.abs() / self.mass + self.natural_frequency();
        if fastest.is_finite() && fastest > 0.0 {
            MAX_STEP_SECS.min(1.0 / fastest)
        } else {
            MAX_STEP_SECS
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// A single animated scalar driven by a [`SpringConfig`].
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    rest_delta: f32,
    rest_speed: f32,
    settled: bool,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_delta: DEFAULT_REST_DELTA,
            rest_speed: DEFAULT_REST_SPEED,
            settled: true,
        }
    }

    /// Override the rest thresholds
    pub fn with_rest_thresholds(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta;
        self.rest_speed = rest_speed;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Retarget the spring.
    ///
    /// A spring in flight keeps its current velocity. A resting spring
    /// starts with the configured initial velocity.
    pub fn set_target(&mut self, target: f32) {
        if self.settled {
            self.velocity = self.config.velocity;
        }
        self.target = target;
        self.settled = self.velocity == 0.0 && self.value == target;
    }

    /// Swap the parameters of the running oscillator; position and velocity are kept
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Jump to `value` and rest there
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.settled = true;
    }

    /// Advance the simulation by `dt` seconds. Non-positive and non-finite
    /// deltas are ignored.
    pub fn step(&mut self, dt: f32) {
        if self.settled || !(dt > 0.0 && dt.is_finite()) {
            return;
        }

        let max_step = self.config.max_stable_step();
        let steps = (dt / max_step).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
        }

        if !self.value.is_finite() || !self.velocity.is_finite() {
            tracing::warn!(
                stiffness = self.config.stiffness,
                damping = self.config.damping,
                mass = self.config.mass,
                "spring diverged, snapping to target"
            );
            self.snap_to(self.target);
            return;
        }

        if (self.value - self.target).abs() < self.rest_delta
            && self.velocity.abs() < self.rest_speed
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.step(FRAME);
        }
    }

    #[test]
    fn new_spring_is_at_rest() {
        let spring = Spring::new(SpringConfig::standard(), 3.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 3.0);
        assert_eq!(spring.target(), 3.0);
    }

    #[test]
    fn reaches_target_and_snaps() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        assert!(!spring.is_settled());

        run(&mut spring, 240);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(1.0);

        let mut peak = 0.0f32;
        for _ in 0..120 {
            spring.step(FRAME);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0, "wobbly spring should overshoot, peak {peak}");
    }

    #[test]
    fn overdamped_spring_never_overshoots() {
        let config = SpringConfig::new(100.0, 40.0, 1.0);
        assert!(config.damping_ratio() > 1.0);
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(1.0);

        for _ in 0..600 {
            spring.step(FRAME);
            assert!(spring.value() <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn resting_spring_starts_with_config_velocity() {
        let config = SpringConfig::standard().with_velocity(-40.0);
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(10.0);
        assert_eq!(spring.velocity(), -40.0);

        spring.step(0.001);
        assert!(spring.value() < 0.0, "negative kick should move away first");
    }

    #[test]
    fn retarget_in_flight_keeps_velocity() {
        let config = SpringConfig::standard().with_velocity(25.0);
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(100.0);
        run(&mut spring, 6);

        let carried = spring.velocity();
        assert!(carried > 0.0);

        spring.set_target(-50.0);
        assert_eq!(spring.velocity(), carried);
        assert_eq!(spring.target(), -50.0);
    }

    #[test]
    fn set_config_keeps_position_and_velocity() {
        let mut spring = Spring::new(SpringConfig::standard(), 0.0);
        spring.set_target(100.0);
        run(&mut spring, 5);

        let (value, velocity) = (spring.value(), spring.velocity());
        spring.set_config(SpringConfig::bouncy());

        assert_eq!(spring.value(), value);
        assert_eq!(spring.velocity(), velocity);
        assert_eq!(spring.config(), SpringConfig::bouncy());
        assert!(!spring.is_settled());
    }

    #[test]
    fn retarget_to_current_value_at_rest_is_noop() {
        let mut spring = Spring::new(SpringConfig::standard(), 5.0);
        spring.set_target(5.0);
        assert!(spring.is_settled());
        spring.step(FRAME);
        assert_eq!(spring.value(), 5.0);
    }

    #[test]
    fn light_mass_heavy_damping_stays_stable() {
        // c/m = 1000: naive 1/60 s RK4 steps would blow up
        let config = SpringConfig::new(500.0, 100.0, 0.1);
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(1.0);
        run(&mut spring, 600);

        assert!(spring.value().is_finite());
        assert!((spring.value() - 1.0).abs() < 0.01);
    }

    #[test]
    fn large_frame_is_subdivided() {
        let mut a = Spring::new(SpringConfig::gentle(), 0.0);
        let mut b = a.clone();
        a.set_target(50.0);
        b.set_target(50.0);

        a.step(0.25);
        for _ in 0..25 {
            b.step(0.01);
        }
        assert!((a.value() - b.value()).abs() < 0.05);
    }

    #[test]
    fn non_finite_dt_is_ignored() {
        let mut spring = Spring::new(SpringConfig::standard(), 0.0);
        spring.set_target(10.0);
        run(&mut spring, 3);
        let (value, velocity) = (spring.value(), spring.velocity());

        spring.step(f32::INFINITY);
        spring.step(f32::NAN);
        spring.step(-FRAME);

        assert_eq!(spring.value(), value);
        assert_eq!(spring.velocity(), velocity);
        assert!(!spring.is_settled());
    }

    #[test]
    fn damping_ratio_matches_formula() {
        let ratio = SpringConfig::standard().damping_ratio();
        assert!((ratio - 0.5).abs() < 1e-6);
        assert!((SpringConfig::standard().natural_frequency() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn scaled_only_touches_stiffness_and_damping() {
        let base = SpringConfig::new(100.0, 10.0, 2.0).with_velocity(7.0);
        let scaled = base.scaled(2.0, 0.5);
        assert_eq!(scaled, SpringConfig::new(200.0, 5.0, 2.0).with_velocity(7.0));
    }
}
