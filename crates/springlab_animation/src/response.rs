//! Closed-form spring response
//!
//! Solves `m·x'' + c·x' + k·(x - to) = 0` analytically for the three damping
//! regimes. Used for settle-time estimates and as a reference trajectory
//! for the integrated [`Spring`](crate::Spring).

use std::time::Duration;

use crate::spring::SpringConfig;

/// Ceiling on estimated settle times
const MAX_SETTLE_SECS: f64 = 60.0;

/// Analytic trajectory from `from` to `to` starting with `initial_velocity`.
#[derive(Clone, Copy, Debug)]
pub struct SpringResponse {
    pub from: f64,
    pub to: f64,
    pub initial_velocity: f64,
    pub config: SpringConfig,
}

impl SpringResponse {
    /// Response for a resting spring kicked with the config's own velocity
    pub fn new(config: SpringConfig, from: f32, to: f32) -> Self {
        Self {
            from: from as f64,
            to: to as f64,
            initial_velocity: config.velocity as f64,
            config,
        }
    }

    /// Position at `t` seconds
    pub fn value_at(&self, t: f64) -> f64 {
        let (beta, omega0) = self.coefficients();
        let x0 = self.from - self.to;
        let v0 = self.initial_velocity;
        let envelope = (-beta * t).exp();

        if (beta - omega0).abs() <= f64::from(f32::EPSILON) {
            // critically damped
            self.to + envelope * (x0 + (beta * x0 + v0) * t)
        } else if beta < omega0 {
            let omega1 = (omega0 * omega0 - beta * beta).sqrt();
            self.to
                + envelope
                    * (x0 * (omega1 * t).cos() + ((beta * x0 + v0) / omega1) * (omega1 * t).sin())
        } else {
            let omega2 = (beta * beta - omega0 * omega0).sqrt();
            self.to
                + envelope
                    * (x0 * (omega2 * t).cosh()
                        + ((beta * x0 + v0) / omega2) * (omega2 * t).sinh())
        }
    }

    /// Time after which the displacement stays within `epsilon` of `to`.
    ///
    /// Oscillating springs use the decay envelope; critically damped and
    /// overdamped springs are scanned forward. Capped at 60 s.
    pub fn settle_duration(&self, epsilon: f64) -> Duration {
        let (beta, omega0) = self.coefficients();
        if beta <= f64::EPSILON || !beta.is_finite() {
            return Duration::from_secs_f64(MAX_SETTLE_SECS);
        }

        let x0 = self.from - self.to;
        let v0 = self.initial_velocity;
        if x0.abs() <= epsilon && v0 == 0.0 {
            return Duration::ZERO;
        }

        let critical = (beta - omega0).abs() <= f64::from(f32::EPSILON);
        if beta < omega0 && !critical {
            // |x(t) - to| <= A·e^(-βt) with the exact underdamped amplitude
            let omega1 = (omega0 * omega0 - beta * beta).sqrt();
            let amplitude = (x0 * x0 + ((beta * x0 + v0) / omega1).powi(2)).sqrt();
            let t = (amplitude / epsilon).ln().max(0.0) / beta;
            return Duration::from_secs_f64(t.min(MAX_SETTLE_SECS));
        }

        let mut t = 0.0;
        let mut last_outside = 0.0;
        while t < MAX_SETTLE_SECS {
            if (self.value_at(t) - self.to).abs() > epsilon {
                last_outside = t;
            } else if t - last_outside > 0.5 {
                break;
            }
            t += 0.005;
        }
        Duration::from_secs_f64((last_outside + 0.005).min(MAX_SETTLE_SECS))
    }

    /// Decay rate `β = c/2m` and natural frequency `ω0 = sqrt(k/m)`
    fn coefficients(&self) -> (f64, f64) {
        let k = self.config.stiffness as f64;
        let c = self.config.damping as f64;
        let m = self.config.mass as f64;
        (c / (2.0 * m), (k / m).sqrt())
    }
}
