//! springlab animation system
//!
//! Spring physics, named presets, stagger delays, and a frame scheduler.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//!   and initial velocity
//! - **Closed-form Response**: analytic damped-oscillator solution for
//!   settle-time estimates and reference trajectories
//! - **Presets**: the six built-in spring configurations
//! - **Stagger**: per-item start delays for list entrances
//! - **Interruptible**: retargeted springs inherit their in-flight velocity

pub mod presets;
pub mod response;
pub mod scheduler;
pub mod spring;
pub mod stagger;

pub use presets::{ParsePresetError, SpringPreset};
pub use response::SpringResponse;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
pub use stagger::{StaggerConfig, StaggerDirection, DEFAULT_STAGGER_DELAY_SECS};
