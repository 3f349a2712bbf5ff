//! Per-mode demo compositions
//!
//! Each animation kind has a richer showcase next to the plain preview:
//! a staggered list for translate, an interactive button for scale and a
//! flipping card for rotate. Demos own their springs and are driven with
//! the same explicit `tick(dt)` as the engine.

mod button;
mod card_flip;
mod stagger_list;

pub use button::{
    interaction_config, interaction_scale, InteractiveButton, HOVER_DAMPING_FACTOR,
    HOVER_SCALE, HOVER_STIFFNESS_FACTOR, IDLE_SCALE, PRESS_DAMPING_FACTOR, PRESS_HOLD_SECS,
    PRESS_SCALE, PRESS_STIFFNESS_FACTOR,
};
pub use card_flip::{CardFace, CardFlip, FLIP_ANGLE};
pub use stagger_list::{StaggeredList, DEFAULT_ITEM_COUNT, ENTRANCE_OFFSET};

use smallvec::SmallVec;
use springlab_animation::SpringConfig;

use crate::pose::{AnimationKind, Pose};

/// A self-contained animation showcase
pub trait Demo {
    /// The animation kind this demo illustrates
    fn kind(&self) -> AnimationKind;

    /// Apply new base spring parameters, live
    fn set_config(&mut self, config: SpringConfig);

    /// Play the demo once
    fn trigger(&mut self);

    fn tick(&mut self, dt: f32);

    fn is_settled(&self) -> bool;

    /// Current pose of every element, in display order
    fn poses(&self) -> SmallVec<[Pose; 8]>;
}
