//! Card flip

use smallvec::{smallvec, SmallVec};
use springlab_animation::{Spring, SpringConfig};
use tracing::debug;

use super::Demo;
use crate::pose::{AnimationKind, Pose};

/// Rotation of a card showing its back (degrees)
pub const FLIP_ANGLE: f32 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Back,
}

impl CardFace {
    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    /// The face shown at `rotation` degrees
    pub fn at(rotation: f32) -> Self {
        let angle = rotation.rem_euclid(360.0);
        if angle < 90.0 || angle > 270.0 {
            Self::Front
        } else {
            Self::Back
        }
    }
}

/// A card that flips over on every trigger
pub struct CardFlip {
    spring: Spring,
    flipped: bool,
}

impl CardFlip {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            spring: Spring::new(config, 0.0),
            flipped: false,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.spring.value()
    }

    /// Whether the last trigger turned the card to its back
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn face(&self) -> CardFace {
        CardFace::at(self.spring.value())
    }
}

impl Demo for CardFlip {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Rotate
    }

    fn set_config(&mut self, config: SpringConfig) {
        self.spring.set_config(config);
    }

    fn trigger(&mut self) {
        self.flipped = !self.flipped;
        let target = if self.flipped { FLIP_ANGLE } else { 0.0 };
        self.spring.set_target(target);
        debug!(target, "card flip");
    }

    fn tick(&mut self, dt: f32) {
        self.spring.step(dt);
    }

    fn is_settled(&self) -> bool {
        self.spring.is_settled()
    }

    fn poses(&self) -> SmallVec<[Pose; 8]> {
        smallvec![Pose {
            rotation: self.spring.value(),
            ..Pose::REST
        }]
    }
}
