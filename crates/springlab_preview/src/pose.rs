//! Poses and the target-pose function

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Translate mode moves the element by this offset (px)
pub const TRANSLATE_TARGET: (f32, f32) = (200.0, 100.0);
/// Scale mode grows the element to this factor
pub const SCALE_TARGET: f32 = 1.5;
/// Rotate mode turns the element to this angle (degrees)
pub const ROTATE_TARGET: f32 = 180.0;

/// Instantaneous transform of the preview element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Degrees
    pub rotation: f32,
}

impl Pose {
    pub const REST: Pose = Pose {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotation: 0.0,
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

/// A partial pose: only the channels that are `Some` get retargeted
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseTarget {
    pub translate: Option<(f32, f32)>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
}

impl PoseTarget {
    /// Moves nothing
    pub const IDENTITY: PoseTarget = PoseTarget {
        translate: None,
        scale: None,
        rotation: None,
    };

    /// Every channel back to [`Pose::REST`]
    pub fn rest() -> Self {
        Self {
            translate: Some((Pose::REST.x, Pose::REST.y)),
            scale: Some(Pose::REST.scale),
            rotation: Some(Pose::REST.rotation),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Where `pose` ends up once every addressed channel has arrived
    pub fn resolve(&self, pose: Pose) -> Pose {
        let (x, y) = self.translate.unwrap_or((pose.x, pose.y));
        Pose {
            x,
            y,
            scale: self.scale.unwrap_or(pose.scale),
            rotation: self.rotation.unwrap_or(pose.rotation),
        }
    }
}

/// Which transform the preview demonstrates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    Translate,
    Scale,
    Rotate,
}

impl AnimationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
        }
    }

    pub fn all() -> &'static [AnimationKind] {
        const KINDS: [AnimationKind; 3] = [
            AnimationKind::Translate,
            AnimationKind::Scale,
            AnimationKind::Rotate,
        ];
        &KINDS
    }

    /// Parse a selector name, ignoring ASCII case and surrounding whitespace.
    ///
    /// Anything else is the unknown selector, `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// The pose this kind animates toward
    pub fn target(self) -> PoseTarget {
        match self {
            Self::Translate => PoseTarget {
                translate: Some(TRANSLATE_TARGET),
                ..PoseTarget::IDENTITY
            },
            Self::Scale => PoseTarget {
                scale: Some(SCALE_TARGET),
                ..PoseTarget::IDENTITY
            },
            Self::Rotate => PoseTarget {
                rotation: Some(ROTATE_TARGET),
                ..PoseTarget::IDENTITY
            },
        }
    }
}

impl Display for AnimationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target for a selector; the unknown selector moves nothing.
pub fn target_pose(selector: Option<AnimationKind>) -> PoseTarget {
    selector.map_or(PoseTarget::IDENTITY, AnimationKind::target)
}
