//! springlab preview
//!
//! The logical core of the spring playground:
//!
//! - [`SpringConfigModel`]: the four tunable parameters and preset application
//! - [`AnimationPreviewEngine`]: target poses per animation type and the
//!   frame-driven spring interpolation toward them
//! - [`demos`]: per-mode compositions (staggered list, interactive button,
//!   card flip)
//! - [`Playground`]: an explicitly owned session tying them together
//!
//! Nothing here renders or translates text. Hosts sample [`Frame`]s from
//! [`Playground::tick`] and resolve label keys through a [`LabelSource`].
//!
//! # Example
//!
//! ```rust
//! use springlab_preview::{AnimationKind, Playground};
//!
//! let mut playground = Playground::new();
//! playground.apply_preset("bouncy").unwrap();
//! playground.select(AnimationKind::Rotate);
//! playground.trigger();
//!
//! for _ in 0..300 {
//!     playground.tick(1.0 / 60.0);
//! }
//! assert_eq!(playground.pose().rotation, 180.0);
//! ```

pub mod demos;
pub mod engine;
mod error;
pub mod labels;
pub mod model;
mod playground;
pub mod pose;

pub use engine::{AnimationPreviewEngine, AnimationSession, Channel, Frame, SessionPolicy};
pub use error::PreviewError;
pub use labels::{KeyLabels, LabelSource};
pub use model::{ConfigField, FieldBounds, SpringConfigModel};
pub use playground::Playground;
pub use pose::{target_pose, AnimationKind, Pose, PoseTarget};

pub use springlab_animation::{SpringConfig, SpringPreset};
pub use springlab_core::{InteractionState, PointerEvent};
