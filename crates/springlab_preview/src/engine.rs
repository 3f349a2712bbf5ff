//! Animation preview engine
//!
//! Four independent springs (x, y, scale, rotation) chase the target pose of
//! the selected animation kind. The host drives time with [`tick`], so any
//! frame loop or test harness can run the engine.
//!
//! Retargeting never queues. A channel in flight keeps its velocity, a
//! resting channel starts with the configured initial velocity, and channels
//! the new target doesn't address stay where they are.
//!
//! [`tick`]: AnimationPreviewEngine::tick

use serde::Serialize;
use springlab_animation::{AnimationScheduler, Spring, SpringConfig, SpringId};
use tracing::{debug, trace};

use crate::pose::{target_pose, AnimationKind, Pose, PoseTarget};

/// Length of the simple variant's animating window (seconds)
pub const DEFAULT_SESSION_WINDOW_SECS: f32 = 0.1;

// Scale travels 0.5 units; the default thresholds would snap a visible 2%.
const SCALE_REST_DELTA: f32 = 0.001;
const SCALE_REST_SPEED: f32 = 0.001;

// Slack for accumulated frame deltas that land a hair short of the window
const WINDOW_EPSILON: f32 = 1e-4;

/// When an animation session ends
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionPolicy {
    /// `is_animating` clears after this many seconds, springs keep moving
    FixedWindow(f32),
    /// `is_animating` clears when every channel has settled
    UntilSettled,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::FixedWindow(DEFAULT_SESSION_WINDOW_SECS)
    }
}

/// A running animation, from trigger until its policy ends it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSession {
    /// Engine clock at trigger (seconds)
    pub started_at: f32,
    pub target: PoseTarget,
}

/// One sampled frame of the preview
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub time: f32,
    pub pose: Pose,
    pub is_animating: bool,
    pub settled: bool,
}

/// A pose component driven by its own spring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    Scale,
    Rotation,
}

impl Channel {
    pub fn all() -> &'static [Channel] {
        const CHANNELS: [Channel; 4] = [Channel::X, Channel::Y, Channel::Scale, Channel::Rotation];
        &CHANNELS
    }
}

#[derive(Clone, Copy)]
struct Channels {
    x: SpringId,
    y: SpringId,
    scale: SpringId,
    rotation: SpringId,
}

impl Channels {
    fn id(&self, channel: Channel) -> SpringId {
        match channel {
            Channel::X => self.x,
            Channel::Y => self.y,
            Channel::Scale => self.scale,
            Channel::Rotation => self.rotation,
        }
    }
}

pub struct AnimationPreviewEngine {
    config: SpringConfig,
    selector: Option<AnimationKind>,
    policy: SessionPolicy,
    scheduler: AnimationScheduler,
    channels: Channels,
    session: Option<AnimationSession>,
    clock: f32,
}

impl AnimationPreviewEngine {
    /// Engine at rest with the translate selector and the default session policy
    pub fn new(config: SpringConfig) -> Self {
        let mut scheduler = AnimationScheduler::new();
        let channels = Channels {
            x: scheduler.add_spring(Spring::new(config, Pose::REST.x)),
            y: scheduler.add_spring(Spring::new(config, Pose::REST.y)),
            scale: scheduler.add_spring(
                Spring::new(config, Pose::REST.scale)
                    .with_rest_thresholds(SCALE_REST_DELTA, SCALE_REST_SPEED),
            ),
            rotation: scheduler.add_spring(Spring::new(config, Pose::REST.rotation)),
        };

        Self {
            config,
            selector: Some(AnimationKind::default()),
            policy: SessionPolicy::default(),
            scheduler,
            channels,
            session: None,
            clock: 0.0,
        }
    }

    pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Swap parameters on every channel. Springs in flight keep their
    /// position and velocity and follow the new parameters from the next tick.
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
        self.scheduler.set_config_all(config);
        debug!(
            stiffness = config.stiffness,
            damping = config.damping,
            mass = config.mass,
            velocity = config.velocity,
            "preview spring config updated"
        );
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SessionPolicy) {
        self.policy = policy;
    }

    /// Current selector; `None` is the unknown selector
    pub fn selector(&self) -> Option<AnimationKind> {
        self.selector
    }

    pub fn select(&mut self, kind: AnimationKind) {
        self.selector = Some(kind);
    }

    /// Select by name. An unrecognised name selects nothing, so the next
    /// trigger moves no channel.
    pub fn select_name(&mut self, name: &str) -> Option<AnimationKind> {
        self.selector = AnimationKind::parse(name);
        if self.selector.is_none() {
            debug!(name, "unknown animation type, trigger will not move anything");
        }
        self.selector
    }

    /// Target of the current selector
    pub fn target(&self) -> PoseTarget {
        target_pose(self.selector)
    }

    /// Start an animation toward the selected kind's target
    pub fn trigger(&mut self) {
        self.retarget(self.target());
    }

    /// Start an animation back to [`Pose::REST`]
    pub fn reset(&mut self) {
        self.retarget(PoseTarget::rest());
    }

    /// Retarget the addressed channels immediately and open a new session
    pub fn retarget(&mut self, target: PoseTarget) {
        if let Some((x, y)) = target.translate {
            self.scheduler.set_target(self.channels.x, x);
            self.scheduler.set_target(self.channels.y, y);
        }
        if let Some(scale) = target.scale {
            self.scheduler.set_target(self.channels.scale, scale);
        }
        if let Some(rotation) = target.rotation {
            self.scheduler.set_target(self.channels.rotation, rotation);
        }

        self.session = Some(AnimationSession {
            started_at: self.clock,
            target,
        });
        debug!(?target, at = self.clock, "preview retargeted");
    }

    /// Advance the engine by `dt` seconds and sample the result
    pub fn tick(&mut self, dt: f32) -> Frame {
        if dt > 0.0 && dt.is_finite() {
            let was_settled = self.is_settled();
            self.clock += dt;
            self.scheduler.tick(dt);
            if !was_settled && self.is_settled() {
                debug!(at = self.clock, "preview settled");
            }
        }

        if let Some(session) = self.session {
            let ended = match self.policy {
                SessionPolicy::FixedWindow(window) => {
                    self.clock - session.started_at >= window - WINDOW_EPSILON
                }
                SessionPolicy::UntilSettled => self.is_settled(),
            };
            if ended {
                self.session = None;
                debug!(at = self.clock, "animation session ended");
            }
        }

        let frame = self.frame();
        trace!(?frame, "preview tick");
        frame
    }

    pub fn frame(&self) -> Frame {
        Frame {
            time: self.clock,
            pose: self.pose(),
            is_animating: self.is_animating(),
            settled: self.is_settled(),
        }
    }

    pub fn pose(&self) -> Pose {
        let value = |channel| self.channel(channel).map_or(0.0, Spring::value);
        Pose {
            x: value(Channel::X),
            y: value(Channel::Y),
            scale: value(Channel::Scale),
            rotation: value(Channel::Rotation),
        }
    }

    /// The spring behind one pose component
    pub fn channel(&self, channel: Channel) -> Option<&Spring> {
        self.scheduler.get_spring(self.channels.id(channel))
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// Every channel at rest on its target
    pub fn is_settled(&self) -> bool {
        !self.scheduler.has_active_animations()
    }

    /// Seconds of simulated time so far
    pub fn clock(&self) -> f32 {
        self.clock
    }
}

impl Default for AnimationPreviewEngine {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}
