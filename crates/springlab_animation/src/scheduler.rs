//! Spring scheduling
//!
//! [`AnimationScheduler`] keeps springs in a slot map and moves them forward
//! only when the host calls [`AnimationScheduler::tick`] with a frame delta.
//! Retargets can be deferred by a delay measured in ticked time.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::spring::{Spring, SpringConfig};

new_key_type! {
    pub struct SpringId;
}

#[derive(Clone, Copy, Debug)]
struct Deferred {
    id: SpringId,
    target: f32,
    remaining: f32,
}

#[derive(Default)]
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    pending: SmallVec<[Deferred; 8]>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            pending: SmallVec::new(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.pending.retain(|p| p.id != id);
        self.springs.remove(id)
    }

    /// Mutate one spring in place; `None` when `id` is stale
    pub fn with_spring_mut<R>(
        &mut self,
        id: SpringId,
        f: impl FnOnce(&mut Spring) -> R,
    ) -> Option<R> {
        self.springs.get_mut(id).map(f)
    }

    pub fn value(&self, id: SpringId) -> Option<f32> {
        self.springs.get(id).map(Spring::value)
    }

    /// Retarget immediately, dropping any deferred target for `id`
    pub fn set_target(&mut self, id: SpringId, target: f32) {
        self.pending.retain(|p| p.id != id);
        if let Some(spring) = self.springs.get_mut(id) {
            spring.set_target(target);
        }
    }

    /// Retarget after `delay` seconds of ticks; a later call for the same
    /// spring replaces this one
    pub fn set_target_after(&mut self, id: SpringId, target: f32, delay: f32) {
        if delay <= 0.0 {
            self.set_target(id, target);
            return;
        }
        self.pending.retain(|p| p.id != id);
        self.pending.push(Deferred {
            id,
            target,
            remaining: delay,
        });
    }

    /// Forget all deferred targets
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Swap the physics of every spring without touching its motion state
    pub fn set_config_all(&mut self, config: SpringConfig) {
        self.springs
            .values_mut()
            .for_each(|spring| spring.set_config(config));
    }

    /// Step every spring by `dt` seconds.
    ///
    /// A deferred target that comes due mid-frame splits its spring's frame:
    /// the spring runs toward its old target until the due point, then
    /// toward the new one for the rest of the frame.
    pub fn tick(&mut self, dt: f32) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }

        // (spring, new target, seconds into the frame it comes due)
        let mut fired: SmallVec<[(SpringId, f32, f32); 8]> = SmallVec::new();
        self.pending.retain(|p| {
            if p.remaining > dt {
                p.remaining -= dt;
                true
            } else {
                fired.push((p.id, p.target, p.remaining.max(0.0)));
                false
            }
        });

        for (id, spring) in self.springs.iter_mut() {
            if !fired.iter().any(|&(fired_id, ..)| fired_id == id) {
                spring.step(dt);
            }
        }

        for (id, target, due) in fired {
            if let Some(spring) = self.springs.get_mut(id) {
                spring.step(due);
                spring.set_target(target);
                spring.step(dt - due);
            }
        }
    }

    /// True while a spring is off target or a deferred target is queued
    pub fn has_active_animations(&self) -> bool {
        !self.pending.is_empty() || self.springs.values().any(|spring| !spring.is_settled())
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}
