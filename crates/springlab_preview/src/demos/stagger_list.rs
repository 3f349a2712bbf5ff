//! Staggered list entrance

use smallvec::SmallVec;
use springlab_animation::{AnimationScheduler, Spring, SpringConfig, SpringId, StaggerConfig};
use tracing::debug;

use super::Demo;
use crate::pose::{AnimationKind, Pose};

pub const DEFAULT_ITEM_COUNT: usize = 5;

/// Items slide in from this x offset to their slot at 0 (px)
pub const ENTRANCE_OFFSET: f32 = -200.0;

/// A column of items that slide in one after another
pub struct StaggeredList {
    scheduler: AnimationScheduler,
    items: SmallVec<[SpringId; 8]>,
    stagger: StaggerConfig,
}

impl StaggeredList {
    /// `count` items resting in their slots
    pub fn new(config: SpringConfig, count: usize) -> Self {
        let mut scheduler = AnimationScheduler::new();
        let items = (0..count)
            .map(|_| scheduler.add_spring(Spring::new(config, 0.0)))
            .collect();
        Self {
            scheduler,
            items,
            stagger: StaggerConfig::default(),
        }
    }

    pub fn with_stagger(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn stagger(&self) -> StaggerConfig {
        self.stagger
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Start delay of item `index` (seconds)
    pub fn item_delay(&self, index: usize) -> f32 {
        self.stagger.delay_for_index(index, self.items.len())
    }

    /// Current x offset of item `index`
    pub fn item_offset(&self, index: usize) -> Option<f32> {
        self.items
            .get(index)
            .and_then(|&id| self.scheduler.value(id))
    }
}

impl Demo for StaggeredList {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Translate
    }

    fn set_config(&mut self, config: SpringConfig) {
        self.scheduler.set_config_all(config);
    }

    /// Replay the entrance: every item jumps off-screen and slides back
    /// after its stagger delay.
    fn trigger(&mut self) {
        self.scheduler.clear_pending();
        let total = self.items.len();
        for (index, &id) in self.items.iter().enumerate() {
            self.scheduler.with_spring_mut(id, |spring| spring.snap_to(ENTRANCE_OFFSET));
            let delay = self.stagger.delay_for_index(index, total);
            self.scheduler.set_target_after(id, 0.0, delay);
        }
        debug!(items = total, "stagger entrance started");
    }

    fn tick(&mut self, dt: f32) {
        self.scheduler.tick(dt);
    }

    fn is_settled(&self) -> bool {
        !self.scheduler.has_active_animations()
    }

    fn poses(&self) -> SmallVec<[Pose; 8]> {
        self.items
            .iter()
            .map(|&id| Pose {
                x: self.scheduler.value(id).unwrap_or_default(),
                ..Pose::REST
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn delays_step_by_100ms() {
        let list = StaggeredList::new(SpringConfig::standard(), DEFAULT_ITEM_COUNT);
        let delays: Vec<f32> = (0..list.len()).map(|i| list.item_delay(i)).collect();
        assert_eq!(delays, vec![0.0, 0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn items_enter_in_order() {
        let mut list = StaggeredList::new(SpringConfig::standard(), DEFAULT_ITEM_COUNT);
        list.trigger();
        assert!(list.poses().iter().all(|p| p.x == ENTRANCE_OFFSET));

        // 0.15 s in: items 0 and 1 have started, the rest still wait
        for _ in 0..9 {
            list.tick(FRAME);
        }
        assert!(list.item_offset(0) > Some(ENTRANCE_OFFSET));
        assert!(list.item_offset(1) > Some(ENTRANCE_OFFSET));
        assert_eq!(list.item_offset(2), Some(ENTRANCE_OFFSET));
        assert_eq!(list.item_offset(4), Some(ENTRANCE_OFFSET));
        assert!(list.item_offset(0) > list.item_offset(1));

        for _ in 0..300 {
            list.tick(FRAME);
        }
        assert!(list.is_settled());
        assert!(list.poses().iter().all(|p| *p == Pose::REST));
    }

    #[test]
    fn reverse_stagger_starts_from_the_bottom() {
        let mut list = StaggeredList::new(SpringConfig::stiff(), 3)
            .with_stagger(StaggerConfig::default().reverse());
        list.trigger();
        list.tick(FRAME);

        assert_eq!(list.item_offset(0), Some(ENTRANCE_OFFSET));
        assert!(list.item_offset(2) > Some(ENTRANCE_OFFSET));
    }

    #[test]
    fn retrigger_restarts_the_entrance() {
        let mut list = StaggeredList::new(SpringConfig::standard(), 2);
        list.trigger();
        for _ in 0..30 {
            list.tick(FRAME);
        }
        list.trigger();
        assert_eq!(list.item_offset(1), Some(ENTRANCE_OFFSET));
        assert!(!list.is_settled());
    }
}
