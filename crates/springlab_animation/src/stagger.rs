//! Stagger delays for list entrances

/// Delay between consecutive list items (seconds)
pub const DEFAULT_STAGGER_DELAY_SECS: f32 = 0.1;

/// Which item of a list starts first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    #[default]
    Forward,
    Reverse,
    /// The middle item starts first, the ends last
    FromCenter,
}

impl StaggerDirection {
    /// Position of item `index` in the start order of a `total`-item list
    fn rank(self, index: usize, total: usize) -> usize {
        match self {
            Self::Forward => index,
            Self::Reverse => total.saturating_sub(index + 1),
            Self::FromCenter => index.abs_diff(total / 2),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerConfig {
    /// Seconds between one item's start and the next
    pub delay: f32,
    pub direction: StaggerDirection,
    /// Items ranked past this start together with it
    pub limit: Option<usize>,
}

impl StaggerConfig {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    pub fn reverse(self) -> Self {
        self.with_direction(StaggerDirection::Reverse)
    }

    pub fn from_center(self) -> Self {
        self.with_direction(StaggerDirection::FromCenter)
    }

    pub fn with_direction(mut self, direction: StaggerDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn limit(mut self, rank: usize) -> Self {
        self.limit = Some(rank);
        self
    }

    /// Seconds item `index` of `total` waits before it starts
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        let rank = self.direction.rank(index, total);
        let rank = self.limit.map_or(rank, |limit| rank.min(limit));
        rank as f32 * self.delay
    }
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STAGGER_DELAY_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schedule(config: StaggerConfig, total: usize) -> Vec<f32> {
        (0..total).map(|i| config.delay_for_index(i, total)).collect()
    }

    #[test]
    fn default_spacing_is_a_tenth_of_a_second() {
        let delays = schedule(StaggerConfig::default(), 5);
        let expected: Vec<f32> = (0..5).map(|i| i as f32 * 0.1).collect();
        assert_eq!(delays, expected);
    }

    #[test]
    fn directions_reorder_starts() {
        let reverse = StaggerConfig::new(1.0).reverse();
        assert_eq!(schedule(reverse, 4), vec![3.0, 2.0, 1.0, 0.0]);

        let center = StaggerConfig::new(1.0).from_center();
        assert_eq!(schedule(center, 5), vec![2.0, 1.0, 0.0, 1.0, 2.0]);
        assert_eq!(schedule(center, 4), vec![2.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn limit_groups_the_tail() {
        assert_eq!(schedule(StaggerConfig::new(0.5).limit(2), 5), vec![0.0, 0.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn out_of_range_index_does_not_underflow() {
        let config = StaggerConfig::new(1.0).reverse();
        assert_eq!(config.delay_for_index(0, 0), 0.0);
        assert_eq!(config.delay_for_index(7, 3), 0.0);
    }
}
