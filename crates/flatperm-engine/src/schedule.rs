//! Tour counting and the staged growth ceiling.
//!
//! Walks are first only allowed one step, then one more every
//! `growth_batch` completed tours. Raising the ceiling gradually lets
//! the weight estimates for short lengths settle before longer lengths
//! open up, instead of spending every early tour on short walks.

use tracing::info;

/// Drives the outer tour loop.
#[derive(Clone, Debug)]
pub struct TourScheduler {
    tours: u64,
    max_tours: u64,
    ceiling: usize,
    max_size: usize,
    growth_batch: u64,
}

impl TourScheduler {
    /// A scheduler with no completed tours and ceiling 0.
    pub fn new(max_size: usize, max_tours: u64, growth_batch: u64) -> Self {
        Self {
            tours: 0,
            max_tours,
            ceiling: 0,
            max_size,
            growth_batch,
        }
    }

    /// Completed tours.
    pub fn tours(&self) -> u64 {
        self.tours
    }

    /// Number of ceiling raises so far, capped at `max_size`.
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Largest primary value walks may currently reach,
    /// `min(ceiling + 1, max_size)`.
    pub fn limit(&self) -> usize {
        (self.ceiling + 1).min(self.max_size)
    }

    /// `true` once the tour budget is spent.
    pub fn is_done(&self) -> bool {
        self.tours >= self.max_tours
    }

    /// Count a finished tour. Returns `true` if the ceiling was raised.
    pub fn complete_tour(&mut self) -> bool {
        self.tours += 1;
        if self.tours % self.growth_batch != 0 {
            return false;
        }
        info!(
            tours = self.tours,
            max_tours = self.max_tours,
            limit = self.limit(),
            "growth batch complete"
        );
        if self.ceiling < self.max_size {
            self.ceiling += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_step_limit() {
        let s = TourScheduler::new(5, 10, 3);
        assert_eq!(s.limit(), 1);
        assert_eq!(s.tours(), 0);
        assert!(!s.is_done());
    }

    #[test]
    fn zero_size_limit_is_zero() {
        assert_eq!(TourScheduler::new(0, 10, 3).limit(), 0);
    }

    #[test]
    fn ceiling_rises_every_batch() {
        let mut s = TourScheduler::new(5, 100, 3);
        let raised: Vec<bool> = (0..7).map(|_| s.complete_tour()).collect();
        assert_eq!(raised, [false, false, true, false, false, true, false]);
        assert_eq!(s.ceiling(), 2);
        assert_eq!(s.limit(), 3);
    }

    #[test]
    fn limit_is_capped_at_max_size() {
        let mut s = TourScheduler::new(2, 100, 1);
        for _ in 0..10 {
            s.complete_tour();
        }
        assert_eq!(s.ceiling(), 2);
        assert_eq!(s.limit(), 2);
    }

    #[test]
    fn done_after_budget() {
        let mut s = TourScheduler::new(2, 2, 1);
        s.complete_tour();
        assert!(!s.is_done());
        s.complete_tour();
        assert!(s.is_done());
    }
}
