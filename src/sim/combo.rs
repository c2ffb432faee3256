//! Combo and scoring
//!
//! Consecutive brick hits inside the combo window score progressively more.
//! The window is a deadline stored as data and checked by the session's timer
//! poll, so a reset can never race a frame.

use crate::consts::{BASE_SCORE, COMBO_MULTIPLIER, COMBO_WINDOW_MS, LIFE_BONUS_INTERVAL};

#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    /// Hits in the current chain
    pub count: u32,
    /// When the chain lapses (ms); `None` when no chain is running
    pub deadline: Option<f64>,
}

impl ComboTracker {
    /// Count a hit at `now` and return the points it is worth
    pub fn register_hit(&mut self, now: f64) -> u32 {
        self.count += 1;
        self.deadline = Some(now + COMBO_WINDOW_MS);
        points_for_hit(self.count)
    }

    /// Lapse the chain if its deadline has passed. Returns true on reset.
    pub fn expire(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                log::debug!("Combo of {} lapsed", self.count);
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.deadline = None;
    }
}

/// Points for the `depth`-th consecutive hit: the bonus covers only the
/// excess over the first hit, so 1, 3, 5, 7...
#[inline]
pub fn points_for_hit(depth: u32) -> u32 {
    let bonus = if depth > 1 {
        (depth - 1) * COMBO_MULTIPLIER
    } else {
        0
    };
    BASE_SCORE + bonus
}

/// Whether a post-hit score earns an extra life. Only exact multiples count;
/// a hit that jumps past one does not.
#[inline]
pub fn awards_life(score: u32) -> bool {
    score != 0 && score % LIFE_BONUS_INTERVAL == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_chain_scores_odd_numbers() {
        let mut combo = ComboTracker::default();
        let points: Vec<u32> = (0..4).map(|i| combo.register_hit(i as f64 * 100.0)).collect();
        assert_eq!(points, vec![1, 3, 5, 7]);
        assert_eq!(combo.count, 4);
    }

    #[test]
    fn test_lapse_resets_to_base() {
        let mut combo = ComboTracker::default();
        combo.register_hit(0.0);
        combo.register_hit(500.0);
        assert!(!combo.expire(2499.0));
        assert!(combo.expire(2500.0));
        assert_eq!(combo.count, 0);
        assert_eq!(combo.register_hit(2600.0), 1);
    }

    #[test]
    fn test_hit_restarts_window() {
        let mut combo = ComboTracker::default();
        combo.register_hit(0.0);
        combo.register_hit(1900.0);
        // First deadline (2000) has passed but the second hit pushed it out
        assert!(!combo.expire(2100.0));
        assert_eq!(combo.register_hit(2200.0), 5);
    }

    #[test]
    fn test_life_bonus_exact_multiples_only() {
        assert!(!awards_life(0));
        assert!(!awards_life(99));
        assert!(awards_life(100));
        assert!(!awards_life(101));
        assert!(awards_life(300));
    }

    proptest! {
        #[test]
        fn nth_hit_scores_one_plus_twice_excess(n in 1u32..200) {
            let mut combo = ComboTracker::default();
            let mut last = 0;
            for i in 0..n {
                last = combo.register_hit(i as f64);
            }
            prop_assert_eq!(last, 1 + 2 * (n - 1));
        }

        #[test]
        fn unbroken_chain_sums_to_square(n in 1u32..200) {
            let total: u32 = (1..=n).map(points_for_hit).sum();
            prop_assert_eq!(total, n * n);
        }
    }
}
