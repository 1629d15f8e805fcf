use std::fmt;
use std::ops::AddAssign;

/// Counters of one proof search
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Number of pattern matching runs over a whole term
    pub fit_calls_count: usize,
    /// Number of rewrites produced by the matches
    pub applies_count: usize,
    /// Rewrites spent while normalizing
    pub normalize_steps: usize,
    /// Pairs handed to the search
    pub expanded_pairs: usize,
    /// Candidates dropped because of the node or depth bound
    pub pruned_pairs: usize,
}

impl Statistics {
    pub fn new() -> Statistics {
        Statistics::default()
    }
}

impl AddAssign for Statistics {
    fn add_assign(&mut self, other: Statistics) {
        self.fit_calls_count += other.fit_calls_count;
        self.applies_count += other.applies_count;
        self.normalize_steps += other.normalize_steps;
        self.expanded_pairs += other.expanded_pairs;
        self.pruned_pairs += other.pruned_pairs;
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "fits: {}, applies: {}, normalize steps: {}, expanded: {}, pruned: {}",
            self.fit_calls_count,
            self.applies_count,
            self.normalize_steps,
            self.expanded_pairs,
            self.pruned_pairs
        )
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    #[test]
    fn accumulate() {
        let mut total = Statistics::new();
        total += Statistics {
            fit_calls_count: 2,
            applies_count: 1,
            ..Statistics::default()
        };
        total += Statistics {
            fit_calls_count: 3,
            pruned_pairs: 4,
            ..Statistics::default()
        };
        assert_eq!(total.fit_calls_count, 5);
        assert_eq!(total.applies_count, 1);
        assert_eq!(total.pruned_pairs, 4);
        assert_eq!(total.expanded_pairs, 0);
    }

    #[test]
    fn counters_beyond_u32() {
        let mut total = Statistics {
            applies_count: u32::MAX as usize,
            ..Statistics::default()
        };
        total += Statistics {
            applies_count: 2,
            ..Statistics::default()
        };
        assert_eq!(total.applies_count, u32::MAX as usize + 2);
    }
}
