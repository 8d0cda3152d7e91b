//! Domain types shared across the harness.

use serde::{Deserialize, Serialize};

/// Integer identifying one deterministic test instance.
pub type Seed = u64;

/// Integer score computed by the judge for one run.
pub type Score = i64;

/// Number of seeds in the default benchmark range (1..=100).
pub const DEFAULT_SEED_COUNT: Seed = 100;

/// The default seed list used when no explicit seed is given.
pub fn default_seeds() -> Vec<Seed> {
    (1..=DEFAULT_SEED_COUNT).collect()
}

/// One scored seed, in batch input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedScore {
    /// Seed the solver ran on.
    pub seed: Seed,

    /// Score the judge assigned.
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seeds_range() {
        let seeds = default_seeds();
        assert_eq!(seeds.len(), 100);
        assert_eq!(seeds.first(), Some(&1));
        assert_eq!(seeds.last(), Some(&100));
    }

    #[test]
    fn test_seed_score_serde_roundtrip() {
        let result = SeedScore { seed: 7, score: -42 };
        let json = serde_json::to_string(&result).expect("serialize");
        let back: SeedScore = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(result, back);
    }
}
