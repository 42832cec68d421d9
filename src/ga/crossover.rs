//! One-point crossover on bit strings.
//!
//! A crossover draw either fails the rate check and produces nothing, or
//! cuts both parents at the same random index and joins parent 1's suffix
//! with parent 2's prefix. The child has the same length as the parents.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::encoding::BitString;
use super::mutation::clamp_probability;

/// Configuration for crossover operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    /// Probability that a pair of parents produces a child.
    pub crossover_rate: f64,
    /// Maximum parent draws spent on one slot of the next generation.
    pub max_attempts_per_slot: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            crossover_rate: 0.7,
            max_attempts_per_slot: 100_000,
        }
    }
}

/// Perform crossover between two parents.
///
/// Returns `None` when the rate check fails. Otherwise the cut point is
/// uniform over `0..=len`. A rate outside `[0, 1]` is clamped into it; NaN
/// counts as 0.
#[must_use]
pub fn crossover<R: Rng>(
    parent1: &BitString,
    parent2: &BitString,
    config: &CrossoverConfig,
    rng: &mut R,
) -> Option<BitString> {
    if !rng.gen_bool(clamp_probability(config.crossover_rate)) {
        return None;
    }
    let cut = rng.gen_range(0..=parent1.len());
    Some(splice(parent1, parent2, cut))
}

/// Join `parent1[cut..]` with `parent2[..cut]`.
fn splice(parent1: &BitString, parent2: &BitString, cut: usize) -> BitString {
    let mut bits = Vec::with_capacity(parent1.len());
    bits.extend_from_slice(parent1.suffix(cut));
    bits.extend_from_slice(parent2.prefix(cut));
    BitString::new(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_splice() {
        let p1 = bits("11110000");
        let p2 = bits("10101010");
        assert_eq!(splice(&p1, &p2, 0), p1);
        assert_eq!(splice(&p1, &p2, 8), p2);
        assert_eq!(splice(&p1, &p2, 3).to_string(), "10000101");
    }

    #[test]
    fn test_crossover_preserves_length() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = CrossoverConfig {
            crossover_rate: 1.0,
            ..CrossoverConfig::default()
        };
        let p1 = bits("000000000000000000000000000000000000");
        let p2 = bits("111111111111111111111111111111111111");
        for _ in 0..100 {
            let child = crossover(&p1, &p2, &config, &mut rng).unwrap();
            assert_eq!(child.len(), 36);
        }
    }

    #[test]
    fn test_no_crossover() {
        let mut rng = SmallRng::seed_from_u64(456);
        let config = CrossoverConfig {
            crossover_rate: 0.0,
            ..CrossoverConfig::default()
        };
        let p1 = bits("0101");
        let p2 = bits("1010");
        assert!(crossover(&p1, &p2, &config, &mut rng).is_none());
    }

    #[test]
    fn test_out_of_range_rate_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(9);
        let p1 = bits("0101");
        let p2 = bits("1010");
        for rate in [-0.1, f64::NAN] {
            let config = CrossoverConfig {
                crossover_rate: rate,
                ..CrossoverConfig::default()
            };
            assert!(crossover(&p1, &p2, &config, &mut rng).is_none());
        }
        let config = CrossoverConfig {
            crossover_rate: 2.0,
            ..CrossoverConfig::default()
        };
        assert_eq!(crossover(&p1, &p2, &config, &mut rng).unwrap().len(), 4);
    }
}
