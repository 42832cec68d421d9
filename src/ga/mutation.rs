//! Per-bit mutation.
//!
//! Mutation flips each bit independently with a small probability. It is
//! applied to every child produced by crossover.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::encoding::BitString;

/// Configuration for mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Probability of flipping each bit.
    pub mutation_rate: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.001,
        }
    }
}

/// Return a copy of `bits` with each bit flipped with probability
/// `config.mutation_rate`.
///
/// A rate outside `[0, 1]` is clamped into it; NaN counts as 0.
#[must_use]
pub fn mutate_bit_string<R: Rng>(bits: &BitString, config: MutationConfig, rng: &mut R) -> BitString {
    let rate = clamp_probability(config.mutation_rate);
    bits.bits()
        .iter()
        .map(|&bit| bit ^ rng.gen_bool(rate))
        .collect::<Vec<_>>()
        .into()
}

/// Clamp a rate into `[0, 1]` so `Rng::gen_bool` accepts it.
pub(super) fn clamp_probability(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::encoding::generate_bit_string;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_rate_is_identity() {
        let mut rng = SmallRng::seed_from_u64(42);
        let bits = generate_bit_string(36, &mut rng);
        let config = MutationConfig { mutation_rate: 0.0 };
        assert_eq!(mutate_bit_string(&bits, config, &mut rng), bits);
    }

    #[test]
    fn test_out_of_range_rate_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(42);
        let bits: BitString = "0011010111".parse().unwrap();

        let high = MutationConfig { mutation_rate: 1.5 };
        assert_eq!(mutate_bit_string(&bits, high, &mut rng).to_string(), "1100101000");

        for rate in [-0.5, f64::NAN, f64::NEG_INFINITY] {
            let config = MutationConfig { mutation_rate: rate };
            assert_eq!(mutate_bit_string(&bits, config, &mut rng), bits);
        }
    }

    #[test]
    fn test_full_rate_flips_every_bit() {
        let mut rng = SmallRng::seed_from_u64(42);
        let bits: BitString = "0011010111".parse().unwrap();
        let config = MutationConfig { mutation_rate: 1.0 };
        let mutated = mutate_bit_string(&bits, config, &mut rng);
        assert_eq!(mutated.to_string(), "1100101000");
    }

    #[test]
    fn test_input_untouched() {
        let mut rng = SmallRng::seed_from_u64(1);
        let bits: BitString = "0000".parse().unwrap();
        let config = MutationConfig { mutation_rate: 1.0 };
        let _ = mutate_bit_string(&bits, config, &mut rng);
        assert_eq!(bits.to_string(), "0000");
    }

    #[test]
    fn test_rate_roughly_respected() {
        let mut rng = SmallRng::seed_from_u64(99);
        let bits = BitString::new(vec![false; 10_000]);
        let config = MutationConfig { mutation_rate: 0.1 };
        let flipped = mutate_bit_string(&bits, config, &mut rng)
            .bits()
            .iter()
            .filter(|&&b| b)
            .count();
        assert!((800..1200).contains(&flipped), "flipped {flipped}");
    }
}
