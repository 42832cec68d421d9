//! Candidate solutions: a bit string plus its last fitness score.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::decoder::{bit_string_to_expression, Expression};
use super::encoding::{generate_bit_string, BitString};

/// A member of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Encoded expression.
    pub bit_string: BitString,
    /// Fitness from the most recent scoring pass; `None` until scored.
    pub fitness: Option<f64>,
}

impl Candidate {
    /// Create an unscored candidate from a bit string.
    #[must_use]
    pub fn new(bit_string: BitString) -> Self {
        Self {
            bit_string,
            fitness: None,
        }
    }

    /// Create an unscored candidate with a random bit string.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R, length: usize) -> Self {
        Self::new(generate_bit_string(length, rng))
    }

    /// The decoded expression. Recomputed on every call.
    #[must_use]
    pub fn expression(&self) -> Expression {
        bit_string_to_expression(&self.bit_string)
    }

    /// The decoded value. Recomputed on every call so it always reflects
    /// the current bit string.
    #[must_use]
    pub fn number(&self) -> f64 {
        self.expression().evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_number_from_bit_string() {
        let candidate = Candidate::new("0010001010101110101101110010".parse().unwrap());
        assert!((candidate.number() - 9.0).abs() < 1e-9);
        assert_eq!(candidate.fitness, None);
    }

    #[test]
    fn test_number_tracks_bit_string() {
        let mut candidate = Candidate::new("0001".parse().unwrap());
        assert!((candidate.number() - 1.0).abs() < 1e-9);
        candidate.bit_string = "1000".parse().unwrap();
        assert!((candidate.number() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_random_candidate() {
        let mut rng = SmallRng::seed_from_u64(3);
        let candidate = Candidate::random(&mut rng, 36);
        assert_eq!(candidate.bit_string.len(), 36);
        assert!(candidate.fitness.is_none());
    }
}
