//! Fixed-size populations of candidates.
//!
//! The population owns fitness scoring, the exact-match test, roulette-wheel
//! selection, and reproduction into the next generation.

// Targets are compared against decoded floating-point values
#![allow(clippy::cast_precision_loss)]

use log::trace;
use rand::Rng;

use super::candidate::Candidate;
use super::crossover::crossover;
use super::mutation::mutate_bit_string;
use super::selection::roulette_wheel_select;
use crate::config::SearchConfig;
use crate::error::{GaError, Result};

/// Fitness given to a candidate that evaluates exactly to the target, in
/// place of the infinite `1 / 0`.
pub const EXACT_MATCH_FITNESS: f64 = 1.0e9;

/// Weight given to candidates whose fitness is negative (they overshoot
/// the target).
pub const NEGATIVE_FITNESS_FLOOR: f64 = 0.01;

/// A generation of candidates searching for one target value.
#[derive(Debug, Clone)]
pub struct Population {
    target: i64,
    members: Vec<Candidate>,
    config: SearchConfig,
}

impl Population {
    /// Create a population of random candidates.
    ///
    /// The size is `size` when given, otherwise the configured size rule
    /// (explicit `population_size`, else `population_multiplier * |target|`).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the size
    /// resolves to zero.
    pub fn new<R: Rng>(
        target: i64,
        size: Option<usize>,
        config: &SearchConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let size = match size {
            Some(size) => config.check_population_size(size, target)?,
            None => config.population_size_for(target)?,
        };

        let members = (0..size)
            .map(|_| Candidate::random(rng, config.bit_string_length))
            .collect();

        Ok(Self {
            target,
            members,
            config: *config,
        })
    }

    /// Create a population from existing candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `members` is empty.
    pub fn from_members(target: i64, members: Vec<Candidate>, config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        if members.is_empty() {
            return Err(GaError::EmptyPopulation { target });
        }
        Ok(Self {
            target,
            members,
            config: *config,
        })
    }

    /// The value being searched for.
    #[must_use]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Current members in order.
    #[must_use]
    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Score every member as `1 / (target - value)`.
    ///
    /// The score is negative when a member overshoots the target. A member
    /// that hits the target exactly gets [`EXACT_MATCH_FITNESS`].
    pub fn calculate_fitness_scores(&mut self) {
        let target = self.target;
        for candidate in &mut self.members {
            let value = candidate.number();
            candidate.fitness = Some(if is_exact(value, target) {
                EXACT_MATCH_FITNESS
            } else {
                1.0 / (target as f64 - value)
            });
        }
    }

    /// Clamp negative fitness to [`NEGATIVE_FITNESS_FLOOR`].
    pub fn normalize_fitness_scores(&mut self) {
        for fitness in self.members.iter_mut().filter_map(|c| c.fitness.as_mut()) {
            if *fitness < 0.0 {
                *fitness = NEGATIVE_FITNESS_FLOOR;
            }
        }
    }

    /// First member whose decoded value equals the target.
    #[must_use]
    pub fn return_solution_if_found(&self) -> Option<&Candidate> {
        self.members
            .iter()
            .find(|candidate| is_exact(candidate.number(), self.target))
    }

    /// Member whose decoded value is nearest the target.
    #[must_use]
    pub fn closest(&self) -> Option<&Candidate> {
        let target = self.target as f64;
        self.members.iter().min_by(|a, b| {
            (a.number() - target)
                .abs()
                .total_cmp(&(b.number() - target).abs())
        })
    }

    /// Fitness values in member order; unscored members count as zero.
    #[must_use]
    pub fn fitness_values(&self) -> Vec<f64> {
        self.members
            .iter()
            .map(|candidate| candidate.fitness.unwrap_or(0.0))
            .collect()
    }

    /// Normalize fitness, then pick one member by roulette wheel.
    pub fn roulette_wheel_select<R: Rng>(&mut self, rng: &mut R) -> Option<&Candidate> {
        self.normalize_fitness_scores();
        let idx = roulette_wheel_select(&self.fitness_values(), rng)?;
        self.members.get(idx)
    }

    /// Replace the members with a new generation of the same size.
    ///
    /// Each slot draws two parents by roulette wheel until crossover
    /// succeeds, then mutates the child.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::ReproductionStalled`] if a slot needs more than
    /// `max_attempts_per_slot` draws.
    pub fn reproduce<R: Rng>(&mut self, rng: &mut R) -> Result<&[Candidate]> {
        self.normalize_fitness_scores();
        let weights = self.fitness_values();
        let size = self.members.len();
        let crossover_config = self.config.crossover;
        let max_attempts = crossover_config.max_attempts_per_slot;

        let mut next_generation = Vec::with_capacity(size);
        while next_generation.len() < size {
            let mut attempts = 0;
            let child = loop {
                if attempts >= max_attempts {
                    return Err(GaError::ReproductionStalled { attempts });
                }
                attempts += 1;

                let parent1 = roulette_wheel_select(&weights, rng).and_then(|i| self.members.get(i));
                let parent2 = roulette_wheel_select(&weights, rng).and_then(|i| self.members.get(i));
                let (Some(parent1), Some(parent2)) = (parent1, parent2) else {
                    continue;
                };
                if let Some(child) =
                    crossover(&parent1.bit_string, &parent2.bit_string, &crossover_config, rng)
                {
                    break child;
                }
            };
            trace!("slot {} filled after {attempts} attempts", next_generation.len());

            let mutated = mutate_bit_string(&child, self.config.mutation, rng);
            next_generation.push(Candidate::new(mutated));
        }

        self.members = next_generation;
        Ok(&self.members)
    }
}

/// Whether a decoded value is exactly the target.
#[allow(clippy::float_cmp)]
fn is_exact(value: f64, target: i64) -> bool {
    value == target as f64
}
