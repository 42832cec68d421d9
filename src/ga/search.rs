//! Search driver: the generation loop.
//!
//! The driver is an explicit state machine:
//!
//! ```text
//! Init → Scoring → Check ─┬─→ Done
//!          ↑              │
//!          └─ Reproduce ←─┘
//! ```
//!
//! With no generation cap the loop runs until some candidate decodes to the
//! target. Termination is probabilistic, not guaranteed.

// Statistics use intentional casts
#![allow(clippy::cast_precision_loss)]

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::candidate::Candidate;
use super::decoder::Expression;
use super::population::Population;
use super::selection::SelectionStats;
use crate::config::SearchConfig;
use crate::error::{GaError, Result};

/// Position of a driver in the generation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchState {
    /// Population not yet built.
    Init,
    /// Next step scores the current generation.
    Scoring,
    /// Next step checks for an exact match.
    Check,
    /// Next step breeds the next generation.
    Reproduce,
    /// A solution was found.
    Done,
}

/// Shared flag that asks a running search to stop.
///
/// Clones share the same flag, so one clone can be handed to another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationStats {
    /// Generation number (0 is the initial population).
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Fitness standard deviation.
    pub fitness_std: f64,
    /// Decoded value nearest the target.
    pub closest_value: f64,
}

/// Overall statistics from a search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// Statistics per generation.
    pub generations: Vec<GenerationStats>,
    /// Total time in seconds.
    pub elapsed_seconds: f64,
}

/// A candidate that decodes exactly to the target.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// The value searched for.
    pub target: i64,
    /// The matching candidate.
    pub candidate: Candidate,
    /// Its decoded expression.
    pub expression: Expression,
    /// Its decoded value (equal to `target`).
    pub value: f64,
    /// Generation in which it was found (0 is the initial population).
    pub generation: usize,
    /// Search statistics.
    pub stats: SearchStats,
}

/// Drives one search from an initial population to a solution.
#[derive(Debug)]
pub struct SearchDriver<R: Rng = SmallRng> {
    target: i64,
    config: SearchConfig,
    rng: R,
    state: SearchState,
    population: Option<Population>,
    generations_scored: usize,
    stats: Vec<GenerationStats>,
    solution: Option<Candidate>,
    cancel: Option<CancelToken>,
    started: Instant,
}

impl<R: Rng> SearchDriver<R> {
    /// Create a driver. The configuration and population size are checked
    /// here, before any work is done.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the population
    /// size resolves to zero.
    pub fn new(target: i64, config: &SearchConfig, rng: R) -> Result<Self> {
        config.validate()?;
        config.population_size_for(target)?;
        Ok(Self {
            target,
            config: *config,
            rng,
            state: SearchState::Init,
            population: None,
            generations_scored: 0,
            stats: Vec::new(),
            solution: None,
            cancel: None,
            started: Instant::now(),
        })
    }

    /// Attach a cancellation token, checked before every reproduction.
    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of generations scored so far.
    #[must_use]
    pub fn generations_scored(&self) -> usize {
        self.generations_scored
    }

    /// The current population, once built.
    #[must_use]
    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    /// Per-generation statistics so far.
    #[must_use]
    pub fn stats(&self) -> &[GenerationStats] {
        &self.stats
    }

    /// Advance one state transition and return the new state.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::GenerationLimit`] when the cap is reached without
    /// a match, [`GaError::Cancelled`] when the token was triggered, and
    /// propagates reproduction errors.
    pub fn step(&mut self) -> Result<SearchState> {
        if self.state == SearchState::Init {
            let population = Population::new(self.target, None, &self.config, &mut self.rng)?;
            debug!(
                "target {}: initial population of {}",
                self.target,
                population.len()
            );
            self.population = Some(population);
            self.state = SearchState::Scoring;
            return Ok(self.state);
        }

        let Some(population) = self.population.as_mut() else {
            self.state = SearchState::Init;
            return Ok(self.state);
        };

        self.state = match self.state {
            SearchState::Init | SearchState::Done => self.state,
            SearchState::Scoring => {
                population.calculate_fitness_scores();
                let generation_stats = generation_stats(population, self.generations_scored);
                debug!(
                    "Gen {:>5}: best={:.4} mean={:.4} closest={}",
                    generation_stats.generation,
                    generation_stats.best_fitness,
                    generation_stats.mean_fitness,
                    generation_stats.closest_value
                );
                self.stats.push(generation_stats);
                self.generations_scored += 1;
                SearchState::Check
            }
            SearchState::Check => {
                if let Some(found) = population.return_solution_if_found() {
                    info!(
                        "target {} reached by {} in generation {}",
                        self.target,
                        found.expression(),
                        self.generations_scored - 1
                    );
                    self.solution = Some(found.clone());
                    SearchState::Done
                } else if self
                    .config
                    .max_generations
                    .is_some_and(|cap| self.generations_scored >= cap)
                {
                    let closest = population.closest().map_or(0.0, Candidate::number);
                    warn!(
                        "target {}: no solution after {} generations",
                        self.target, self.generations_scored
                    );
                    return Err(GaError::GenerationLimit {
                        generations: self.generations_scored,
                        closest,
                    });
                } else {
                    SearchState::Reproduce
                }
            }
            SearchState::Reproduce => {
                if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                    warn!(
                        "target {}: cancelled after {} generations",
                        self.target, self.generations_scored
                    );
                    return Err(GaError::Cancelled {
                        generations: self.generations_scored,
                    });
                }
                population.reproduce(&mut self.rng)?;
                SearchState::Scoring
            }
        };

        Ok(self.state)
    }

    /// Run until a solution is found, the cap is reached, or the search is
    /// cancelled.
    ///
    /// # Errors
    ///
    /// See [`SearchDriver::step`].
    pub fn run(mut self) -> Result<Solution> {
        while self.step()? != SearchState::Done {}
        let generations = self.generations_scored;
        self.into_solution()
            .ok_or(GaError::Cancelled { generations })
    }

    /// Consume a finished driver. Returns `None` unless the state is
    /// [`SearchState::Done`].
    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        let candidate = self.solution?;
        let expression = candidate.expression();
        Some(Solution {
            target: self.target,
            value: expression.evaluate(),
            expression,
            candidate,
            generation: self.generations_scored.saturating_sub(1),
            stats: SearchStats {
                generations: self.stats,
                elapsed_seconds: self.started.elapsed().as_secs_f64(),
            },
        })
    }
}

/// Fitness summary of a freshly scored generation.
fn generation_stats(population: &Population, generation: usize) -> GenerationStats {
    let stats = SelectionStats::from_fitness(&population.fitness_values());
    GenerationStats {
        generation,
        best_fitness: stats.best_fitness,
        mean_fitness: stats.mean_fitness,
        fitness_std: stats.fitness_std,
        closest_value: population.closest().map_or(0.0, Candidate::number),
    }
}

/// Search for an expression that evaluates to `target` using the default
/// configuration and an entropy-seeded RNG. Blocks until found.
///
/// # Errors
///
/// Returns [`GaError::EmptyPopulation`] for target 0, since the default
/// population size is `5 * |target|`.
pub fn find_solution_for(target: i64) -> Result<Solution> {
    find_solution_with(target, &SearchConfig::default())
}

/// Search with an explicit configuration. Seeds from `config.seed` when set.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the population size is
/// zero, or the generation cap is reached.
pub fn find_solution_with(target: i64, config: &SearchConfig) -> Result<Solution> {
    let rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    SearchDriver::new(target, config, rng)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> SearchConfig {
        SearchConfig {
            seed: Some(seed),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_state_sequence() {
        let rng = SmallRng::seed_from_u64(1);
        let mut driver = SearchDriver::new(10, &seeded(1), rng).unwrap();
        assert_eq!(driver.state(), SearchState::Init);
        assert_eq!(driver.step().unwrap(), SearchState::Scoring);
        assert_eq!(driver.population().unwrap().len(), 50);
        assert_eq!(driver.step().unwrap(), SearchState::Check);
        assert_eq!(driver.generations_scored(), 1);
        let next = driver.step().unwrap();
        assert!(next == SearchState::Done || next == SearchState::Reproduce);
    }

    #[test]
    fn test_find_solution_for_ten() {
        let solution = find_solution_with(10, &seeded(42)).unwrap();
        assert!((solution.value - 10.0).abs() < 1e-9);
        assert!((solution.candidate.number() - 10.0).abs() < 1e-9);
        assert_eq!(solution.target, 10);
        assert_eq!(solution.stats.generations.len(), solution.generation + 1);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = find_solution_with(7, &seeded(99)).unwrap();
        let b = find_solution_with(7, &seeded(99)).unwrap();
        assert_eq!(a.candidate, b.candidate);
        assert_eq!(a.generation, b.generation);
    }

    #[test]
    fn test_zero_target_fails_fast() {
        let rng = SmallRng::seed_from_u64(1);
        let err = SearchDriver::new(0, &SearchConfig::default(), rng).unwrap_err();
        assert!(matches!(err, GaError::EmptyPopulation { target: 0 }));
    }

    #[test]
    fn test_generation_cap() {
        // Five digits and four operators cannot exceed 9^5
        let config = SearchConfig {
            population_size: Some(10),
            max_generations: Some(3),
            ..seeded(5)
        };
        let err = find_solution_with(1_000_000_000, &config).unwrap_err();
        assert!(matches!(err, GaError::GenerationLimit { generations: 3, .. }));
    }

    #[test]
    fn test_cancel() {
        let token = CancelToken::new();
        token.cancel();
        let config = SearchConfig {
            population_size: Some(10),
            ..seeded(5)
        };
        let rng = SmallRng::seed_from_u64(5);
        let err = SearchDriver::new(1_000_000_000, &config, rng)
            .unwrap()
            .with_cancel(token)
            .run()
            .unwrap_err();
        assert!(matches!(err, GaError::Cancelled { generations: 1 }));
    }

    #[test]
    fn test_cancel_token_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
