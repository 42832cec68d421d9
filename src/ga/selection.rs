//! Selection operators for the genetic algorithm.
//!
//! Parents are drawn by roulette wheel: each member's chance is its share of
//! the total fitness. Weights must already be non-negative.

// Selection uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use rand::Rng;

/// Select an index by roulette wheel.
///
/// Builds cumulative shares in member order, draws once from `[0, 1)`, and
/// returns the first index whose cumulative share meets or exceeds the draw.
/// When the total weight is zero or not finite, falls back to a uniform
/// pick. Returns `None` only for an empty slice.
#[must_use]
pub fn roulette_wheel_select<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Some(rng.gen_range(0..weights.len()));
    }

    let draw: f64 = rng.r#gen();
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight / total;
        if draw <= cumulative {
            return Some(i);
        }
    }

    // Rounding can leave the final cumulative share just below the draw
    Some(weights.len() - 1)
}

/// Summary statistics of a generation's fitness.
#[derive(Debug, Clone, Copy)]
pub struct SelectionStats {
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Worst fitness in the population.
    pub worst_fitness: f64,
    /// Standard deviation of fitness.
    pub fitness_std: f64,
}

impl SelectionStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[f64]) -> Self {
        if fitness.is_empty() {
            return Self {
                mean_fitness: 0.0,
                best_fitness: 0.0,
                worst_fitness: 0.0,
                fitness_std: 0.0,
            };
        }

        let sum: f64 = fitness.iter().sum();
        let mean = sum / fitness.len() as f64;

        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);

        let variance: f64 = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>()
            / fitness.len() as f64;

        Self {
            mean_fitness: mean,
            best_fitness: best,
            worst_fitness: worst,
            fitness_std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_roulette_prefers_heavier() {
        let mut rng = SmallRng::seed_from_u64(42);
        let weights = vec![0.1, 0.5, 3.0, 0.2, 0.8];

        let mut counts = [0usize; 5];
        for _ in 0..2000 {
            let idx = roulette_wheel_select(&weights, &mut rng).unwrap();
            counts[idx] += 1;
        }

        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| *c).unwrap().0;
        assert_eq!(max_idx, 2);
    }

    #[test]
    fn test_roulette_never_picks_zero_weight() {
        let mut rng = SmallRng::seed_from_u64(5);
        let weights = vec![0.0, 1.0, 0.0];
        for _ in 0..500 {
            assert_eq!(roulette_wheel_select(&weights, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_roulette_degenerate_falls_back_to_uniform() {
        let mut rng = SmallRng::seed_from_u64(11);
        let weights = vec![0.0; 4];
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[roulette_wheel_select(&weights, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));

        let weights = vec![1.0, f64::INFINITY];
        assert!(roulette_wheel_select(&weights, &mut rng).unwrap() < 2);
    }

    #[test]
    fn test_roulette_empty() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(roulette_wheel_select(&[], &mut rng), None);
    }

    #[test]
    fn test_selection_stats() {
        let fitness = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SelectionStats::from_fitness(&fitness);

        assert!((stats.mean_fitness - 3.0).abs() < 0.001);
        assert!((stats.best_fitness - 5.0).abs() < 0.001);
        assert!((stats.worst_fitness - 1.0).abs() < 0.001);
    }
}
