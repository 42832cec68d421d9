//! Output formatting utilities for CLI.

// Aggregates use intentional casts for averages
#![allow(clippy::cast_precision_loss)]

use exprga::ga::{decode_bit_group, BitString};
use exprga::{GaError, Solution};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable search result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSolution {
    /// Target value.
    pub(super) target: i64,
    /// Seed the search ran with.
    pub(super) seed: u64,
    /// Winning bit string.
    pub(super) bit_string: String,
    /// Decoded expression.
    pub(super) expression: String,
    /// Decoded value.
    pub(super) value: f64,
    /// Generation the solution appeared in.
    pub(super) generation: usize,
    /// Wall-clock seconds.
    pub(super) elapsed_seconds: f64,
}

impl JsonSolution {
    /// Create from a Solution.
    pub(super) fn from_solution(solution: &Solution, seed: u64) -> Self {
        Self {
            target: solution.target,
            seed,
            bit_string: solution.candidate.bit_string.to_string(),
            expression: solution.expression.to_string(),
            value: solution.value,
            generation: solution.generation,
            elapsed_seconds: solution.stats.elapsed_seconds,
        }
    }
}

/// Format a solution as human-readable text.
pub(super) fn format_solution_text(solution: &Solution, seed: u64) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Solution for {} (seed: {seed})", solution.target);
    let _ = writeln!(output, "  Expression: {} = {}", solution.expression, solution.value);
    let _ = writeln!(output, "  Bit string: {}", solution.candidate.bit_string);
    let _ = writeln!(output, "  Generation: {}", solution.generation);
    let _ = writeln!(output, "  Elapsed:    {:.3}s", solution.stats.elapsed_seconds);
    output
}

/// One decoded 4-bit group, for the `decode` command.
#[derive(Debug, Serialize)]
pub(super) struct JsonGroup {
    /// The group's bits.
    pub(super) bits: String,
    /// Decoded symbol, if any.
    pub(super) symbol: Option<String>,
}

/// Decode every group of a bit string for display.
pub(super) fn describe_groups(bits: &BitString) -> Vec<JsonGroup> {
    bits.groups()
        .map(|group| JsonGroup {
            bits: BitString::new(group.to_vec()).to_string(),
            symbol: decode_bit_group(group).as_ref().map(ToString::to_string),
        })
        .collect()
}

/// Aggregated results for one target in a batch.
#[derive(Debug, Default, Clone, Serialize)]
pub(super) struct BatchStats {
    /// Target value.
    pub(super) target: i64,
    /// Searches started.
    pub(super) runs: u64,
    /// Searches that found a solution.
    pub(super) solved: u64,
    /// Searches that hit the generation cap.
    pub(super) exhausted: u64,
    /// Searches that failed for any other reason.
    pub(super) failed: u64,
    /// Sum of solution generations.
    total_generations: u64,
    /// Largest solution generation.
    pub(super) max_generation: u64,
    /// Total wall-clock seconds of solved runs.
    total_seconds: f64,
}

impl BatchStats {
    /// Create empty stats for a target.
    pub(super) fn new(target: i64) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Add one search outcome.
    pub(super) fn add_result(&mut self, result: &Result<Solution, GaError>) {
        self.runs += 1;
        match result {
            Ok(solution) => {
                let generation = solution.generation as u64;
                self.solved += 1;
                self.total_generations += generation;
                self.max_generation = self.max_generation.max(generation);
                self.total_seconds += solution.stats.elapsed_seconds;
            }
            Err(GaError::GenerationLimit { .. }) => self.exhausted += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Merge another stats block for the same target.
    pub(super) fn merge(&mut self, other: &Self) {
        self.runs += other.runs;
        self.solved += other.solved;
        self.exhausted += other.exhausted;
        self.failed += other.failed;
        self.total_generations += other.total_generations;
        self.max_generation = self.max_generation.max(other.max_generation);
        self.total_seconds += other.total_seconds;
    }

    /// Fraction of runs that found a solution.
    pub(super) fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.solved as f64 / self.runs as f64
        }
    }

    /// Mean generation of solved runs.
    pub(super) fn mean_generation(&self) -> f64 {
        if self.solved == 0 {
            0.0
        } else {
            self.total_generations as f64 / self.solved as f64
        }
    }

    /// Mean seconds of solved runs.
    pub(super) fn mean_seconds(&self) -> f64 {
        if self.solved == 0 {
            0.0
        } else {
            self.total_seconds / self.solved as f64
        }
    }
}

/// JSON-serializable batch row.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchRow {
    /// Target value.
    pub(super) target: i64,
    /// Searches started.
    pub(super) runs: u64,
    /// Searches that found a solution.
    pub(super) solved: u64,
    /// Searches that hit the generation cap.
    pub(super) exhausted: u64,
    /// Searches that failed otherwise.
    pub(super) failed: u64,
    /// Fraction solved.
    pub(super) success_rate: f64,
    /// Mean generation of solved runs.
    pub(super) mean_generation: f64,
    /// Largest generation of solved runs.
    pub(super) max_generation: u64,
    /// Mean seconds of solved runs.
    pub(super) mean_seconds: f64,
}

impl JsonBatchRow {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        Self {
            target: stats.target,
            runs: stats.runs,
            solved: stats.solved,
            exhausted: stats.exhausted,
            failed: stats.failed,
            success_rate: stats.success_rate(),
            mean_generation: stats.mean_generation(),
            max_generation: stats.max_generation,
            mean_seconds: stats.mean_seconds(),
        }
    }
}

/// Format batch results as human-readable text.
pub(super) fn format_batch_text(stats: &[BatchStats]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:>8}  {:>6}  {:>7}  {:>8}  {:>9}  {:>8}",
        "target", "runs", "solved", "mean gen", "max gen", "mean s"
    );
    for row in stats {
        let _ = writeln!(
            output,
            "{:>8}  {:>6}  {:>6.1}%  {:>8.1}  {:>9}  {:>8.3}",
            row.target,
            row.runs,
            row.success_rate() * 100.0,
            row.mean_generation(),
            row.max_generation,
            row.mean_seconds()
        );
    }
    output
}

/// Format batch results as CSV.
pub(super) fn format_batch_csv(stats: &[BatchStats]) -> String {
    let mut output = String::from(
        "target,runs,solved,exhausted,failed,success_rate,mean_generation,max_generation,mean_seconds\n",
    );
    for row in stats {
        let _ = writeln!(
            output,
            "{},{},{},{},{},{:.4},{:.2},{},{:.4}",
            row.target,
            row.runs,
            row.solved,
            row.exhausted,
            row.failed,
            row.success_rate(),
            row.mean_generation(),
            row.max_generation,
            row.mean_seconds()
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_stats_aggregate() {
        let mut stats = BatchStats::new(10);
        stats.add_result(&Err(GaError::GenerationLimit {
            generations: 5,
            closest: 9.0,
        }));
        stats.add_result(&Err(GaError::Cancelled { generations: 1 }));
        assert_eq!(stats.runs, 2);
        assert_eq!(stats.exhausted, 1);
        assert_eq!(stats.failed, 1);
        assert!(stats.success_rate().abs() < 1e-12);

        let mut other = BatchStats::new(10);
        other.add_result(&Err(GaError::Cancelled { generations: 1 }));
        stats.merge(&other);
        assert_eq!(stats.runs, 3);

        let csv = format_batch_csv(&[stats]);
        assert!(csv.starts_with("target,"));
        assert!(csv.contains("\n10,3,0,1,2,"));
    }

    #[test]
    fn test_describe_groups() {
        let bits: BitString = "0010111010".parse().unwrap();
        let groups = describe_groups(&bits);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].symbol.as_deref(), Some("2"));
        assert_eq!(groups[1].symbol, None);
        assert_eq!(groups[2].bits, "10");
        assert_eq!(groups[2].symbol, None);
    }
}
