//! CLI command implementations for exprga.

pub(crate) mod batch;
pub(crate) mod decode;
pub(crate) mod show_config;
pub(crate) mod solve;

mod output;

use clap::{Args, ValueEnum};
use exprga::config::load_config;
use exprga::{GaError, SearchConfig};
use std::path::PathBuf;
use thiserror::Error;

/// Output format for the `solve` and `decode` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Search options shared by `solve`, `batch` and `config`.
#[derive(Debug, Clone, Args)]
pub(crate) struct SearchArgs {
    /// TOML config file (flags override its values)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Fixed population size (default: 5 * |target|)
    #[arg(short, long)]
    pub(crate) population: Option<usize>,

    /// Give up after this many generations (default: unlimited)
    #[arg(short = 'g', long)]
    pub(crate) max_generations: Option<usize>,

    /// Per-bit mutation probability
    #[arg(long)]
    pub(crate) mutation_rate: Option<f64>,

    /// Probability that a parent pair produces a child
    #[arg(long)]
    pub(crate) crossover_rate: Option<f64>,

    /// Bits per candidate
    #[arg(long)]
    pub(crate) bits: Option<usize>,
}

impl SearchArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    pub(crate) fn build_config(&self) -> Result<SearchConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?,
            None => SearchConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(size) = self.population {
            config.population_size = Some(size);
        }
        if let Some(cap) = self.max_generations {
            config.max_generations = Some(cap);
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation.mutation_rate = rate;
        }
        if let Some(rate) = self.crossover_rate {
            config.crossover.crossover_rate = rate;
        }
        if let Some(bits) = self.bits {
            config.bit_string_length = bits;
        }

        config.validate()?;
        Ok(config)
    }
}

/// CLI error type.
#[derive(Debug, Error)]
#[error("{message}")]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GaError> for CliError {
    fn from(e: GaError) -> Self {
        Self::new(e.to_string())
    }
}
