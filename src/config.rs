//! Search configuration and TOML config files.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! bit_string_length = 36
//! max_generations = 5000
//!
//! [crossover]
//! crossover_rate = 0.7
//!
//! [mutation]
//! mutation_rate = 0.01
//! ```

use crate::error::{GaError, Result};
use crate::ga::{CrossoverConfig, MutationConfig, DEFAULT_BIT_STRING_LENGTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default cap on population size (five times a target of 200 000).
pub const DEFAULT_MAX_POPULATION_SIZE: usize = 1_000_000;

/// Configuration for a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Bits per candidate.
    pub bit_string_length: usize,
    /// Fixed population size. When unset the size is
    /// `population_multiplier * |target|`.
    pub population_size: Option<usize>,
    /// Multiplier used when `population_size` is unset.
    pub population_multiplier: usize,
    /// Largest population a search may allocate.
    pub max_population_size: usize,
    /// Maximum generations to score before giving up. Unset runs until a
    /// solution is found.
    pub max_generations: Option<usize>,
    /// RNG seed. Unset seeds from system entropy.
    pub seed: Option<u64>,
    /// Crossover configuration.
    pub crossover: CrossoverConfig,
    /// Mutation configuration.
    pub mutation: MutationConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bit_string_length: DEFAULT_BIT_STRING_LENGTH,
            population_size: None,
            population_multiplier: 5,
            max_population_size: DEFAULT_MAX_POPULATION_SIZE,
            max_generations: None,
            seed: None,
            crossover: CrossoverConfig::default(),
            mutation: MutationConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.bit_string_length == 0 {
            return Err(invalid("bit_string_length must be at least 1"));
        }
        if self.population_size == Some(0) {
            return Err(invalid("population_size must be at least 1"));
        }
        if self.population_multiplier == 0 {
            return Err(invalid("population_multiplier must be at least 1"));
        }
        if self.max_population_size == 0 {
            return Err(invalid("max_population_size must be at least 1"));
        }
        if self.max_generations == Some(0) {
            return Err(invalid("max_generations must be at least 1"));
        }
        let rate = self.crossover.crossover_rate;
        if rate.is_nan() || rate <= 0.0 || rate > 1.0 {
            return Err(invalid(format!("crossover_rate must be in (0, 1], got {rate}")));
        }
        if self.crossover.max_attempts_per_slot == 0 {
            return Err(invalid("max_attempts_per_slot must be at least 1"));
        }
        let rate = self.mutation.mutation_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(invalid(format!("mutation_rate must be in [0, 1], got {rate}")));
        }
        Ok(())
    }

    /// Population size for a target: the explicit size if set, otherwise
    /// `population_multiplier * |target|`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::EmptyPopulation`] when the size is zero (target 0
    /// with no explicit size), or [`GaError::InvalidConfig`] when the size
    /// overflows or exceeds `max_population_size`.
    pub fn population_size_for(&self, target: i64) -> Result<usize> {
        let size = match self.population_size {
            Some(size) => size,
            None => usize::try_from(target.unsigned_abs())
                .ok()
                .and_then(|magnitude| magnitude.checked_mul(self.population_multiplier))
                .ok_or_else(|| invalid(format!("population size for target {target} overflows")))?,
        };
        self.check_population_size(size, target)
    }

    /// Reject a resolved size of zero or one above `max_population_size`.
    ///
    /// # Errors
    ///
    /// See [`SearchConfig::population_size_for`].
    pub fn check_population_size(&self, size: usize, target: i64) -> Result<usize> {
        if size == 0 {
            return Err(GaError::EmptyPopulation { target });
        }
        if size > self.max_population_size {
            return Err(invalid(format!(
                "population size {size} for target {target} exceeds max_population_size {}",
                self.max_population_size
            )));
        }
        Ok(size)
    }
}

fn invalid(message: impl Into<String>) -> GaError {
    GaError::InvalidConfig(message.into())
}

/// Load and validate a configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_config(path: &Path) -> Result<SearchConfig> {
    let contents = fs::read_to_string(path)?;
    let config: SearchConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Write a configuration to a TOML file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_config(config: &SearchConfig, path: &Path) -> Result<()> {
    fs::write(path, to_toml(config)?)?;
    Ok(())
}

/// Render a configuration as TOML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_toml(config: &SearchConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
