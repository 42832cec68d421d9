//! Error types for the expression search engine.

use thiserror::Error;

/// Errors raised while configuring or running a search.
#[derive(Debug, Error)]
pub enum GaError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The population size resolved to zero.
    #[error("population size for target {target} is zero; pass an explicit size")]
    EmptyPopulation {
        /// Target the search was started for.
        target: i64,
    },

    /// A textual bit string contained something other than '0' or '1'.
    #[error("invalid bit string: found {found:?} at position {position}")]
    InvalidBitString {
        /// Offset of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// A textual expression contained a character that is not a symbol.
    #[error("invalid expression symbol {found:?} at position {position}")]
    InvalidSymbol {
        /// Offset of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// Filling one slot of the next generation exceeded the attempt budget.
    #[error("reproduction stalled after {attempts} crossover attempts for one slot")]
    ReproductionStalled {
        /// Attempts made before giving up.
        attempts: usize,
    },

    /// The generation cap was reached without an exact match.
    #[error("no solution after {generations} generations (closest value {closest})")]
    GenerationLimit {
        /// Generations scored.
        generations: usize,
        /// Closest decoded value seen in the final generation.
        closest: f64,
    },

    /// The search was cancelled through its token.
    #[error("search cancelled after {generations} generations")]
    Cancelled {
        /// Generations scored before cancellation.
        generations: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GaError::EmptyPopulation { target: 0 };
        assert!(err.to_string().contains("target 0"));

        let err = GaError::InvalidBitString {
            position: 3,
            found: '2',
        };
        assert!(err.to_string().contains("position 3"));
        assert!(err.to_string().contains("'2'"));
    }
}
