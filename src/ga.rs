//! Genetic algorithm for evolving arithmetic expressions.
//!
//! This module provides the complete evolutionary framework: bit-string
//! encoding, grammar-filtering decoding, evaluation, fitness scoring,
//! roulette-wheel selection, one-point crossover, and the search loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      Search Driver (state machine)  │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │     Population + Fitness            │
//! ├─────────────────────────────────────┤
//! │  BitString → Expression → value     │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use exprga::ga::find_solution_for;
//!
//! let solution = find_solution_for(10)?;
//! println!("{} = {}", solution.expression, solution.value);
//! # Ok::<(), exprga::GaError>(())
//! ```

mod candidate;
mod crossover;
mod decoder;
mod encoding;
mod evaluate;
mod mutation;
mod population;
mod search;
mod selection;
mod symbol;

pub use candidate::Candidate;
pub use crossover::{crossover, CrossoverConfig};
pub use decoder::{bit_string_to_expression, Expression};
pub use encoding::{generate_bit_string, BitString, BITS_PER_GROUP, DEFAULT_BIT_STRING_LENGTH};
pub use evaluate::evaluate;
pub use mutation::{mutate_bit_string, MutationConfig};
pub use population::{Population, EXACT_MATCH_FITNESS, NEGATIVE_FITNESS_FLOOR};
pub use search::{
    find_solution_for, find_solution_with, CancelToken, GenerationStats, SearchDriver, SearchState,
    SearchStats, Solution,
};
pub use selection::{roulette_wheel_select, SelectionStats};
pub use symbol::{decode_bit_group, is_encoded_digit, is_encoded_operator, Operator, Symbol};
