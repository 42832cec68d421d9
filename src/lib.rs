// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Exprga: a genetic algorithm that searches for arithmetic expressions.
//!
//! Candidates are fixed-length bit strings. Each 4-bit group decodes to a
//! digit, an operator, or nothing; the decoded symbols are filtered into a
//! `digit (operator digit)*` expression and folded left to right. The search
//! evolves a population until one candidate evaluates exactly to the target.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           Search Driver             │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │     Population / Fitness            │
//! ├─────────────────────────────────────┤
//! │  Encoder → Decoder → Evaluator      │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod ga;

pub use config::SearchConfig;
pub use error::{GaError, Result};
pub use ga::{find_solution_for, find_solution_with, BitString, Candidate, Expression, Solution};
