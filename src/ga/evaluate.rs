//! Left-to-right evaluation of symbol sequences.

use super::symbol::{Operator, Symbol};

/// Fold a symbol sequence left to right, ignoring operator precedence.
///
/// The first digit seeds the total and each following `operator digit` pair
/// applies `total = total op digit`. Division by zero skips the step. The
/// empty sequence evaluates to zero.
///
/// Sequences that break the grammar are still folded: a leading operator is
/// ignored, and consecutive digits reuse the most recent
/// operator (addition before any operator has been seen).
#[must_use]
pub fn evaluate(symbols: &[Symbol]) -> f64 {
    let mut total = 0.0;
    let mut current = Operator::Add;

    for (i, &symbol) in symbols.iter().enumerate() {
        match symbol {
            Symbol::Digit(d) => total = current.apply(total, d),
            Symbol::Operator(op) if i > 0 => current = op,
            Symbol::Operator(_) => {}
        }
    }

    total
}
