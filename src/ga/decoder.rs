//! Grammar-filtering decoder from bit strings to expressions.
//!
//! The decoder makes a single pass over the 4-bit groups and keeps only the
//! symbols that extend a `digit (operator digit)*` sequence. Everything else
//! is dropped silently: undefined codes, a digit following a digit, an
//! operator following an operator, a leading operator, a trailing operator.

use crate::error::GaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::encoding::BitString;
use super::evaluate::evaluate;
use super::symbol::{decode_bit_group, Operator, Symbol};

/// An ordered sequence of decoded symbols.
///
/// Expressions produced by [`bit_string_to_expression`] always follow the
/// grammar `digit (operator digit)*`. Expressions parsed from text are not
/// checked against the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression(Vec<Symbol>);

impl Expression {
    /// Wrap a symbol sequence.
    #[must_use]
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// Borrow the symbols.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the expression has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Left-to-right value of the expression.
    #[must_use]
    pub fn evaluate(&self) -> f64 {
        evaluate(&self.0)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for Expression {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(position, found)| {
                Symbol::from_char(found).ok_or(GaError::InvalidSymbol { position, found })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Scanner state while filtering decoded symbols.
#[derive(Debug, Clone, Copy)]
enum ParseState {
    /// Waiting for a digit. Holds the operator that will be emitted once the
    /// digit arrives; it is discarded if the input ends first.
    ExpectingDigit(Option<Operator>),
    /// A digit was just accepted; only an operator can follow.
    ExpectingOperator,
}

/// Decode a bit string into a well-formed expression.
///
/// A trailing group shorter than four bits is ignored. A lone trailing digit
/// is kept; a trailing operator is dropped.
#[must_use]
pub fn bit_string_to_expression(bits: &BitString) -> Expression {
    let mut symbols = Vec::with_capacity(bits.len() / 4);
    let mut state = ParseState::ExpectingDigit(None);

    for symbol in bits.groups().filter_map(decode_bit_group) {
        state = match (state, symbol) {
            (ParseState::ExpectingDigit(pending), Symbol::Digit(_)) => {
                if let Some(op) = pending {
                    symbols.push(Symbol::Operator(op));
                }
                symbols.push(symbol);
                ParseState::ExpectingOperator
            }
            (ParseState::ExpectingOperator, Symbol::Operator(op)) => {
                ParseState::ExpectingDigit(Some(op))
            }
            // Two digits or two operators in a row
            (unchanged, _) => unchanged,
        };
    }

    Expression(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str) -> Expression {
        bit_string_to_expression(&s.parse().unwrap())
    }

    fn expr(s: &str) -> Expression {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_digit() {
        assert_eq!(decode("0001"), expr("1"));
    }

    #[test]
    fn test_single_operator() {
        assert!(decode("1101").is_empty());
    }

    #[test]
    fn test_single_undefined() {
        assert!(decode("1111").is_empty());
    }

    #[test]
    fn test_only_operators() {
        assert!(decode("1010101111001101").is_empty());
    }

    #[test]
    fn test_longer_valid_input() {
        assert_eq!(
            decode("011010100101110001001101001010100001"),
            expr("6+5*4/2+1")
        );
    }

    #[test]
    fn test_malformed_input() {
        // 2 2 + ? - 7 2
        assert_eq!(decode("0010001010101110101101110010"), expr("2+7"));
    }

    #[test]
    fn test_trailing_operator_dropped() {
        // 3 * 4 -
        assert_eq!(decode("0011110001001011"), expr("3*4"));
    }

    #[test]
    fn test_trailing_partial_group_ignored() {
        // 9 + 1, then three stray bits
        assert_eq!(decode("100110100001101"), expr("9+1"));
        // 9 + then a partial group that would read as a digit if padded
        assert_eq!(decode("10011010000"), expr("9"));
    }

    #[test]
    fn test_leading_operators_skipped() {
        // + * 5 / 1111 8
        assert_eq!(decode("101011000101110111111000"), expr("5/8"));
    }

    #[test]
    fn test_display() {
        assert_eq!(expr("6+5*4").to_string(), "6 + 5 * 4");
        assert_eq!(Expression::default().to_string(), "");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "2+x".parse::<Expression>().unwrap_err();
        assert!(matches!(
            err,
            GaError::InvalidSymbol {
                position: 2,
                found: 'x'
            }
        ));
        assert_eq!(expr(" 2 + 7 "), expr("2+7"));
    }
}
