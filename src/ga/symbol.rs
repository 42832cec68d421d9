//! Expression symbols and the 4-bit code tables.
//!
//! Codes `0000`..=`1001` are the digits 0-9, `1010`..=`1101` are the
//! operators `+ - * /`. The remaining two codes (`1110`, `1111`) decode to
//! nothing.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::encoding::BITS_PER_GROUP;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division (skipped when the divisor is zero).
    Div,
}

impl Operator {
    /// The character used to print this operator.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Parse an operator character.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// Apply the operator to a running total. Division by zero leaves the
    /// total unchanged.
    #[must_use]
    pub fn apply(self, total: f64, operand: u8) -> f64 {
        if self == Self::Div && operand == 0 {
            return total;
        }
        let operand = f64::from(operand);
        match self {
            Self::Add => total + operand,
            Self::Sub => total - operand,
            Self::Mul => total * operand,
            Self::Div => total / operand,
        }
    }
}

/// A decoded expression symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// A single decimal digit (0-9).
    Digit(u8),
    /// An arithmetic operator.
    Operator(Operator),
}

impl Symbol {
    /// Whether this symbol is a digit.
    #[must_use]
    pub fn is_digit(self) -> bool {
        matches!(self, Self::Digit(_))
    }

    /// Whether this symbol is an operator.
    #[must_use]
    pub fn is_operator(self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Parse a single symbol character.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_digit(10) {
            Some(d) => u8::try_from(d).ok().map(Self::Digit),
            None => Operator::from_char(c).map(Self::Operator),
        }
    }

    /// Parse a string holding exactly one symbol character.
    ///
    /// `"7"` and `"*"` parse; `"10"`, `"a"` and `""` do not.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// The 4-bit code for this symbol, most significant bit first.
    #[must_use]
    pub fn code(self) -> [bool; BITS_PER_GROUP] {
        let value = match self {
            Self::Digit(d) => d.min(9),
            Self::Operator(Operator::Add) => 0b1010,
            Self::Operator(Operator::Sub) => 0b1011,
            Self::Operator(Operator::Mul) => 0b1100,
            Self::Operator(Operator::Div) => 0b1101,
        };
        [
            value & 0b1000 != 0,
            value & 0b0100 != 0,
            value & 0b0010 != 0,
            value & 0b0001 != 0,
        ]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Operator(op) => write!(f, "{}", op.as_char()),
        }
    }
}

/// Read a group as a 4-bit code. Groups of any other length have no code.
fn group_code(group: &[bool]) -> Option<u8> {
    if group.len() != BITS_PER_GROUP {
        return None;
    }
    Some(group.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
}

/// Whether a group is one of the ten digit codes.
#[must_use]
pub fn is_encoded_digit(group: &[bool]) -> bool {
    matches!(group_code(group), Some(0..=9))
}

/// Whether a group is one of the four operator codes.
#[must_use]
pub fn is_encoded_operator(group: &[bool]) -> bool {
    matches!(group_code(group), Some(10..=13))
}

/// Decode a single 4-bit group.
///
/// Returns `None` for the two unused codes and for groups whose length is
/// not exactly four bits.
#[must_use]
pub fn decode_bit_group(group: &[bool]) -> Option<Symbol> {
    match group_code(group)? {
        d @ 0..=9 => Some(Symbol::Digit(d)),
        10 => Some(Symbol::Operator(Operator::Add)),
        11 => Some(Symbol::Operator(Operator::Sub)),
        12 => Some(Symbol::Operator(Operator::Mul)),
        13 => Some(Symbol::Operator(Operator::Div)),
        _ => None,
    }
}
