//! Bit-string encoding for candidate expressions.
//!
//! A bit string is a fixed-length sequence of binary digits. It is read in
//! 4-bit groups, each of which decodes to at most one expression symbol.

use crate::error::GaError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of bits per candidate (nine 4-bit groups).
pub const DEFAULT_BIT_STRING_LENGTH: usize = 36;

/// Number of bits that encode a single symbol.
pub const BITS_PER_GROUP: usize = 4;

/// An ordered sequence of binary digits.
///
/// Serializes as its textual `0`/`1` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BitString(Vec<bool>);

impl BitString {
    /// Wrap a vector of bits.
    #[must_use]
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// Number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string holds no bits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying bits.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Consecutive 4-bit groups. The last group is shorter than four bits
    /// when the length is not a multiple of four.
    pub fn groups(&self) -> impl Iterator<Item = &[bool]> {
        self.0.chunks(BITS_PER_GROUP)
    }

    /// Bits from `cut` to the end.
    #[must_use]
    pub fn suffix(&self, cut: usize) -> &[bool] {
        &self.0[cut.min(self.0.len())..]
    }

    /// Bits from the start up to (not including) `cut`.
    #[must_use]
    pub fn prefix(&self, cut: usize) -> &[bool] {
        &self.0[..cut.min(self.0.len())]
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

impl FromStr for BitString {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(GaError::InvalidBitString { position, found }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for BitString {
    type Error = GaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BitString> for String {
    fn from(bits: BitString) -> Self {
        bits.to_string()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Generate a random bit string where each bit is set with probability 0.5.
#[must_use]
pub fn generate_bit_string<R: Rng>(length: usize, rng: &mut R) -> BitString {
    BitString((0..length).map(|_| rng.gen_bool(0.5)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_has_configured_length() {
        let mut rng = SmallRng::seed_from_u64(42);
        for length in [0, 1, 4, 36, 37] {
            let bits = generate_bit_string(length, &mut rng);
            assert_eq!(bits.len(), length);
        }
    }

    #[test]
    fn test_generate_uses_both_values() {
        let mut rng = SmallRng::seed_from_u64(7);
        let bits = generate_bit_string(DEFAULT_BIT_STRING_LENGTH, &mut rng);
        let text = bits.to_string();
        assert!(text.chars().all(|c| c == '0' || c == '1'));
        assert!(text.contains('0'));
        assert!(text.contains('1'));
    }

    #[test]
    fn test_parse_and_display() {
        let bits: BitString = "0110101".parse().unwrap();
        assert_eq!(bits.len(), 7);
        assert_eq!(bits.to_string(), "0110101");
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        let err = "01a1".parse::<BitString>().unwrap_err();
        assert!(matches!(
            err,
            GaError::InvalidBitString {
                position: 2,
                found: 'a'
            }
        ));
    }

    #[test]
    fn test_groups_keep_short_tail() {
        let bits: BitString = "000100101".parse().unwrap();
        let groups: Vec<&[bool]> = bits.groups().collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2], &[true]);
    }

    #[test]
    fn test_prefix_suffix_clamp() {
        let bits: BitString = "1100".parse().unwrap();
        assert_eq!(bits.prefix(1), &[true]);
        assert_eq!(bits.suffix(3), &[false]);
        assert!(bits.suffix(10).is_empty());
        assert_eq!(bits.prefix(10).len(), 4);
    }

    #[test]
    fn test_serde_as_text() {
        let bits: BitString = "1001".parse().unwrap();
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(json, "\"1001\"");
        let back: BitString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bits);
        assert!(serde_json::from_str::<BitString>("\"10x1\"").is_err());
    }
}
