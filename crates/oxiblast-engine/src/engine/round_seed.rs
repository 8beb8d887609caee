use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic piece set generation.
///
/// A 128-bit seed that initializes the round's random number generator. Two
/// rounds started with the same seed and fed the same placements produce the
/// same piece sets, which makes simulations and bug reports reproducible.
///
/// Serialized (and displayed) as a 32-character lowercase hex string.
///
/// # Example
///
/// ```
/// use oxiblast_engine::RoundSeed;
/// use rand::Rng as _;
///
/// let seed: RoundSeed = rand::rng().random();
/// let parsed: RoundSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundSeed([u8; 16]);

impl RoundSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates the random number generator seeded by this value.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for RoundSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex characters")]
pub struct ParseRoundSeedError {
    input: String,
}

impl FromStr for RoundSeed {
    type Err = ParseRoundSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRoundSeedError {
            input: s.to_owned(),
        };
        // `from_str_radix` accepts a leading sign, which is not valid here.
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for RoundSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoundSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<RoundSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RoundSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RoundSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore as _;

    use super::*;

    const SEQUENTIAL: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed: RoundSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let hex_str = serialized.trim_matches('"');
        assert_eq!(hex_str.len(), 32);
        assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_values() {
        let zeros = RoundSeed::from_bytes([0; 16]);
        assert_eq!(
            serde_json::to_string(&zeros).unwrap(),
            "\"00000000000000000000000000000000\""
        );

        // Big-endian: bytes appear in order as hex pairs.
        let seq = RoundSeed::from_bytes(SEQUENTIAL);
        assert_eq!(seq.to_string(), "0123456789abcdeffedcba9876543210");
        let parsed: RoundSeed = serde_json::from_str("\"0123456789ABCDEFFEDCBA9876543210\"").unwrap();
        assert_eq!(parsed.to_bytes(), SEQUENTIAL);
    }

    #[test]
    fn test_rejects_malformed_input() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
            "+123456789abcdef0123456789abcdef",
        ] {
            let err = input.parse::<RoundSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid hex"), "{input}");
            let json = format!("\"{input}\"");
            assert!(serde_json::from_str::<RoundSeed>(&json).is_err(), "{input}");
        }
    }

    #[test]
    fn test_same_seed_same_rng_stream() {
        let seed = RoundSeed::from_bytes(SEQUENTIAL);
        let mut a = seed.rng();
        let mut b = seed.rng();
        for _ in 0..20 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
