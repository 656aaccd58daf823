//! Fingerprint value type and algorithm selector.

use super::algorithms::{AVERAGE_HASH_SIZE, DCT_HASH_SIZE};
use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of bits in every fingerprint
pub const FINGERPRINT_BITS: u32 = 64;

/// Count of differing bits between two fingerprints, in `0..=64`.
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// A 64-bit perceptual fingerprint.
///
/// Bit 63 holds the first cell visited (row 0, column 0 of the 8x8 block),
/// bit 0 the last (row 7, column 7). Cells are visited row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Hamming distance to another fingerprint
    ///
    /// Lower distance = more similar images.
    pub fn distance(&self, other: &Self) -> u32 {
        hamming_distance(self.0, other.0)
    }

    /// Similarity as a percentage (0-100)
    pub fn similarity(&self, other: &Self) -> f64 {
        (1.0 - self.distance(other) as f64 / FINGERPRINT_BITS as f64) * 100.0
    }

    /// Canonical rendering, e.g. `0x0123456789ABCDEF`
    pub fn to_hex(&self) -> String {
        format!("0x{:016X}", self.0)
    }

    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl From<u64> for Fingerprint {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Fingerprint> for u64 {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > 16 {
            return Err(FingerprintError::Config(format!(
                "'{}' is not a 64-bit hexadecimal fingerprint",
                s
            )));
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| FingerprintError::Config(format!("'{}' is not a fingerprint: {}", s, e)))
    }
}

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithmKind {
    /// Average Hash (aHash) - 8x8 pixels against their mean
    Average,
    /// DCT Hash (pHash) - low 8x8 frequencies of a 32x32 DCT against their mean
    Dct,
}

impl HashAlgorithmKind {
    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashAlgorithmKind::Average => {
                "Average Hash (aHash) - Fast comparison based on average brightness"
            }
            HashAlgorithmKind::Dct => {
                "DCT Hash (pHash) - Low-frequency structure, robust to recompression and scaling"
            }
        }
    }

    /// Side length of the normalized raster this algorithm consumes
    pub fn raster_size(&self) -> u32 {
        match self {
            HashAlgorithmKind::Average => AVERAGE_HASH_SIZE,
            HashAlgorithmKind::Dct => DCT_HASH_SIZE,
        }
    }
}

impl fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithmKind::Average => write!(f, "aHash"),
            HashAlgorithmKind::Dct => write!(f, "pHash"),
        }
    }
}

impl FromStr for HashAlgorithmKind {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "average" | "ahash" => Ok(HashAlgorithmKind::Average),
            "dct" | "phash" => Ok(HashAlgorithmKind::Dct),
            other => Err(FingerprintError::Config(format!(
                "unknown hash algorithm '{}' (expected 'average' or 'dct')",
                other
            ))),
        }
    }
}
