//! # Core Module
//!
//! The fingerprinting engine: normalization, DCT, bit extraction and
//! comparison. Knows nothing about files or output formats beyond the
//! decode adapter in `hasher::fast_decode`.

pub mod hasher;

// Re-export commonly used types
pub use hasher::{
    hamming_distance, Fingerprint, HashAlgorithmKind, Hasher, HasherConfig,
};
