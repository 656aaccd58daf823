//! # Hasher Module
//!
//! Computes 64-bit perceptual fingerprints for images.
//!
//! ## Supported Algorithms
//! - **aHash (Average Hash)** - Fastest, good for exact duplicates
//! - **pHash (DCT Hash)** - Most robust, handles recompression and rescaling
//!
//! ## How It Works
//! 1. Convert to grayscale and resize to 8x8 (aHash) or 32x32 (pHash)
//! 2. pHash only: take the 2D DCT and keep the 8x8 lowest frequencies
//! 3. Threshold each value against the mean, first value = most significant bit
//! 4. Compare fingerprints using Hamming distance
//!
//! ## Example
//! ```rust,ignore
//! use perceptual_fingerprint::core::hasher::{HasherConfig, HashAlgorithmKind};
//!
//! let hasher = HasherConfig::new()
//!     .algorithm(HashAlgorithmKind::Dct)
//!     .build()?;
//!
//! let hash = hasher.hash_file(&path)?;
//! println!("{}", hash); // 0x...
//! ```

mod algorithms;
pub mod dct;
pub mod fast_decode;
pub mod normalize;
pub mod raster;
mod traits;

pub use algorithms::{
    average_hash, average_hash_raster, dct_hash, dct_hash_raster, dct_hash_with,
    AVERAGE_HASH_SIZE, DCT_HASH_SIZE, LOW_FREQUENCY_SIZE,
};
pub use dct::{DctTable, ForwardDct, PassOrder, PlannedDct};
pub use fast_decode::ImageDecoder;
pub use normalize::{normalize, Normalizer};
pub use raster::{CoefficientMatrix, IntensityRaster};
pub use traits::{hamming_distance, Fingerprint, HashAlgorithmKind, FINGERPRINT_BITS};

use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

impl HashAlgorithmKind {
    /// Run this algorithm on a decoded image with the default transform.
    pub fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        match self {
            HashAlgorithmKind::Average => average_hash(image),
            HashAlgorithmKind::Dct => dct_hash(image),
        }
    }
}

/// DCT backend used by the DCT hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DctTransformKind {
    /// Direct evaluation against the shared cosine table
    #[default]
    Table,
    /// rustdct planned fast transform
    Planned,
}

#[derive(Debug)]
enum DctEngine {
    Table(Arc<DctTable>),
    Planned(PlannedDct),
}

impl DctEngine {
    fn new(kind: DctTransformKind) -> Result<Self, HashError> {
        let size = HashAlgorithmKind::Dct.raster_size() as usize;
        Ok(match kind {
            DctTransformKind::Table => DctEngine::Table(DctTable::shared(size)?),
            DctTransformKind::Planned => DctEngine::Planned(PlannedDct::new(size)?),
        })
    }

    fn as_forward(&self) -> &dyn ForwardDct {
        match self {
            DctEngine::Table(table) => &**table,
            DctEngine::Planned(planned) => planned,
        }
    }
}

/// Configuration builder for hashers
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Algorithm to use
    algorithm: HashAlgorithmKind,
    /// Transform backend for the DCT hash
    transform: DctTransformKind,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            algorithm: HashAlgorithmKind::Dct,
            transform: DctTransformKind::Table,
        }
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the DCT backend (ignored by the average hash)
    pub fn transform(mut self, transform: DctTransformKind) -> Self {
        self.transform = transform;
        self
    }

    /// Build the hasher
    pub fn build(self) -> Result<Hasher, HashError> {
        Ok(Hasher {
            algorithm: self.algorithm,
            engine: DctEngine::new(self.transform)?,
        })
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprint facade over both algorithms.
///
/// Holds no per-call state; one instance can serve any number of threads.
#[derive(Debug)]
pub struct Hasher {
    algorithm: HashAlgorithmKind,
    engine: DctEngine,
}

impl Hasher {
    /// Get the algorithm kind
    pub fn kind(&self) -> HashAlgorithmKind {
        self.algorithm
    }

    /// Compute a fingerprint from an already-decoded image
    pub fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        trace!(
            algorithm = %self.algorithm,
            width = image.width(),
            height = image.height(),
            "hashing image"
        );

        let fingerprint = match self.algorithm {
            HashAlgorithmKind::Average => average_hash(image)?,
            HashAlgorithmKind::Dct => dct_hash_with(self.engine.as_forward(), image)?,
        };

        debug!(algorithm = %self.algorithm, %fingerprint, "computed fingerprint");
        Ok(fingerprint)
    }

    /// Decode a file and fingerprint it.
    pub fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let image = ImageDecoder::decode_file(path)?;
        debug!(path = %path.display(), "decoded file");
        self.hash_image(&image)
    }

    /// Decode an in-memory encoded image and fingerprint it.
    pub fn hash_bytes(&self, bytes: &[u8]) -> Result<Fingerprint, HashError> {
        let image = ImageDecoder::decode_bytes(bytes)?;
        self.hash_image(&image)
    }

    /// Read and decode a stream, then fingerprint it.
    pub fn hash_reader<R: Read>(&self, reader: R) -> Result<Fingerprint, HashError> {
        let image = ImageDecoder::decode_reader(reader)?;
        self.hash_image(&image)
    }
}
