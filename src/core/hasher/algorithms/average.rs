//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Resizing the image to 8x8
//! 2. Converting to grayscale
//! 3. Computing the average brightness
//! 4. For each pixel (row-major): if brighter than average, set bit to 1, else 0
//!
//! This is the fastest hash but less robust to edits.

use super::super::normalize::normalize;
use super::super::raster::IntensityRaster;
use super::super::traits::{Fingerprint, HashAlgorithmKind};
use super::threshold_bits;
use crate::error::HashError;
use image::DynamicImage;

/// Side length of the raster the average hash thresholds
pub const AVERAGE_HASH_SIZE: u32 = 8;

/// Average hash of a decoded image.
pub fn average_hash(image: &DynamicImage) -> Result<Fingerprint, HashError> {
    let size = HashAlgorithmKind::Average.raster_size();
    let raster = normalize(image, size, size)?;
    average_hash_raster(&raster)
}

/// Average hash of an already-normalized 8x8 raster.
///
/// A raster whose samples are all equal hashes to `0`.
pub fn average_hash_raster(raster: &IntensityRaster) -> Result<Fingerprint, HashError> {
    raster.ensure_square(AVERAGE_HASH_SIZE as usize)?;

    let bits = threshold_bits(raster.samples(), raster.mean());
    Ok(Fingerprint::new(bits))
}
