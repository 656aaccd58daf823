//! DCT Hash (pHash) implementation.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it more
//! robust to:
//! - Scaling
//! - Brightness/contrast changes
//! - Compression artifacts
//!
//! The image is normalized to 32x32, transformed, and the 8x8 lowest
//! frequencies are thresholded against their mean. The mean leaves out the
//! DC coefficient but still divides by 64; hashes are only comparable with
//! other hashes computed under the same convention.
//!
//! Coefficients that are rounding residue relative to the DC term are
//! flushed to zero first, so flat regions hash the same on every backend.

use super::super::dct::{DctTable, ForwardDct};
use super::super::normalize::normalize;
use super::super::raster::IntensityRaster;
use super::super::traits::{Fingerprint, HashAlgorithmKind};
use super::threshold_bits;
use crate::error::HashError;
use image::DynamicImage;

/// Side length of the raster fed to the DCT
pub const DCT_HASH_SIZE: u32 = 32;

/// Side length of the low-frequency block that becomes the hash
pub const LOW_FREQUENCY_SIZE: usize = 8;

/// Coefficients at or below `|DC| * RESIDUE_TOLERANCE` are treated as zero
const RESIDUE_TOLERANCE: f64 = 1e-9;

/// DCT hash of a decoded image, using the shared 32x32 cosine table.
pub fn dct_hash(image: &DynamicImage) -> Result<Fingerprint, HashError> {
    let table = DctTable::shared(HashAlgorithmKind::Dct.raster_size() as usize)?;
    dct_hash_with(&*table, image)
}

/// DCT hash of a decoded image using a caller-supplied 32x32 transform.
pub fn dct_hash_with<E>(engine: &E, image: &DynamicImage) -> Result<Fingerprint, HashError>
where
    E: ForwardDct + ?Sized,
{
    let size = HashAlgorithmKind::Dct.raster_size();
    let raster = normalize(image, size, size)?;
    dct_hash_raster(engine, &raster)
}

/// DCT hash of an already-normalized 32x32 raster.
pub fn dct_hash_raster<E>(engine: &E, raster: &IntensityRaster) -> Result<Fingerprint, HashError>
where
    E: ForwardDct + ?Sized,
{
    raster.ensure_square(DCT_HASH_SIZE as usize)?;

    let mut block = engine.low_frequencies(raster, LOW_FREQUENCY_SIZE)?;
    flush_residue(&mut block);

    let mean = (block.iter().sum::<f64>() - block[0]) / block.len() as f64;

    Ok(Fingerprint::new(threshold_bits(&block, mean)))
}

fn flush_residue(block: &mut [f64]) {
    let floor = block[0].abs() * RESIDUE_TOLERANCE;
    for coefficient in &mut block[1..] {
        if coefficient.abs() <= floor {
            *coefficient = 0.0;
        }
    }
}
