//! # Perceptual Fingerprint
//!
//! 64-bit perceptual fingerprints for raster images. Visually similar images
//! get fingerprints with a small Hamming distance; unrelated images differ in
//! about half of their bits.
//!
//! ## Algorithms
//! - **Average hash** - 8x8 grayscale pixels thresholded against their mean
//! - **DCT hash** - the 8x8 lowest frequencies of a 32x32 DCT thresholded
//!   against their mean (DC term left out of the mean)
//!
//! ## Architecture
//! - `core` - Normalization, DCT engine, hash algorithms and the `Hasher` facade
//! - `error` - Error types
//!
//! ```rust,ignore
//! use perceptual_fingerprint::{average_hash, dct_hash, hamming_distance};
//!
//! let a = dct_hash(&image_a)?;
//! let b = dct_hash(&image_b)?;
//! let distance = hamming_distance(a.bits(), b.bits());
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::hasher::{average_hash, dct_hash};
pub use crate::core::{hamming_distance, Fingerprint, HashAlgorithmKind, Hasher, HasherConfig};
pub use error::{FingerprintError, HashError, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG` wins
/// over `verbose` when set. Calling it again is a no-op.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
