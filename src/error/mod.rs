//! # Error Module
//!
//! Error types for fingerprint computation.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Include context** - dimensions, paths, what went wrong
//! - **No partial results** - an operation yields a full fingerprint or an error

use std::path::PathBuf;
use thiserror::Error;

/// Top-level library error
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that occur while normalizing, transforming or hashing an image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid target size {width}x{height}: both dimensions must be non-zero")]
    InvalidTargetSize { width: u32, height: u32 },

    #[error("Raster is {width}x{height}, expected {expected}x{expected}")]
    SizeMismatch {
        expected: usize,
        width: usize,
        height: usize,
    },

    #[error("Raster of {width}x{height} needs {expected} samples, got {actual}")]
    SampleCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Hash computation failed: {0}")]
    ComputationFailed(String),
}

impl HashError {
    /// Whether this error was caused by an unusable raster or size argument
    /// rather than by decoding or I/O.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            HashError::EmptyImage { .. }
                | HashError::InvalidTargetSize { .. }
                | HashError::SizeMismatch { .. }
                | HashError::SampleCountMismatch { .. }
        )
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, FingerprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_reports_dimensions() {
        let error = HashError::EmptyImage {
            width: 0,
            height: 12,
        };
        assert!(error.to_string().contains("0x12"));
        assert!(error.is_invalid_input());
    }

    #[test]
    fn size_mismatch_is_invalid_input() {
        let error = HashError::SizeMismatch {
            expected: 32,
            width: 8,
            height: 8,
        };
        assert!(error.is_invalid_input());
        assert!(error.to_string().contains("expected 32x32"));
    }

    #[test]
    fn sample_count_mismatch_is_invalid_input() {
        let error = HashError::SampleCountMismatch {
            width: 2,
            height: 2,
            expected: 4,
            actual: 3,
        };
        assert!(error.is_invalid_input());
        assert!(error.to_string().contains("needs 4 samples, got 3"));
    }

    #[test]
    fn decode_error_includes_path_and_is_not_invalid_input() {
        let error = HashError::DecodeError {
            path: PathBuf::from("/photos/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
        assert!(!error.is_invalid_input());
    }

    #[test]
    fn hash_error_converts_into_top_level() {
        let error: FingerprintError = HashError::InvalidTargetSize {
            width: 0,
            height: 0,
        }
        .into();
        assert!(matches!(error, FingerprintError::Hash(_)));
        assert!(error.to_string().starts_with("Hashing error"));
    }
}
