//! Single-channel rasters passed between normalization, the DCT and the
//! bit-extraction step.

use crate::error::HashError;
use image::GrayImage;

/// Grayscale intensity raster (0-255, stored as `f64`), row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityRaster {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

impl IntensityRaster {
    /// Build a raster from row-major samples.
    ///
    /// Fails if either dimension is zero or the sample count does not match.
    pub fn from_samples(width: usize, height: usize, samples: Vec<f64>) -> Result<Self, HashError> {
        if width == 0 || height == 0 {
            return Err(HashError::EmptyImage {
                width: width as u32,
                height: height as u32,
            });
        }
        if samples.len() != width * height {
            return Err(HashError::SampleCountMismatch {
                width,
                height,
                expected: width * height,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.samples[y * self.width + x]
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> &[f64] {
        &self.samples[y * self.width..(y + 1) * self.width]
    }

    /// All samples in row-major order
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Arithmetic mean of all samples
    pub fn mean(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Fail with `SizeMismatch` unless this raster is `size` x `size`.
    pub fn ensure_square(&self, size: usize) -> Result<(), HashError> {
        if self.width != size || self.height != size {
            return Err(HashError::SizeMismatch {
                expected: size,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl TryFrom<&GrayImage> for IntensityRaster {
    type Error = HashError;

    fn try_from(gray: &GrayImage) -> Result<Self, Self::Error> {
        let samples = gray.as_raw().iter().map(|&p| f64::from(p)).collect();
        Self::from_samples(gray.width() as usize, gray.height() as usize, samples)
    }
}

/// Square matrix of DCT-II coefficients, row-major.
///
/// Row index is the vertical frequency, column index the horizontal one.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientMatrix {
    size: usize,
    values: Vec<f64>,
}

impl CoefficientMatrix {
    pub(crate) fn from_values(size: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), size * size);
        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Coefficient at vertical frequency `row`, horizontal frequency `col`
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Copy the top-left `k` x `k` corner in row-major order.
    pub fn low_frequency_block(&self, k: usize) -> Result<Vec<f64>, HashError> {
        if k == 0 || k > self.size {
            return Err(HashError::SizeMismatch {
                expected: self.size,
                width: k,
                height: k,
            });
        }
        let mut block = Vec::with_capacity(k * k);
        for row in 0..k {
            block.extend_from_slice(&self.values[row * self.size..row * self.size + k]);
        }
        Ok(block)
    }
}
