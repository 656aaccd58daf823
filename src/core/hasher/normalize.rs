//! Raster normalization: luminance reduction plus SIMD-accelerated bilinear
//! resampling to a fixed target size.
//!
//! Uses fast_image_resize crate which is 5-14x faster than image crate's resize.
//! Automatically uses AVX2/NEON SIMD when available.

use super::raster::IntensityRaster;
use crate::error::HashError;
use fast_image_resize::{images::Image, PixelType, ResizeOptions, Resizer};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

/// Resizer that reduces any decoded image to a single-channel intensity raster
pub struct Normalizer {
    resizer: Resizer,
}

impl Normalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Reduce `image` to 8-bit luma and resample it to exactly `width` x `height`.
    ///
    /// The aspect ratio is not preserved. Luma uses the Rec. 709 weights of
    /// `DynamicImage::to_luma8` for every pixel format, alpha is dropped.
    pub fn normalize_gray(
        &mut self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, HashError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(HashError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        if width == 0 || height == 0 {
            return Err(HashError::InvalidTargetSize { width, height });
        }

        // Grayscale first: one channel to resample instead of three or four
        let gray = image.to_luma8();
        let (src_width, src_height) = gray.dimensions();

        let src_image = Image::from_vec_u8(src_width, src_height, gray.into_raw(), PixelType::U8)
            .map_err(|e| {
                HashError::ComputationFailed(format!("Failed to create source image: {}", e))
            })?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Bilinear,
        ));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| HashError::ComputationFailed(format!("Resize failed: {}", e)))?;

        let result_buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(width, height, dst_image.into_vec()).ok_or_else(|| {
                HashError::ComputationFailed("Failed to create result buffer".to_string())
            })?;

        Ok(result_buffer)
    }

    /// Same as [`Normalizer::normalize_gray`], returning real-valued samples.
    pub fn normalize(
        &mut self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<IntensityRaster, HashError> {
        let gray = self.normalize_gray(image, width, height)?;
        IntensityRaster::try_from(&gray)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-off normalization
pub fn normalize(image: &DynamicImage, width: u32, height: u32) -> Result<IntensityRaster, HashError> {
    Normalizer::new().normalize(image, width, height)
}
