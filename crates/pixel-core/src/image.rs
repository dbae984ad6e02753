//! Materialized image buffers.
//!
//! [`Image`] is the output of rendering and the leaf of every recipe:
//! straight (un-premultiplied) RGBA `f32` pixels plus an optional
//! [`ColorSpaceId`] tag.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, alpha interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pixel_core::Image;
//!
//! let mut img = Image::new(4, 4);
//! img.set_pixel(1, 2, [1.0, 0.5, 0.25, 1.0]);
//! assert_eq!(img.pixel(1, 2), [1.0, 0.5, 0.25, 1.0]);
//! ```

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::{ColorSpaceId, Error, Result};

/// Channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Pixel rectangle of an image, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Extent {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the extent has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Owned RGBA `f32` image buffer.
///
/// The pixel buffer is stored in an [`Arc<Vec<f32>>`], so cloning shares the
/// data. Mutation goes through copy-on-write ([`set_pixel`](Self::set_pixel)).
///
/// Equality compares extent, tag and every sample bit-for-bit (as `f32`).
#[derive(Clone, PartialEq)]
pub struct Image {
    data: Arc<Vec<f32>>,
    width: u32,
    height: u32,
    color_space: Option<ColorSpaceId>,
}

/// Number of `f32` samples for an image, or an allocation error on overflow.
fn sample_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| Error::allocation_failed(usize::MAX, format!("{}x{} overflows", width, height)))
}

impl Image {
    /// Creates a new transparent black, untagged image.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`. Use
    /// [`try_filled`](Self::try_filled) for untrusted extents.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0.0; CHANNELS])
    }

    /// Creates an image filled with a specific pixel value.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`.
    ///
    /// ```rust
    /// use pixel_core::Image;
    ///
    /// let red = Image::filled(2, 2, [1.0, 0.0, 0.0, 1.0]);
    /// assert_eq!(red.pixel(1, 1), [1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: [f32; CHANNELS]) -> Self {
        match Self::try_filled(width, height, pixel) {
            Ok(image) => image,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an image filled with a specific pixel value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the sample count overflows.
    pub fn try_filled(width: u32, height: u32, pixel: [f32; CHANNELS]) -> Result<Self> {
        let samples = sample_count(width, height)?;
        let mut data = Vec::with_capacity(samples);
        for _ in 0..samples / CHANNELS {
            data.extend_from_slice(&pixel);
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            color_space: None,
        })
    }

    /// Creates an image from existing RGBA samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height * 4`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = sample_count(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            color_space: None,
        })
    }

    /// Creates an image from 8-bit RGBA bytes, normalized to [0, 1].
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = sample_count(width, height)?;
        if bytes.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, bytes.len()),
            ));
        }
        let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Self::from_data(width, height, data)
    }

    /// Converts to 8-bit RGBA bytes, clamping to [0, 1] and rounding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Returns this image with the given color space tag.
    pub fn with_color_space(mut self, color_space: Option<ColorSpaceId>) -> Self {
        self.color_space = color_space;
        self
    }

    /// Color space tag, if any. Untagged images hold linear working data.
    #[inline]
    pub fn color_space(&self) -> Option<ColorSpaceId> {
        self.color_space
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image extent.
    #[inline]
    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of the sample buffer in bytes.
    #[inline]
    pub fn byte_size(&self) -> u64 {
        (self.data.len() * std::mem::size_of::<f32>()) as u64
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the raw samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns `true` if both images share the same sample buffer.
    #[inline]
    pub fn shares_data(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; CHANNELS] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut result = [0.0; CHANNELS];
        result.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        result
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; CHANNELS]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [f32; CHANNELS]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[offset..offset + CHANNELS].copy_from_slice(&pixel);
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [f32; CHANNELS])> + '_ {
        let width = self.width.max(1);
        self.data.chunks_exact(CHANNELS).enumerate().map(move |(i, px)| {
            let x = i as u32 % width;
            let y = i as u32 / width;
            (x, y, [px[0], px[1], px[2], px[3]])
        })
    }

    /// Builds a new image of the same extent and tag by mapping every pixel
    /// in parallel.
    pub fn map_pixels<F>(&self, f: F) -> Image
    where
        F: Fn([f32; CHANNELS]) -> [f32; CHANNELS] + Sync + Send,
    {
        let mut out = vec![0.0f32; self.data.len()];
        out.par_chunks_exact_mut(CHANNELS)
            .zip(self.data.par_chunks_exact(CHANNELS))
            .for_each(|(dst, src)| {
                let px = f([src[0], src[1], src[2], src[3]]);
                dst.copy_from_slice(&px);
            });
        Image {
            data: Arc::new(out),
            width: self.width,
            height: self.height,
            color_space: self.color_space,
        }
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("color_space", &self.color_space)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new() {
        let img = Image::new(100, 50);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.extent(), Extent::new(100, 50));
        assert_eq!(img.pixel(0, 0), [0.0; 4]);
        assert_eq!(img.color_space(), None);
    }

    #[test]
    fn test_image_set_get_pixel() {
        let mut img = Image::new(10, 10);
        img.set_pixel(5, 5, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(img.pixel(5, 5), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(img.get_pixel(10, 0), None);
    }

    #[test]
    fn test_try_filled_overflow() {
        if usize::BITS == 64 {
            let err = Image::try_filled(u32::MAX, u32::MAX, [0.0; 4]).unwrap_err();
            assert!(matches!(err, Error::AllocationFailed { .. }));
        }
        let img = Image::try_filled(2, 3, [0.5; 4]).unwrap();
        assert_eq!(img.data().len(), 24);
        assert_eq!(img.pixel(1, 2), [0.5; 4]);
    }

    #[test]
    fn test_image_from_data_wrong_size() {
        assert!(Image::from_data(10, 10, vec![1.0; 100]).is_err());
        assert!(Image::from_data(5, 5, vec![1.0; 100]).is_ok());
    }

    #[test]
    fn test_rgba8_conversion() {
        let bytes = [255u8, 0, 128, 255];
        let img = Image::from_rgba8(1, 1, &bytes).unwrap();
        assert_eq!(img.pixel(0, 0)[0], 1.0);
        assert_eq!(img.to_rgba8(), bytes.to_vec());
    }

    #[test]
    fn test_clone_shares_until_write() {
        let a = Image::filled(4, 4, [0.5; 4]);
        let mut b = a.clone();
        assert!(a.shares_data(&b));
        b.set_pixel(0, 0, [1.0; 4]);
        assert!(!a.shares_data(&b));
        assert_eq!(a.pixel(0, 0), [0.5; 4]);
    }

    #[test]
    fn test_map_pixels_keeps_tag() {
        let img = Image::filled(3, 2, [0.25, 0.5, 0.75, 1.0]).with_color_space(Some(ColorSpaceId::Srgb));
        let out = img.map_pixels(|p| [p[0] * 2.0, p[1], p[2], p[3]]);
        assert_eq!(out.pixel(2, 1), [0.5, 0.5, 0.75, 1.0]);
        assert_eq!(out.color_space(), Some(ColorSpaceId::Srgb));
    }

    #[test]
    fn test_pixels_coordinates() {
        let img = Image::new(3, 2);
        let coords: Vec<(u32, u32)> = img.pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords.last(), Some(&(2, 1)));
        assert_eq!(coords.len(), 6);
    }
}
