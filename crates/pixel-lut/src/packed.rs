//! Packed 2D LUT images.
//!
//! A color cube of dimension N is commonly shipped as an ordinary image: the
//! N blue slices are laid out as a grid of N×N tiles, each tile holding red
//! along x and green along y.
//!
//! # Layout
//!
//! ```text
//! cols = width / N, rows = height / N, rows * cols == N
//!
//! +--------+--------+-----+
//! | b = 0  | b = 1  | ... |   tile t = row * cols + col  ->  b = t
//! +--------+--------+-----+   pixel (x, y) inside a tile  ->  r = x, g = y
//! | b=cols | ...    |     |
//! +--------+--------+-----+
//! ```
//!
//! A 64³ cube is typically a 512x512 image (8x8 tiles).
//!
//! # Example
//!
//! ```rust
//! use pixel_lut::{packed, LutTable};
//!
//! let lut = LutTable::identity(4)?;
//! let (w, h, bytes) = packed::encode_rgba8(&lut);
//! assert_eq!((w, h), (4 * 2, 4 * 2));
//! let back = packed::decode_rgba8(w, h, &bytes, 4).unwrap();
//! assert_eq!(back.dimension(), 4);
//! # Ok::<(), pixel_lut::LutError>(())
//! ```

use pixel_core::Image;

use crate::table::checked_entry_count;
use crate::{LutError, LutResult, LutTable};

/// Tile grid `(cols, rows)` for a packed image, validating its shape.
fn tile_grid(width: u32, height: u32, dimension: usize) -> LutResult<(usize, usize)> {
    let entries = checked_entry_count(dimension)?;
    let (w, h) = (width as usize, height as usize);

    if w * h != entries {
        return Err(LutError::InvalidSize(format!(
            "{}x{} image holds {} pixels, dimension {} needs {}",
            width, height, w * h, dimension, entries
        )));
    }
    if w % dimension != 0 || h % dimension != 0 {
        return Err(LutError::InvalidSize(format!(
            "{}x{} image is not a grid of {}x{} tiles",
            width, height, dimension, dimension
        )));
    }

    // w * h == N^3 with both sides multiples of N leaves exactly N tiles.
    Ok((w / dimension, h / dimension))
}

/// Decodes a cube from packed RGBA samples (any numeric source).
fn decode_with<F>(width: u32, dimension: usize, cols: usize, rows: usize, fetch: F) -> Vec<[f32; 4]>
where
    F: Fn(usize) -> [f32; 4],
{
    let n = dimension;
    let w = width as usize;
    let mut data = vec![[0.0f32; 4]; n * n * n];

    for row in 0..rows {
        for y in 0..n {
            for col in 0..cols {
                let b = row * cols + col;
                for x in 0..n {
                    let pixel = (row * n + y) * w + col * n + x;
                    data[b * n * n + y * n + x] = fetch(pixel);
                }
            }
        }
    }
    data
}

/// Decodes a cube from 8-bit RGBA bytes of a packed LUT image.
///
/// # Errors
///
/// [`LutError::InvalidSize`] if the image shape does not tile into a
/// `dimension`³ cube or the byte count is wrong.
pub fn decode_rgba8(width: u32, height: u32, bytes: &[u8], dimension: usize) -> LutResult<LutTable> {
    let (cols, rows) = tile_grid(width, height, dimension)?;
    let expected = width as usize * height as usize * 4;
    if bytes.len() != expected {
        return Err(LutError::InvalidSize(format!(
            "expected {} bytes, got {}",
            expected,
            bytes.len()
        )));
    }

    let data = decode_with(width, dimension, cols, rows, |p| {
        let px = &bytes[p * 4..p * 4 + 4];
        [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        ]
    });
    LutTable::from_data(data, dimension)
}

/// Decodes a cube from a packed LUT [`Image`].
///
/// Samples are used as stored; the image's color space tag is ignored.
pub fn from_image(image: &Image, dimension: usize) -> LutResult<LutTable> {
    let (cols, rows) = tile_grid(image.width(), image.height(), dimension)?;
    let samples = image.data();
    let data = decode_with(image.width(), dimension, cols, rows, |p| {
        [samples[p * 4], samples[p * 4 + 1], samples[p * 4 + 2], samples[p * 4 + 3]]
    });
    LutTable::from_data(data, dimension)
}

/// Number of tile columns used by [`encode_rgba8`]: the smallest divisor of
/// `dimension` whose square covers it.
fn encode_cols(dimension: usize) -> usize {
    (1..=dimension)
        .find(|c| dimension % c == 0 && c * c >= dimension)
        .unwrap_or(dimension)
}

/// Encodes a cube into a packed RGBA8 image. Returns `(width, height, bytes)`.
pub fn encode_rgba8(lut: &LutTable) -> (u32, u32, Vec<u8>) {
    let n = lut.dimension();
    let cols = encode_cols(n);
    let rows = n / cols;
    let (w, h) = (cols * n, rows * n);
    let mut bytes = vec![0u8; w * h * 4];

    for (b, slice) in lut.entries().chunks_exact(n * n).enumerate() {
        let (row, col) = (b / cols, b % cols);
        for (i, entry) in slice.iter().enumerate() {
            let (x, y) = (i % n, i / n);
            let pixel = (row * n + y) * w + col * n + x;
            for c in 0..4 {
                bytes[pixel * 4 + c] = (entry[c].clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        }
    }
    (w as u32, h as u32, bytes)
}

/// Encodes a cube into a packed LUT [`Image`].
pub fn to_image(lut: &LutTable) -> Image {
    let (w, h, bytes) = encode_rgba8(lut);
    let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
    Image::from_data(w, h, data).unwrap_or_else(|_| Image::new(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_grid_shapes() {
        assert_eq!(tile_grid(512, 512, 64).unwrap(), (8, 8));
        assert_eq!(tile_grid(64, 64, 16).unwrap(), (4, 4));
        assert_eq!(tile_grid(256, 16, 16).unwrap(), (16, 1));
        assert!(tile_grid(512, 511, 64).is_err());
        assert!(tile_grid(8, 8, 0).is_err());
        // Right pixel count, but a height of 2 cannot hold 4x4 tiles.
        assert!(tile_grid(32, 2, 4).is_err());
    }

    #[test]
    fn test_encode_layout() {
        assert_eq!(encode_cols(64), 8);
        assert_eq!(encode_cols(2), 2);
        assert_eq!(encode_cols(1), 1);
        assert_eq!(encode_cols(33), 11);

        let lut = LutTable::identity(64).unwrap();
        let (w, h, bytes) = encode_rgba8(&lut);
        assert_eq!((w, h), (512, 512));
        assert_eq!(bytes.len(), 512 * 512 * 4);
    }

    #[test]
    fn test_decode_tile_order() {
        // dimension 2: image 4x2, tiles side by side. Tile 1 (right) is b = 1.
        let lut = LutTable::identity(2).unwrap();
        let (w, h, bytes) = encode_rgba8(&lut);
        assert_eq!((w, h), (4, 2));
        // Pixel (3, 1) -> tile 1, x = 1, y = 1 -> (r, g, b) = (1, 1, 1).
        let p = (1 * 4 + 3) * 4;
        assert_eq!(&bytes[p..p + 4], &[255, 255, 255, 255]);
        // Pixel (1, 0) -> tile 0, x = 1 -> pure red.
        let p = 1 * 4;
        assert_eq!(&bytes[p..p + 4], &[255, 0, 0, 255]);

        let back = decode_rgba8(w, h, &bytes, 2).unwrap();
        assert_eq!(back, lut);
    }

    #[test]
    fn test_decode_identity_16() {
        let lut = LutTable::identity(16).unwrap();
        let (w, h, bytes) = encode_rgba8(&lut);
        let back = decode_rgba8(w, h, &bytes, 16).unwrap();
        let out = back.sample([0.2, 0.6, 0.9]);
        assert_abs_diff_eq!(out[0], 0.2, epsilon = 0.01);
        assert_abs_diff_eq!(out[1], 0.6, epsilon = 0.01);
        assert_abs_diff_eq!(out[2], 0.9, epsilon = 0.01);
    }

    #[test]
    fn test_from_image_matches_bytes() {
        let lut = LutTable::identity(4).unwrap();
        let image = to_image(&lut);
        let from_img = from_image(&image, 4).unwrap();
        let (w, h, bytes) = encode_rgba8(&lut);
        assert_eq!(from_img, decode_rgba8(w, h, &bytes, 4).unwrap());
    }

    #[test]
    fn test_decode_rejects_wrong_dimension() {
        let (w, h, bytes) = encode_rgba8(&LutTable::identity(4).unwrap());
        assert!(decode_rgba8(w, h, &bytes, 2).is_err());
        assert!(decode_rgba8(w, h, &bytes[..bytes.len() - 4], 4).is_err());
    }
}
