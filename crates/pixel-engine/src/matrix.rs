//! Per-pixel RGBA color matrix.

use pixel_core::Image;

/// A 4x4 matrix plus bias applied to straight RGBA pixels.
///
/// `out[i] = rows[i] · [r, g, b, a] + bias[i]`. Results are not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    /// Output rows: R, G, B, A.
    pub rows: [[f32; 4]; 4],
    /// Added after the matrix product.
    pub bias: [f32; 4],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    /// Pass-through matrix.
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            bias: [0.0; 4],
        }
    }

    /// Multiplies alpha by `gain`, leaving color untouched.
    ///
    /// ```rust
    /// use pixel_engine::ColorMatrix;
    ///
    /// let m = ColorMatrix::alpha_gain(0.5);
    /// assert_eq!(m.apply([0.2, 0.4, 0.6, 1.0]), [0.2, 0.4, 0.6, 0.5]);
    /// ```
    pub const fn alpha_gain(gain: f32) -> Self {
        let mut m = Self::identity();
        m.rows[3][3] = gain;
        m
    }

    /// Returns `true` if applying this matrix changes nothing.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Applies the matrix to one pixel.
    #[inline]
    pub fn apply(&self, px: [f32; 4]) -> [f32; 4] {
        let mut out = self.bias;
        for (o, row) in out.iter_mut().zip(self.rows.iter()) {
            *o += row[0] * px[0] + row[1] * px[1] + row[2] * px[2] + row[3] * px[3];
        }
        out
    }

    /// Applies the matrix to every pixel of an image.
    pub fn apply_image(&self, image: &Image) -> Image {
        let m = *self;
        image.map_pixels(move |px| m.apply(px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_exact() {
        let px = [0.123, 0.456, 0.789, 0.5];
        assert_eq!(ColorMatrix::identity().apply(px), px);
        assert!(ColorMatrix::default().is_identity());
    }

    #[test]
    fn test_alpha_gain_only_touches_alpha() {
        let px = [0.3, 0.6, 0.9, 0.8];
        let out = ColorMatrix::alpha_gain(0.25).apply(px);
        assert_eq!(&out[..3], &px[..3]);
        assert_eq!(out[3], 0.8 * 0.25);
        assert!(!ColorMatrix::alpha_gain(0.25).is_identity());
    }

    #[test]
    fn test_bias() {
        let mut m = ColorMatrix::identity();
        m.bias = [0.1, 0.0, 0.0, 0.0];
        assert_eq!(m.apply([0.0, 0.0, 0.0, 1.0])[0], 0.1);
    }
}
