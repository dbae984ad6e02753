//! RGBA color cube.
//!
//! A color cube maps an input RGB triplet to an output RGBA value through an
//! N×N×N grid. The alpha component is what lets a cube fade itself out:
//! compositing a cube's output over its input with the cube alpha as weight
//! blends between "no grade" and "full grade".

use crate::{Interpolation, LutError, LutResult};

/// An immutable N×N×N RGBA lookup table.
///
/// # Structure
///
/// - `dimension^3` entries, each an `[r, g, b, a]` output value
/// - Red varies fastest, then green, then blue:
///   `index = b * N * N + g * N + r`
/// - Input coordinates are clamped to [0, 1]
///
/// # Example
///
/// ```rust
/// use pixel_lut::LutTable;
///
/// let lut = LutTable::identity(2)?;
/// assert_eq!(lut.sample([1.0, 0.0, 0.0]), [1.0, 0.0, 0.0, 1.0]);
/// # Ok::<(), pixel_lut::LutError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LutTable {
    data: Vec<[f32; 4]>,
    dimension: usize,
    interpolation: Interpolation,
}

impl LutTable {
    /// Creates an identity (pass-through) cube with opaque alpha.
    ///
    /// # Errors
    ///
    /// [`LutError::InvalidSize`] if `dimension` is zero or `dimension^3`
    /// overflows.
    pub fn identity(dimension: usize) -> LutResult<Self> {
        let total = checked_entry_count(dimension)?;
        let mut data = Vec::with_capacity(total);
        let scale = (dimension - 1).max(1) as f32;

        for b in 0..dimension {
            for g in 0..dimension {
                for r in 0..dimension {
                    data.push([r as f32 / scale, g as f32 / scale, b as f32 / scale, 1.0]);
                }
            }
        }

        Ok(Self {
            data,
            dimension,
            interpolation: Interpolation::Linear,
        })
    }

    /// Creates a cube from raw RGBA entries.
    ///
    /// # Errors
    ///
    /// [`LutError::InvalidSize`] if `dimension` is zero or `data` does not
    /// hold exactly `dimension^3` entries.
    pub fn from_data(data: Vec<[f32; 4]>, dimension: usize) -> LutResult<Self> {
        let expected = checked_entry_count(dimension)?;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for dimension {}, got {}",
                expected,
                dimension,
                data.len()
            )));
        }
        Ok(Self {
            data,
            dimension,
            interpolation: Interpolation::Linear,
        })
    }

    /// Creates a cube from RGB entries with opaque alpha.
    pub fn from_rgb(data: Vec<[f32; 3]>, dimension: usize) -> LutResult<Self> {
        let rgba = data.into_iter().map(|[r, g, b]| [r, g, b, 1.0]).collect();
        Self::from_data(rgba, dimension)
    }

    /// Sets the interpolation method.
    pub fn with_interpolation(mut self, interp: Interpolation) -> Self {
        self.interpolation = interp;
        self
    }

    /// Returns a copy with every entry's alpha multiplied by `alpha`.
    ///
    /// Color components are left untouched. This is how a partial-strength
    /// variant of a grade is produced.
    pub fn with_alpha_scaled(&self, alpha: f32) -> Self {
        let data = self
            .data
            .iter()
            .map(|&[r, g, b, a]| [r, g, b, a * alpha])
            .collect();
        Self {
            data,
            dimension: self.dimension,
            interpolation: self.interpolation,
        }
    }

    /// Cube edge length.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Interpolation method used by [`sample`](Self::sample).
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Returns the total number of entries (`dimension^3`).
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Raw entries in red-fastest order.
    #[inline]
    pub fn entries(&self) -> &[[f32; 4]] {
        &self.data
    }

    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        b * self.dimension * self.dimension + g * self.dimension + r
    }

    /// Entry at grid position (r, g, b).
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f32; 4] {
        self.data[self.index(r, g, b)]
    }

    /// Looks up an RGB value and returns the interpolated RGBA entry.
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 4] {
        if self.dimension == 1 {
            return self.data[0];
        }
        match self.interpolation {
            Interpolation::Nearest => self.sample_nearest(rgb),
            Interpolation::Linear => self.sample_trilinear(rgb),
            Interpolation::Tetrahedral => self.sample_tetrahedral(rgb),
        }
    }

    fn sample_nearest(&self, rgb: [f32; 3]) -> [f32; 4] {
        let n = (self.dimension - 1) as f32;
        let [r, g, b] = clamp_unit(rgb);
        let last = self.dimension - 1;
        self.get(
            ((r * n).round() as usize).min(last),
            ((g * n).round() as usize).min(last),
            ((b * n).round() as usize).min(last),
        )
    }

    /// Grid cell origin and fractional offsets for a clamped input.
    fn cell(&self, rgb: [f32; 3]) -> ([usize; 3], [f32; 3]) {
        let n = (self.dimension - 1) as f32;
        let max_origin = self.dimension - 2;
        let mut origin = [0usize; 3];
        let mut frac = [0.0f32; 3];
        for (i, v) in clamp_unit(rgb).into_iter().enumerate() {
            let scaled = v * n;
            let o = (scaled.floor() as usize).min(max_origin);
            origin[i] = o;
            frac[i] = scaled - o as f32;
        }
        (origin, frac)
    }

    fn sample_trilinear(&self, rgb: [f32; 3]) -> [f32; 4] {
        let ([ri, gi, bi], [rf, gf, bf]) = self.cell(rgb);

        let c000 = self.get(ri, gi, bi);
        let c100 = self.get(ri + 1, gi, bi);
        let c010 = self.get(ri, gi + 1, bi);
        let c110 = self.get(ri + 1, gi + 1, bi);
        let c001 = self.get(ri, gi, bi + 1);
        let c101 = self.get(ri + 1, gi, bi + 1);
        let c011 = self.get(ri, gi + 1, bi + 1);
        let c111 = self.get(ri + 1, gi + 1, bi + 1);

        let mut result = [0.0f32; 4];
        for i in 0..4 {
            let c00 = lerp(c000[i], c100[i], rf);
            let c01 = lerp(c001[i], c101[i], rf);
            let c10 = lerp(c010[i], c110[i], rf);
            let c11 = lerp(c011[i], c111[i], rf);

            let c0 = lerp(c00, c10, gf);
            let c1 = lerp(c01, c11, gf);

            result[i] = lerp(c0, c1, bf);
        }
        result
    }

    fn sample_tetrahedral(&self, rgb: [f32; 3]) -> [f32; 4] {
        let ([ri, gi, bi], [rf, gf, bf]) = self.cell(rgb);

        let c000 = self.get(ri, gi, bi);
        let c100 = self.get(ri + 1, gi, bi);
        let c010 = self.get(ri, gi + 1, bi);
        let c110 = self.get(ri + 1, gi + 1, bi);
        let c001 = self.get(ri, gi, bi + 1);
        let c101 = self.get(ri + 1, gi, bi + 1);
        let c011 = self.get(ri, gi + 1, bi + 1);
        let c111 = self.get(ri + 1, gi + 1, bi + 1);

        let mut result = [0.0f32; 4];
        for i in 0..4 {
            result[i] = if rf > gf {
                if gf > bf {
                    c000[i] + rf * (c100[i] - c000[i]) + gf * (c110[i] - c100[i]) + bf * (c111[i] - c110[i])
                } else if rf > bf {
                    c000[i] + rf * (c100[i] - c000[i]) + bf * (c101[i] - c100[i]) + gf * (c111[i] - c101[i])
                } else {
                    c000[i] + bf * (c001[i] - c000[i]) + rf * (c101[i] - c001[i]) + gf * (c111[i] - c101[i])
                }
            } else if gf > bf {
                if rf > bf {
                    c000[i] + gf * (c010[i] - c000[i]) + rf * (c110[i] - c010[i]) + bf * (c111[i] - c110[i])
                } else {
                    c000[i] + gf * (c010[i] - c000[i]) + bf * (c011[i] - c010[i]) + rf * (c111[i] - c011[i])
                }
            } else {
                c000[i] + bf * (c001[i] - c000[i]) + gf * (c011[i] - c001[i]) + rf * (c111[i] - c011[i])
            };
        }
        result
    }
}

/// Exact when `a == b`.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `dimension^3`, rejecting zero and overflow.
pub(crate) fn checked_entry_count(dimension: usize) -> LutResult<usize> {
    if dimension == 0 {
        return Err(LutError::InvalidSize("dimension must be > 0".into()));
    }
    dimension
        .checked_mul(dimension)
        .and_then(|v| v.checked_mul(dimension))
        .ok_or_else(|| LutError::InvalidSize(format!("dimension {} overflows", dimension)))
}

#[inline]
fn clamp_unit(rgb: [f32; 3]) -> [f32; 3] {
    // NaN clamps to NaN; map it to 0 so the grid index stays valid.
    rgb.map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
}
