//! Color cube filter.
//!
//! A [`ColorCubeFilter`] is an immutable grade: a [`LutTable`] plus the
//! metadata needed to show it in a filter list and the blend `amount`.
//! Applying it only builds a recipe. Nothing is rendered until the recipe
//! reaches a [`Renderer`](crate::Renderer).

use std::sync::Arc;

use pixel_core::{ColorSpaceId, Image};
use pixel_lut::{packed, Interpolation, LutError, LutTable};
use tracing::trace;

use crate::{ColorMatrix, EngineError, EngineResult, ImageRecipe};

/// An immutable 3D LUT grade.
///
/// Two filters are equal when every attribute is equal, LUT contents
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCubeFilter {
    name: String,
    identifier: String,
    dimension: usize,
    table: Arc<LutTable>,
    color_space: ColorSpaceId,
    amount: f64,
}

impl ColorCubeFilter {
    /// Builds a filter from a decoded table.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lut`] if `dimension` is 0 or the table holds a
    /// different number of entries than `dimension^3`.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        table: LutTable,
        dimension: usize,
        color_space: ColorSpaceId,
    ) -> EngineResult<Self> {
        if dimension == 0 {
            return Err(LutError::InvalidSize("dimension must be greater than 0".into()).into());
        }
        let expected = dimension
            .checked_pow(3)
            .ok_or_else(|| LutError::InvalidSize(format!("dimension {dimension} overflows")))?;
        if table.dimension() != dimension || table.entry_count() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {expected} entries for dimension {dimension}, table has {}",
                table.entry_count()
            ))
            .into());
        }

        Ok(Self {
            name: name.into(),
            identifier: identifier.into(),
            dimension,
            table: Arc::new(table),
            color_space,
            amount: 1.0,
        })
    }

    /// Builds a filter from a packed 2D LUT image.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lut`] if the image is not a valid packed LUT of
    /// `dimension`.
    pub fn from_packed_image(
        name: impl Into<String>,
        identifier: impl Into<String>,
        image: &Image,
        dimension: usize,
        color_space: ColorSpaceId,
    ) -> EngineResult<Self> {
        let table = packed::from_image(image, dimension)?;
        Self::new(name, identifier, table, dimension, color_space)
    }

    /// Returns a copy with a different blend amount.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidParameter`] unless `amount` is in `[0, 1]`.
    pub fn with_amount(&self, amount: f64) -> EngineResult<Self> {
        if !(0.0..=1.0).contains(&amount) {
            return Err(EngineError::InvalidParameter(format!(
                "amount must be in [0, 1], got {amount}"
            )));
        }
        Ok(Self {
            amount,
            ..self.clone()
        })
    }

    /// Returns a copy that samples its table with `interpolation`.
    pub fn with_interpolation(&self, interpolation: Interpolation) -> Self {
        if self.table.interpolation() == interpolation {
            return self.clone();
        }
        let table = self.table.as_ref().clone().with_interpolation(interpolation);
        Self {
            table: Arc::new(table),
            ..self.clone()
        }
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable key.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Cube edge length.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Backing table.
    pub fn table(&self) -> &LutTable {
        &self.table
    }

    /// Sampling method of the backing table.
    pub fn interpolation(&self) -> Interpolation {
        self.table.interpolation()
    }

    /// Working space for untagged images.
    pub fn color_space(&self) -> ColorSpaceId {
        self.color_space
    }

    /// Blend amount in `[0, 1]`.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Grades `image` and composites the result over `source`.
    ///
    /// `blend_alpha` scales the LUT alpha before the lookup (clamped to
    /// `[0, 1]`, NaN counts as 1). The filter's `amount` then scales the
    /// graded alpha. The product of the two is the opacity of the grade over
    /// `source`, so either one at 0 leaves `source` untouched.
    ///
    /// The returned recipe has the extent and tag of `image`.
    ///
    /// ```rust
    /// use pixel_core::{ColorSpaceId, Image};
    /// use pixel_engine::{ColorCubeFilter, ImageRecipe, Renderer};
    /// use pixel_lut::LutTable;
    ///
    /// let filter = ColorCubeFilter::new(
    ///     "Identity", "identity", LutTable::identity(2)?, 2, ColorSpaceId::Srgb,
    /// )?;
    /// let source = ImageRecipe::from_image(Image::new(8, 8));
    /// let graded = filter.apply(&source, &source, 1.0);
    /// let pixels = Renderer::default().render(&graded)?;
    /// assert_eq!(pixels.width(), 8);
    /// # Ok::<(), pixel_engine::EngineError>(())
    /// ```
    pub fn apply(&self, image: &ImageRecipe, source: &ImageRecipe, blend_alpha: f64) -> ImageRecipe {
        let blend_alpha = if blend_alpha.is_nan() {
            1.0
        } else {
            blend_alpha.clamp(0.0, 1.0)
        };
        trace!(
            identifier = %self.identifier,
            amount = self.amount,
            blend_alpha,
            "ColorCubeFilter::apply"
        );

        let table = if blend_alpha == 1.0 {
            Arc::clone(&self.table)
        } else {
            Arc::new(self.table.with_alpha_scaled(blend_alpha as f32))
        };

        image
            .color_cube(table, self.color_space)
            .color_matrix(ColorMatrix::alpha_gain(self.amount as f32))
            .source_over(source)
    }
}
