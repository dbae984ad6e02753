//! Preview pairing of a source image and a filter.

use crate::{ColorCubeFilter, ImageRecipe, Preheater};

/// A source image paired with a [`ColorCubeFilter`] and its graded recipe.
///
/// The graded recipe is built at construction; its pixels are produced on
/// first render or by [`preheat`](Self::preheat).
///
/// Equality holds when both previews wrap the *same* source recipe (node
/// identity, not pixel equality) and value-equal filters.
#[derive(Debug, Clone)]
pub struct PreviewColorCubeFilter {
    source: ImageRecipe,
    filter: ColorCubeFilter,
    rendered: ImageRecipe,
}

impl PreviewColorCubeFilter {
    /// Pairs `source` with `filter` and builds `filter.apply(source, source, 1.0)`.
    pub fn new(source: &ImageRecipe, filter: ColorCubeFilter) -> Self {
        let rendered = filter.apply(source, source, 1.0);
        Self {
            source: source.clone(),
            filter,
            rendered,
        }
    }

    /// Ungraded source.
    pub fn source(&self) -> &ImageRecipe {
        &self.source
    }

    /// Filter being previewed.
    pub fn filter(&self) -> &ColorCubeFilter {
        &self.filter
    }

    /// Graded recipe.
    pub fn rendered(&self) -> &ImageRecipe {
        &self.rendered
    }

    /// Queues a background render of the graded recipe. Never blocks.
    pub fn preheat(&self, preheater: &Preheater) {
        preheater.submit(&self.rendered);
    }
}

impl PartialEq for PreviewColorCubeFilter {
    fn eq(&self, other: &Self) -> bool {
        self.source.ptr_eq(&other.source) && self.filter == other.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_core::{ColorSpaceId, Image};
    use pixel_lut::LutTable;

    fn filter() -> ColorCubeFilter {
        ColorCubeFilter::new("Id", "id", LutTable::identity(2).unwrap(), 2, ColorSpaceId::Srgb).unwrap()
    }

    #[test]
    fn test_rendered_is_built_eagerly() {
        let source = ImageRecipe::from_image(Image::new(5, 3));
        let preview = PreviewColorCubeFilter::new(&source, filter());
        assert!(preview.source().ptr_eq(&source));
        assert_eq!(preview.rendered().extent(), source.extent());
        assert_eq!(preview.rendered().kind(), "source_over");
    }

    #[test]
    fn test_equality_uses_source_identity() {
        let image = Image::new(2, 2);
        let a = ImageRecipe::from_image(image.clone());
        let b = ImageRecipe::from_image(image);

        assert_eq!(
            PreviewColorCubeFilter::new(&a, filter()),
            PreviewColorCubeFilter::new(&a, filter())
        );
        // Same pixels, different recipe node.
        assert_ne!(
            PreviewColorCubeFilter::new(&a, filter()),
            PreviewColorCubeFilter::new(&b, filter())
        );
    }
}
