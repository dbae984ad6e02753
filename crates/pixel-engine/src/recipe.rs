//! Lazy image recipes.
//!
//! An [`ImageRecipe`] describes how to produce pixels without producing
//! them. Recipes are immutable `Arc` nodes, so cloning one is cheap and
//! clones share identity. Pixels are materialized by
//! [`Renderer::render`](crate::Renderer::render).
//!
//! ```rust
//! use std::sync::Arc;
//! use pixel_core::{ColorSpaceId, Image};
//! use pixel_engine::{ColorMatrix, ImageRecipe};
//! use pixel_lut::LutTable;
//!
//! let source = ImageRecipe::from_image(Image::new(4, 4));
//! let graded = source
//!     .color_cube(Arc::new(LutTable::identity(2)?), ColorSpaceId::Srgb)
//!     .color_matrix(ColorMatrix::alpha_gain(0.5))
//!     .source_over(&source);
//!
//! assert_eq!(graded.extent(), source.extent());
//! assert!(!graded.ptr_eq(&source));
//! # Ok::<(), pixel_lut::LutError>(())
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pixel_core::{ColorSpaceId, Extent, Image};
use pixel_lut::LutTable;

use crate::ColorMatrix;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a recipe node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(u64);

impl RecipeId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operation performed by a recipe node.
pub(crate) enum Op {
    /// Already materialized pixels.
    Source(Image),
    /// Color cube lookup in `working_space`.
    ///
    /// `convert` is set for untagged input: pixels are encoded into the
    /// working space before the lookup and decoded afterwards.
    ColorCube {
        input: ImageRecipe,
        table: Arc<LutTable>,
        working_space: ColorSpaceId,
        convert: bool,
    },
    /// Per-pixel RGBA matrix.
    ColorMatrix {
        input: ImageRecipe,
        matrix: ColorMatrix,
    },
    /// Porter-Duff source-over.
    SourceOver {
        foreground: ImageRecipe,
        background: ImageRecipe,
    },
}

impl Op {
    fn kind(&self) -> &'static str {
        match self {
            Op::Source(_) => "source",
            Op::ColorCube { .. } => "color_cube",
            Op::ColorMatrix { .. } => "color_matrix",
            Op::SourceOver { .. } => "source_over",
        }
    }
}

struct Node {
    id: RecipeId,
    op: Op,
    extent: Extent,
    color_space: Option<ColorSpaceId>,
}

/// Lazy, immutable description of an image.
#[derive(Clone)]
pub struct ImageRecipe {
    node: Arc<Node>,
}

impl ImageRecipe {
    fn with_op(op: Op, extent: Extent, color_space: Option<ColorSpaceId>) -> Self {
        Self {
            node: Arc::new(Node {
                id: RecipeId::next(),
                op,
                extent,
                color_space,
            }),
        }
    }

    /// Wraps materialized pixels.
    pub fn from_image(image: Image) -> Self {
        let extent = image.extent();
        let color_space = image.color_space();
        Self::with_op(Op::Source(image), extent, color_space)
    }

    /// Looks every pixel up in `table`.
    ///
    /// The working space is this recipe's tag, or `fallback` when untagged.
    /// The result keeps this recipe's extent and tag.
    pub fn color_cube(&self, table: Arc<LutTable>, fallback: ColorSpaceId) -> Self {
        let tag = self.color_space();
        Self::with_op(
            Op::ColorCube {
                input: self.clone(),
                table,
                working_space: tag.unwrap_or(fallback),
                convert: tag.is_none(),
            },
            self.extent(),
            tag,
        )
    }

    /// Applies `matrix` to every pixel.
    pub fn color_matrix(&self, matrix: ColorMatrix) -> Self {
        Self::with_op(
            Op::ColorMatrix {
                input: self.clone(),
                matrix,
            },
            self.extent(),
            self.color_space(),
        )
    }

    /// Composites this recipe over `background`.
    ///
    /// Extents are checked when rendering.
    pub fn source_over(&self, background: &ImageRecipe) -> Self {
        Self::with_op(
            Op::SourceOver {
                foreground: self.clone(),
                background: background.clone(),
            },
            self.extent(),
            self.color_space(),
        )
    }

    /// Node identity.
    pub fn id(&self) -> RecipeId {
        self.node.id
    }

    /// Pixel rectangle, known without rendering.
    pub fn extent(&self) -> Extent {
        self.node.extent
    }

    /// Color space tag, known without rendering.
    pub fn color_space(&self) -> Option<ColorSpaceId> {
        self.node.color_space
    }

    /// Returns `true` if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &ImageRecipe) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Short operation name, for logging.
    pub fn kind(&self) -> &'static str {
        self.node.op.kind()
    }

    pub(crate) fn op(&self) -> &Op {
        &self.node.op
    }
}

impl From<Image> for ImageRecipe {
    fn from(image: Image) -> Self {
        Self::from_image(image)
    }
}

impl fmt::Debug for ImageRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageRecipe")
            .field("id", &self.node.id)
            .field("kind", &self.kind())
            .field("extent", &self.node.extent)
            .field("color_space", &self.node.color_space)
            .finish()
    }
}
