//! Porter-Duff source-over compositing on straight-alpha pixels.
//!
//! ```rust
//! use pixel_engine::composite::over_pixel;
//!
//! let fg = [0.0, 0.0, 1.0, 0.5]; // Half-transparent blue
//! let bg = [1.0, 0.0, 0.0, 1.0]; // Opaque red
//! let out = over_pixel(fg, bg);
//! assert!((out[0] - 0.5).abs() < 1e-6);
//! assert!((out[2] - 0.5).abs() < 1e-6);
//! ```

use crate::EngineResult;
use pixel_core::{Image, CHANNELS};
use rayon::prelude::*;
use tracing::trace;

/// Composites foreground over background (Porter-Duff Over).
///
/// Straight alpha: `out_a = Fa + Ba * (1 - Fa)`,
/// `out_c = (Fc * Fa + Bc * Ba * (1 - Fa)) / out_a`.
///
/// A fully transparent foreground returns the background unchanged and a
/// fully opaque one returns the foreground unchanged, bit for bit.
#[inline]
pub fn over_pixel(fg: [f32; 4], bg: [f32; 4]) -> [f32; 4] {
    let fg_a = fg[3];
    if fg_a <= 0.0 {
        return bg;
    }
    if fg_a >= 1.0 {
        return fg;
    }

    let bg_a = bg[3];
    let out_a = fg_a + bg_a * (1.0 - fg_a);
    if out_a < 1e-8 {
        return [0.0, 0.0, 0.0, 0.0];
    }

    let inv_out_a = 1.0 / out_a;
    [
        (fg[0] * fg_a + bg[0] * bg_a * (1.0 - fg_a)) * inv_out_a,
        (fg[1] * fg_a + bg[1] * bg_a * (1.0 - fg_a)) * inv_out_a,
        (fg[2] * fg_a + bg[2] * bg_a * (1.0 - fg_a)) * inv_out_a,
        out_a,
    ]
}

/// Composites `fg` over `bg`. The result carries the foreground's tag.
///
/// # Errors
///
/// [`pixel_core::Error::DimensionMismatch`] (as [`crate::EngineError::Core`])
/// if the extents differ.
pub fn over(fg: &Image, bg: &Image) -> EngineResult<Image> {
    trace!(width = bg.width(), height = bg.height(), "composite::over");

    if fg.extent() != bg.extent() {
        return Err(pixel_core::Error::dimension_mismatch(
            (fg.width(), fg.height()),
            (bg.width(), bg.height()),
        )
        .into());
    }

    let mut out = vec![0.0f32; bg.data().len()];
    out.par_chunks_exact_mut(CHANNELS)
        .zip(fg.data().par_chunks_exact(CHANNELS))
        .zip(bg.data().par_chunks_exact(CHANNELS))
        .for_each(|((dst, f), b)| {
            let px = over_pixel([f[0], f[1], f[2], f[3]], [b[0], b[1], b[2], b[3]]);
            dst.copy_from_slice(&px);
        });

    Ok(Image::from_data(bg.width(), bg.height(), out)?.with_color_space(fg.color_space()))
}
