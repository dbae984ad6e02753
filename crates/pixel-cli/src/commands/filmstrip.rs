//! Filmstrip preview command
//!
//! Builds one preheated preview per LUT in a directory and writes each
//! graded preview to `<identifier>.png`.

use crate::assets;
use crate::FilmstripArgs;
use anyhow::{bail, Context, Result};
use pixel_core::Image;
use pixel_engine::{Engine, EngineConfig, ImageRecipe};
use tracing::{debug, info, trace};

pub fn run(args: FilmstripArgs, config: EngineConfig, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), luts = %args.luts.display(), "filmstrip::run");

    let storage = assets::load_storage(&args.luts, args.color_space)?;
    if storage.is_empty() {
        bail!("No LUTs found in {}", args.luts.display());
    }

    let mut image = super::load_image(&args.input)?;
    if let Some(max_edge) = args.thumb {
        image = thumbnail(&image, max_edge)?;
        debug!(width = image.width(), height = image.height(), "Thumbnail");
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create: {}", args.output.display()))?;

    let engine = Engine::new(config)?;
    let source = ImageRecipe::from_image(image);
    let previews = engine.previews(&source, &storage);
    info!(count = previews.len(), "Previews queued");

    for preview in &previews {
        let filter = preview.filter();
        let pixels = engine.render(preview.rendered())?;
        let path = args.output.join(format!("{}.png", filter.identifier()));
        super::save_image(&path, &pixels)?;
        if verbose > 0 {
            println!("{} -> {}", filter.name(), path.display());
        }
    }

    let stats = engine.renderer().cache_stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        cached = stats.len,
        "Filmstrip done"
    );
    Ok(())
}

/// Nearest-neighbor downscale so the longest edge is at most `max_edge`.
fn thumbnail(image: &Image, max_edge: u32) -> Result<Image> {
    let (w, h) = (image.width(), image.height());
    let longest = w.max(h);
    if max_edge == 0 || longest <= max_edge {
        return Ok(image.clone());
    }

    let scale = max_edge as f64 / longest as f64;
    let tw = ((w as f64 * scale).round() as u32).max(1);
    let th = ((h as f64 * scale).round() as u32).max(1);

    let mut out = Image::try_filled(tw, th, [0.0; 4])?.with_color_space(image.color_space());
    for y in 0..th {
        let sy = ((y as u64 * h as u64) / th as u64) as u32;
        for x in 0..tw {
            let sx = ((x as u64 * w as u64) / tw as u64) as u32;
            out.set_pixel(x, y, image.pixel(sx, sy));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_keeps_aspect() {
        let image = Image::new(400, 200);
        let thumb = thumbnail(&image, 100).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (100, 50));

        let small = thumbnail(&image, 1000).unwrap();
        assert!(small.shares_data(&image));
    }
}
