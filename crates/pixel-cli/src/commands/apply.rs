//! LUT application command

use crate::assets;
use crate::ApplyArgs;
use anyhow::{Context, Result};
use pixel_engine::{EngineConfig, ImageRecipe, Renderer};
use std::time::Instant;
use tracing::{debug, info, trace};

pub fn run(args: ApplyArgs, config: &EngineConfig, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), lut = %args.lut.display(), "apply::run");

    let filter = assets::load_filter(&args.lut, args.dimension, args.color_space)?
        .with_amount(args.amount)
        .context("Invalid --amount")?
        .with_interpolation(args.interpolation);
    let image = super::load_image(&args.input)?;

    if verbose > 0 {
        println!(
            "Applying {} ({}^3, {:?}) to {} ({}x{})",
            filter.name(),
            filter.dimension(),
            filter.interpolation(),
            args.input.display(),
            image.width(),
            image.height()
        );
    }

    let start = Instant::now();
    let source = ImageRecipe::from_image(image);
    let graded = filter.apply(&source, &source, args.blend_alpha);
    let result = Renderer::new(config).render(&graded)?;
    debug!(elapsed = ?start.elapsed(), "Rendered");

    super::save_image(&args.output, &result)?;
    info!(output = %args.output.display(), "Done");

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
