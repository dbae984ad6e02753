//! Identity LUT generation command

use crate::IdentityArgs;
use anyhow::{bail, Result};
use pixel_lut::{packed, LutTable};
use tracing::{info, trace};

pub fn run(args: IdentityArgs, verbose: u8) -> Result<()> {
    trace!(dimension = args.dimension, "identity::run");

    if args.dimension < 2 {
        bail!("Dimension must be at least 2, got {}", args.dimension);
    }

    let lut = LutTable::identity(args.dimension)?;
    let (width, height, bytes) = packed::encode_rgba8(&lut);
    pixel_io::png::write_rgba8(&args.output, width, height, &bytes)?;

    info!(
        dimension = args.dimension,
        width,
        height,
        output = %args.output.display(),
        "Identity LUT written"
    );
    if verbose > 0 {
        println!(
            "Wrote {}x{} identity LUT ({}^3) to {}",
            width,
            height,
            args.dimension,
            args.output.display()
        );
    }
    Ok(())
}
