//! LUT listing command

use crate::assets;
use crate::ListArgs;
use anyhow::Result;
use pixel_core::ColorSpaceId;
use tracing::trace;

pub fn run(args: ListArgs, verbose: u8) -> Result<()> {
    trace!(dir = %args.luts.display(), "list::run");

    let storage = assets::load_storage(&args.luts, ColorSpaceId::default())?;
    if storage.is_empty() {
        println!("No LUTs found in {}", args.luts.display());
        return Ok(());
    }

    for filter in &storage {
        if verbose > 0 {
            println!(
                "{:<32} {:<24} {:>3}^3",
                filter.identifier(),
                filter.name(),
                filter.dimension()
            );
        } else {
            println!("{}", filter.identifier());
        }
    }
    Ok(())
}
