//! LUT asset discovery.
//!
//! A LUT directory holds packed PNG LUTs named `LUT_<dim>_<Name>.png` and
//! `.cube` files. Each becomes one [`ColorCubeFilter`] whose identifier is
//! the file stem and whose display name is `<Name>` with underscores shown
//! as spaces.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use pixel_core::ColorSpaceId;
use pixel_engine::{ColorCubeFilter, ColorCubeStorage};
use pixel_lut::cube;
use regex::Regex;
use tracing::{debug, info, trace, warn};

fn packed_name() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^LUT_(\d+)_(.+)$").ok()).as_ref()
}

/// Splits a `LUT_<dim>_<Name>` stem into dimension and display name.
pub fn parse_packed_stem(stem: &str) -> Option<(usize, String)> {
    let caps = packed_name()?.captures(stem)?;
    let dimension = caps[1].parse().ok()?;
    Some((dimension, display_name(&caps[2])))
}

fn display_name(raw: &str) -> String {
    raw.replace('_', " ")
}

fn file_stem(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))
}

/// Loads a single LUT file as a filter.
///
/// `dimension` overrides the one encoded in a packed PNG file name.
pub fn load_filter(
    path: &Path,
    dimension: Option<usize>,
    color_space: ColorSpaceId,
) -> Result<ColorCubeFilter> {
    let stem = file_stem(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "cube" => {
            let table = cube::read_3d(path)
                .with_context(|| format!("Failed to read LUT: {}", path.display()))?;
            let dim = table.dimension();
            Ok(ColorCubeFilter::new(display_name(stem), stem, table, dim, color_space)?)
        }
        "png" => {
            let parsed = parse_packed_stem(stem);
            let (dim, name) = match (dimension, parsed) {
                (Some(d), Some((_, name))) => (d, name),
                (Some(d), None) => (d, display_name(stem)),
                (None, Some(parsed)) => parsed,
                (None, None) => bail!(
                    "Cannot infer LUT dimension from '{}', pass --dimension",
                    path.display()
                ),
            };
            let image = pixel_io::png::read(path)
                .with_context(|| format!("Failed to load: {}", path.display()))?;
            ColorCubeFilter::from_packed_image(name, stem, &image, dim, color_space)
                .with_context(|| format!("Invalid packed LUT: {}", path.display()))
        }
        _ => bail!("Unsupported LUT format: .{}", ext),
    }
}

/// Collects LUT files in `dir`, sorted by file name.
fn lut_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for ext in ["png", "cube"] {
        let pattern = dir.join(format!("*.{ext}"));
        let pattern = pattern
            .to_str()
            .with_context(|| format!("Invalid directory: {}", dir.display()))?;
        files.extend(glob::glob(pattern)?.filter_map(|r| r.ok()));
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Loads every LUT asset in `dir`. Malformed assets are skipped.
pub fn load_storage(dir: &Path, color_space: ColorSpaceId) -> Result<ColorCubeStorage> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let mut storage = ColorCubeStorage::new();
    for path in lut_files(dir)? {
        let is_png = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("png"));
        let named = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| parse_packed_stem(s).is_some());
        if is_png && !named {
            trace!(path = %path.display(), "Skipping PNG without LUT_<dim>_ prefix");
            continue;
        }

        match load_filter(&path, None, color_space) {
            Ok(filter) => {
                debug!(
                    identifier = filter.identifier(),
                    dimension = filter.dimension(),
                    "Loaded LUT"
                );
                if let Err(e) = storage.push(filter) {
                    warn!(path = %path.display(), error = %e, "Skipping LUT");
                }
            }
            Err(e) => warn!(path = %path.display(), error = %format!("{e:#}"), "Skipping LUT"),
        }
    }

    info!(count = storage.len(), dir = %dir.display(), "LUT assets loaded");
    Ok(storage)
}
