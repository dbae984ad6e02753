//! Adobe/Resolve .cube LUT format support.
//!
//! Only 3D cubes over the unit domain are accepted; entries become opaque
//! RGBA cube entries.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Data lines are ordered red fastest, then green, then blue, which is the
//! in-memory order of [`LutTable`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pixel_lut::cube;
//!
//! let lut = cube::read_3d("grade.cube")?;
//! let rgba = lut.sample([0.5, 0.3, 0.2]);
//! ```

use crate::table::checked_entry_count;
use crate::{LutError, LutResult, LutTable};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads a 3D LUT from a .cube file.
pub fn read_3d<P: AsRef<Path>>(path: P) -> LutResult<LutTable> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    parse_3d(reader)
}

/// Parses a 3D LUT from a reader.
pub fn parse_3d<R: BufRead>(reader: R) -> LutResult<LutTable> {
    let mut size: Option<usize> = None;
    let mut domain_min = [0.0_f32; 3];
    let mut domain_max = [1.0_f32; 3];
    let mut data: Vec<[f32; 3]> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("TITLE") {
            continue;
        } else if line.starts_with("LUT_3D_SIZE") {
            size = Some(parse_size(line)?);
        } else if line.starts_with("LUT_1D_SIZE") {
            return Err(LutError::ParseError("expected 3D LUT, found 1D".into()));
        } else if line.starts_with("DOMAIN_MIN") {
            domain_min = parse_domain(line)?;
        } else if line.starts_with("DOMAIN_MAX") {
            domain_max = parse_domain(line)?;
        } else {
            data.push(parse_rgb(line)?);
        }
    }

    let size = size.ok_or_else(|| LutError::ParseError("missing LUT_3D_SIZE".into()))?;

    for c in 0..3 {
        if domain_min[c] != 0.0 || domain_max[c] != 1.0 {
            return Err(LutError::InvalidRange {
                min: domain_min[c],
                max: domain_max[c],
            });
        }
    }

    let expected = checked_entry_count(size)?;
    if data.len() != expected {
        return Err(LutError::ParseError(format!(
            "expected {} values, found {}",
            expected,
            data.len()
        )));
    }

    LutTable::from_rgb(data, size)
}

/// Writes a cube to a .cube file. Alpha is not representable and is dropped.
pub fn write_3d<P: AsRef<Path>>(path: P, lut: &LutTable) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Generated by pixel-lut")?;
    writeln!(writer, "LUT_3D_SIZE {}", lut.dimension())?;
    writeln!(writer)?;

    for entry in lut.entries() {
        writeln!(writer, "{:.6} {:.6} {:.6}", entry[0], entry[1], entry[2])?;
    }
    writer.flush()?;

    Ok(())
}

fn parse_size(line: &str) -> LutResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(LutError::ParseError("invalid size line".into()));
    }
    parts[1]
        .parse()
        .map_err(|_| LutError::ParseError("invalid size value".into()))
}

fn parse_domain(line: &str) -> LutResult<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(LutError::ParseError("invalid domain line".into()));
    }
    Ok([
        parts[1].parse().map_err(|_| LutError::ParseError("invalid domain R".into()))?,
        parts[2].parse().map_err(|_| LutError::ParseError("invalid domain G".into()))?,
        parts[3].parse().map_err(|_| LutError::ParseError("invalid domain B".into()))?,
    ])
}

fn parse_rgb(line: &str) -> LutResult<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(LutError::ParseError(format!("invalid RGB line: {}", line)));
    }
    Ok([
        parts[0].parse().map_err(|_| LutError::ParseError("invalid R value".into()))?,
        parts[1].parse().map_err(|_| LutError::ParseError("invalid G value".into()))?,
        parts[2].parse().map_err(|_| LutError::ParseError("invalid B value".into()))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SWAP_RED_BLUE: &str = r#"
# red <-> blue swap
TITLE "Swap"
LUT_3D_SIZE 2
DOMAIN_MIN 0.0 0.0 0.0
DOMAIN_MAX 1.0 1.0 1.0

0.0 0.0 0.0
0.0 0.0 1.0
0.0 1.0 0.0
0.0 1.0 1.0
1.0 0.0 0.0
1.0 0.0 1.0
1.0 1.0 0.0
1.0 1.0 1.0
"#;

    #[test]
    fn parse_3d_cube() {
        let lut = parse_3d(Cursor::new(SWAP_RED_BLUE)).expect("parse failed");
        assert_eq!(lut.dimension(), 2);
        assert_eq!(lut.sample([1.0, 0.0, 0.0]), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(lut.sample([0.0, 0.0, 1.0]), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rejects_1d_and_short_data() {
        assert!(parse_3d(Cursor::new("LUT_1D_SIZE 2\n0 0 0\n1 1 1\n")).is_err());
        assert!(parse_3d(Cursor::new("LUT_3D_SIZE 2\n0 0 0\n")).is_err());
        assert!(parse_3d(Cursor::new("0 0 0\n")).is_err());
    }

    #[test]
    fn rejects_zero_and_overflowing_size() {
        let err = parse_3d(Cursor::new("LUT_3D_SIZE 4000000\n0 0 0\n")).unwrap_err();
        assert!(matches!(err, LutError::InvalidSize(_)));

        let err = parse_3d(Cursor::new("LUT_3D_SIZE 0\n")).unwrap_err();
        assert!(matches!(err, LutError::InvalidSize(_)));
    }

    #[test]
    fn rejects_non_unit_domain() {
        let text = SWAP_RED_BLUE.replace("DOMAIN_MAX 1.0 1.0 1.0", "DOMAIN_MAX 2.0 2.0 2.0");
        let err = parse_3d(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, LutError::InvalidRange { .. }));
    }

    #[test]
    fn roundtrip_3d() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("identity.cube");
        let lut = LutTable::identity(4).unwrap();

        write_3d(&path, &lut).expect("write failed");
        let loaded = read_3d(&path).expect("read failed");

        assert_eq!(loaded.dimension(), 4);
        assert_eq!(loaded.sample([1.0, 0.0, 0.0]), [1.0, 0.0, 0.0, 1.0]);
    }
}
