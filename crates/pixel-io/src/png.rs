//! PNG format support.
//!
//! Reading expands palette and low bit-depth images and converts every
//! layout to straight RGBA `f32`; the result is tagged sRGB. Writing always
//! produces 8-bit RGBA.

use crate::{IoError, IoResult};
use pixel_core::{ColorSpaceId, Image};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Reads a PNG file from the given path.
///
/// # Example
///
/// ```rust,ignore
/// use pixel_io::png;
///
/// let image = png::read("LUT_64_Warm.png")?;
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    trace!(path = %path.display(), "png::read");

    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader.output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader.next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let buf = &buf[..info.buffer_size()];

    let samples: Vec<f32> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => {
            buf.iter().map(|&v| v as f32 / 255.0).collect()
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            buf.chunks_exact(3)
                .flat_map(|p| [p[0] as f32 / 255.0, p[1] as f32 / 255.0, p[2] as f32 / 255.0, 1.0])
                .collect()
        }
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => {
            bytes_to_u16(buf).into_iter().map(|v| v as f32 / 65535.0).collect()
        }
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => {
            bytes_to_u16(buf)
                .chunks_exact(3)
                .flat_map(|p| [p[0] as f32 / 65535.0, p[1] as f32 / 65535.0, p[2] as f32 / 65535.0, 1.0])
                .collect()
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            buf.iter()
                .flat_map(|&g| {
                    let v = g as f32 / 255.0;
                    [v, v, v, 1.0]
                })
                .collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            buf.chunks_exact(2)
                .flat_map(|ga| {
                    let v = ga[0] as f32 / 255.0;
                    [v, v, v, ga[1] as f32 / 255.0]
                })
                .collect()
        }
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(
                format!("{:?} {:?}", color_type, bit_depth)
            ));
        }
    };

    debug!(width = info.width, height = info.height, "decoded PNG");
    let image = Image::from_data(info.width, info.height, samples)?
        .with_color_space(Some(ColorSpaceId::Srgb));
    Ok(image)
}

/// Writes an image to an 8-bit RGBA PNG file.
///
/// Samples are clamped to [0, 1]; the color space tag is not converted.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), "png::write");

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder.write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    png_writer.write_image_data(&image.to_rgba8())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer.finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Writes raw 8-bit RGBA bytes as a PNG (used for packed LUT images).
pub fn write_rgba8<P: AsRef<Path>>(path: P, width: u32, height: u32, bytes: &[u8]) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    {
        let mut encoder = png::Encoder::new(&mut writer, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut png_writer = encoder.write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer.write_image_data(bytes)
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer.finish()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_rgba() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gradient.png");

        let mut image = Image::new(8, 4);
        for y in 0..4 {
            for x in 0..8 {
                image.set_pixel(x, y, [x as f32 / 7.0, y as f32 / 3.0, 0.5, 1.0]);
            }
        }

        write(&path, &image).expect("write failed");
        let loaded = read(&path).expect("read failed");

        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.height(), 4);
        assert_eq!(loaded.color_space(), Some(ColorSpaceId::Srgb));
        assert_eq!(loaded.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn test_write_rgba8_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("raw.png");
        let bytes = [255u8, 0, 0, 255, 0, 0, 255, 128];

        write_rgba8(&path, 2, 1, &bytes).expect("write failed");
        let loaded = read(&path).expect("read failed");
        assert_eq!(loaded.to_rgba8(), bytes.to_vec());
    }

    #[test]
    fn test_missing_file() {
        let err = read("/nonexistent/never.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
