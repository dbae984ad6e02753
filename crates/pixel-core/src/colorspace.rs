//! Color space tags.
//!
//! Images and LUTs carry a runtime [`ColorSpaceId`] tag instead of a
//! compile-time marker: LUT assets arrive at runtime with their space
//! attached, and a filter decides per image which space to work in.
//!
//! # Supported Color Spaces
//!
//! - [`ColorSpaceId::Srgb`] - sRGB with the IEC 61966-2-1 transfer function
//! - [`ColorSpaceId::DeviceRgb`] - Device RGB, values used as-is
//! - [`ColorSpaceId::LinearSrgb`] - Linear sRGB (Rec.709 primaries, linear)
//!
//! # Encoding
//!
//! Untagged pixel data is treated as linear working data. [`ColorSpaceId::encode`]
//! moves a linear value into the space, [`ColorSpaceId::decode`] moves it back.
//!
//! ```
//! use pixel_core::ColorSpaceId;
//!
//! let v = ColorSpaceId::Srgb.encode(0.214);
//! assert!((v - 0.5).abs() < 0.01);
//! assert_eq!(ColorSpaceId::DeviceRgb.encode(0.214), 0.214);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Runtime color space tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorSpaceId {
    /// sRGB with the standard piecewise transfer function.
    #[default]
    Srgb,
    /// Device-dependent RGB. No transfer function is applied.
    DeviceRgb,
    /// Linear-light sRGB.
    LinearSrgb,
}

impl ColorSpaceId {
    /// All known color spaces.
    pub const ALL: [ColorSpaceId; 3] = [Self::Srgb, Self::DeviceRgb, Self::LinearSrgb];

    /// Human-readable name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Srgb => "sRGB",
            Self::DeviceRgb => "DeviceRGB",
            Self::LinearSrgb => "Linear sRGB",
        }
    }

    /// Whether values in this space are linear light.
    pub const fn is_linear(self) -> bool {
        matches!(self, Self::LinearSrgb)
    }

    /// Encodes a linear working value into this space.
    #[inline]
    pub fn encode(self, linear: f32) -> f32 {
        match self {
            Self::Srgb => srgb_oetf(linear),
            Self::DeviceRgb | Self::LinearSrgb => linear,
        }
    }

    /// Decodes a value in this space back to linear working data.
    #[inline]
    pub fn decode(self, encoded: f32) -> f32 {
        match self {
            Self::Srgb => srgb_eotf(encoded),
            Self::DeviceRgb | Self::LinearSrgb => encoded,
        }
    }

    /// Applies [`encode`](Self::encode) to an RGB triplet.
    #[inline]
    pub fn encode_rgb(self, rgb: [f32; 3]) -> [f32; 3] {
        [self.encode(rgb[0]), self.encode(rgb[1]), self.encode(rgb[2])]
    }

    /// Applies [`decode`](Self::decode) to an RGB triplet.
    #[inline]
    pub fn decode_rgb(self, rgb: [f32; 3]) -> [f32; 3] {
        [self.decode(rgb[0]), self.decode(rgb[1]), self.decode(rgb[2])]
    }
}

impl fmt::Display for ColorSpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpaceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "srgb" => Ok(Self::Srgb),
            "devicergb" | "device" => Ok(Self::DeviceRgb),
            "linearsrgb" | "linear" => Ok(Self::LinearSrgb),
            _ => Err(Error::other(format!("unknown color space: {}", s))),
        }
    }
}

/// sRGB EOTF: decodes sRGB encoded values to linear light.
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
#[inline]
pub fn srgb_eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: encodes linear light to sRGB.
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn srgb_oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}
