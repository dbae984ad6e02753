//! Interpolation methods for cube evaluation.

use std::str::FromStr;

use crate::LutError;

/// Interpolation method for cube evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Nearest grid point (no interpolation).
    Nearest,

    /// Trilinear interpolation across the 8 surrounding grid points.
    ///
    /// Default method, matches standard LUT color-grading behavior.
    #[default]
    Linear,

    /// Tetrahedral interpolation.
    ///
    /// Smoother along the neutral axis than trilinear.
    Tetrahedral,
}

impl FromStr for Interpolation {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "linear" | "trilinear" => Ok(Self::Linear),
            "tetrahedral" | "tetra" => Ok(Self::Tetrahedral),
            _ => Err(LutError::ParseError(format!("unknown interpolation: {}", s))),
        }
    }
}
