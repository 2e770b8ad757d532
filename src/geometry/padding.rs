use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Margins that shrink the legal drag rectangle, in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Padding {
    /// Margin from the left edge of the viewport.
    pub left: f64,
    /// Margin from the top edge of the viewport.
    pub top: f64,
    /// Margin from the right edge of the viewport.
    pub right: f64,
    /// Margin from the bottom edge of the viewport.
    pub bottom: f64,
}
impl Default for Padding {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_SIZE)
    }
}
impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left, self.top, self.right, self.bottom,
        )
    }
}

impl Padding {
    /// Padding used on every side when none is configured.
    pub const DEFAULT_SIZE: f64 = 30.0;

    /// Returns padding with the same size on all four sides.
    pub fn uniform(size: f64) -> Self {
        Self {
            left: size,
            top: size,
            right: size,
            bottom: size,
        }
    }
    /// Returns padding with a separate size for each side.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl From<f64> for Padding {
    fn from(size: f64) -> Self {
        Self::uniform(size)
    }
}

impl FromStr for Padding {
    type Err = ConfigError;

    /// Parses either a single number (uniform padding) or four
    /// comma-separated numbers in `left,top,right,bottom` order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_side = |side: &str| {
            let side = side.trim();
            match side.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(ConfigError::InvalidNumber(side.to_owned())),
            }
        };

        let sides = s.split(',').collect::<Vec<_>>();
        match sides.as_slice() {
            [size] => Ok(Self::uniform(parse_side(size)?)),
            [l, t, r, b] => Ok(Self::new(
                parse_side(l)?,
                parse_side(t)?,
                parse_side(r)?,
                parse_side(b)?,
            )),
            _ => Err(ConfigError::PaddingSideCount(sides.len())),
        }
    }
}
