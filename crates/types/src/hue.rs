use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound (inclusive) of a hue on the color wheel.
pub const MAX_HUE: u16 = 360;

/// Error returned when a hue falls outside `0..=360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("hue {0} is out of range; expected 0..=360")]
pub struct HueError(pub u16);

/// A unitless hue on the color wheel, `0..=360`.
///
/// Projects carry a hue rather than a pre-formatted color string so that the
/// rendering layer decides saturation, lightness and alpha.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Hue(u16);

impl Hue {
    /// Creates a hue, rejecting values above [`MAX_HUE`].
    pub fn new(value: u16) -> Result<Self, HueError> {
        if value > MAX_HUE {
            return Err(HueError(value));
        }
        Ok(Self(value))
    }

    /// Hue in degrees.
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Returns the hue rotated by `delta` degrees, wrapping around the wheel.
    pub fn rotate(self, delta: u16) -> Self {
        Self((self.0 + delta % MAX_HUE) % MAX_HUE)
    }
}

impl TryFrom<u16> for Hue {
    type Error = HueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hue> for u16 {
    fn from(hue: Hue) -> Self {
        hue.0
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
