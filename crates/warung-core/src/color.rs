//! # Hex Colors
//!
//! `#RRGGBB` palette values and the darkened variants derived for presentation.

use crate::error::SiteError;
use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns true if `value` matches `^#[0-9A-Fa-f]{6}$`
    pub fn is_valid(value: &str) -> bool {
        value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Darken by `percent`: every channel drops by `round(2.55 * percent)`,
    /// clamped to `0..=255`. Negative percentages lighten.
    pub fn darken(&self, percent: f64) -> Self {
        let amount = (2.55 * percent).round() as i32;
        let shift = |channel: u8| (i32::from(channel) - amount).clamp(0, 255) as u8;

        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }
}

impl FromStr for HexColor {
    type Err = SiteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || SiteError::InvalidColor {
            value: value.to_string(),
        };

        if !Self::is_valid(value) {
            return Err(invalid());
        }

        let mut channels = [0u8; 3];
        hex::decode_to_slice(&value[1..], &mut channels).map_err(|_| invalid())?;

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

/// Darken a raw palette value. Returns `None` when the value is not a valid hex triple.
pub fn darken(value: &str, percent: f64) -> Option<String> {
    value
        .parse::<HexColor>()
        .ok()
        .map(|color| color.darken(percent).to_string())
}
