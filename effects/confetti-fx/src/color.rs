//! Palette colors

use std::fmt;
use std::str::FromStr;

use crate::error::EffectError;

/// An opaque sRGB color; transparency is applied at paint time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::from_rgb_u32(0xffffff);

    /// Build a color from a `0xRRGGBB` literal
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Channels as floats in 0.0-1.0
    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Color {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EffectError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let digits: Vec<u8> = hex
                    .chars()
                    .map(|c| c.to_digit(16).map(|d| d as u8 * 17))
                    .collect::<Option<_>>()
                    .ok_or_else(invalid)?;
                Ok(Self {
                    r: digits[0],
                    g: digits[1],
                    b: digits[2],
                })
            }
            6 => {
                let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                Ok(Self::from_rgb_u32(rgb))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = EffectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Warm palette used by the localized confetti burst
pub const CONFETTI_PALETTE: [Color; 6] = [
    Color::from_rgb_u32(0xf59e0b),
    Color::from_rgb_u32(0xfde68a),
    Color::from_rgb_u32(0xfca5a5),
    Color::from_rgb_u32(0x86efac),
    Color::from_rgb_u32(0x93c5fd),
    Color::from_rgb_u32(0xc7d2fe),
];

/// Palette used by the full-viewport fountain
pub const FOUNTAIN_PALETTE: [Color; 6] = [
    Color::from_rgb_u32(0xf472b6),
    Color::from_rgb_u32(0xf59e0b),
    Color::from_rgb_u32(0x93c5fd),
    Color::from_rgb_u32(0x86efac),
    Color::from_rgb_u32(0xfca5a5),
    Color::from_rgb_u32(0xfde68a),
];
