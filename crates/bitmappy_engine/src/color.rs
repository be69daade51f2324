use std::fmt::Display;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap();
}

/// RGB color value. Equality is component wise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Marks a cell as unset. Blank canvases are filled with it.
    pub const TRANSPARENT: Color = Color::new(255, 0, 255);

    /// What the mini view shows in place of `TRANSPARENT`.
    pub const MINI_VIEW_BACKDROP: Color = Color::new(0, 255, 0);

    /// Outline color of the canvas pixel boxes.
    pub const GRID: Color = Color::new(96, 96, 96);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn red(&self) -> u8 {
        self.r
    }

    pub fn green(&self) -> u8 {
        self.g
    }

    pub fn blue(&self) -> u8 {
        self.b
    }

    pub fn get_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn with_red(self, r: u8) -> Self {
        Color { r, ..self }
    }

    pub fn with_green(self, g: u8) -> Self {
        Color { g, ..self }
    }

    pub fn with_blue(self, b: u8) -> Self {
        Color { b, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        *self == Color::TRANSPARENT
    }

    /// Upper case `#RRGGBB`, as shown next to the color well.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidHexColor` if `hex` is not six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let Some(cap) = HEX_COLOR_REGEX.captures(hex.trim()) else {
            return Err(EngineError::InvalidHexColor { value: hex.to_string() });
        };
        let (_, [r, g, b]) = cap.extract();
        let parse = |s: &str| u8::from_str_radix(s, 16).map_err(|_| EngineError::InvalidHexColor { value: hex.to_string() });
        Ok(Color::new(parse(r)?, parse(g)?, parse(b)?))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::new(value.0, value.1, value.2)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(value: Color) -> (u8, u8, u8) {
        (value.r, value.g, value.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Color::new(value[0], value[1], value[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(value: Color) -> [u8; 3] {
        [value.r, value.g, value.b]
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(value: Color) -> Self {
        image::Rgb([value.r, value.g, value.b])
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(value: image::Rgb<u8>) -> Self {
        Color::from(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::new(0x12, 0xAB, 0xFF);
        assert_eq!("#12ABFF", c.to_hex());
        assert_eq!(c, Color::from_hex("#12abff").unwrap());
        assert_eq!(c, Color::from_hex("12ABFF").unwrap());
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("#12ABF").is_err());
        assert!(Color::from_hex("#12ABFG").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_transparent_sentinel() {
        assert!(Color::new(255, 0, 255).is_transparent());
        assert!(!Color::BLACK.is_transparent());
    }
}
