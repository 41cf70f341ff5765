//! Hex colors with the two-digit alpha suffixes the canvas strokes use.

use std::fmt;
use std::str::FromStr;

use crate::error::BackdropError;

/// Alpha suffix of the diagonal background wash.
pub const WASH_ALPHA: u8 = 0x10;
/// Alpha suffix of flow line strokes (~12%).
pub const LINE_ALPHA: u8 = 0x20;
/// Alpha suffix of sparkle dots (~25%).
pub const DOT_ALPHA: u8 = 0x40;

/// An opaque `#RRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba { rgb: self, a }
    }

    /// Alpha from an opacity in `[0, 1]`, rounded to the nearest byte.
    pub fn with_opacity(self, opacity: f64) -> Rgba {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.with_alpha(a)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = BackdropError;

    /// Accepts `#RRGGBB` and the short `#RGB` form, `#` optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BackdropError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Rgb::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

/// A color plus alpha byte, rendered as `#RRGGBBAA` for the canvas API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: u8,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02X}", self.rgb, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!("#0A7373".parse::<Rgb>().unwrap(), Rgb::new(0x0A, 0x73, 0x73));
        assert_eq!("b19777".parse::<Rgb>().unwrap(), Rgb::new(0xB1, 0x97, 0x77));
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12", "#12345", "#GGGGGG", "teal", "#0A7373FF"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn alpha_suffix_is_two_hex_digits() {
        let teal = Rgb::new(0x0A, 0x73, 0x73);
        assert_eq!(teal.with_alpha(LINE_ALPHA).to_string(), "#0A737320");
        assert_eq!(teal.with_alpha(DOT_ALPHA).to_string(), "#0A737340");
        assert_eq!(Rgb::WHITE.with_opacity(0.5).to_string(), "#FFFFFF80");
        assert_eq!(Rgb::WHITE.with_opacity(3.0).a, 0xFF);
    }
}
