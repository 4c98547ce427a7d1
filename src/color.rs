//! Color conversions
//!
//! Blobs carry their color twice: as `#rrggbb` (what palettes store) and as a
//! CSS `hsl()` string (what the canvas paints with).

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::HUE_RANGE;

/// Errors from parsing a hex color
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected 6 hex digits, got {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional, case-insensitive)
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 {
            return Err(ColorError::BadLength(hex.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::BadDigit(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lower-case `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color: hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Convert from RGB, rounding to whole degrees/percent
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = rgb.r as f32 / 255.0;
        let g = rgb.g as f32 / 255.0;
        let b = rgb.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = max - min;
        let sum = max + min;
        let l = sum / 2.0;

        let (h, s) = if diff == 0.0 {
            (0.0, 0.0)
        } else {
            let s = if l > 0.5 {
                diff / (2.0 - sum)
            } else {
                diff / sum
            };
            let h = if max == r {
                ((g - b) / diff + if g < b { 6.0 } else { 0.0 }) / 6.0
            } else if max == g {
                ((b - r) / diff + 2.0) / 6.0
            } else {
                ((r - g) / diff + 4.0) / 6.0
            };
            (h, s)
        };

        Self::new(
            (h * 360.0).round(),
            (s * 100.0).round(),
            (l * 100.0).round(),
        )
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        Rgb::from_hex(hex).map(Self::from_rgb)
    }

    pub fn to_rgb(&self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }

    /// CSS color string, e.g. `hsl(210, 70%, 56%)`
    pub fn css(&self) -> String {
        format!(
            "hsl({:.0}, {:.0}%, {:.0}%)",
            self.h.rem_euclid(360.0),
            self.s,
            self.l
        )
    }
}

/// CSS HSL to RGB. Hue wraps, so values outside [0, 360) are fine.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let a = s * l.min(1.0 - l);

    let k = |n: f32| (n + h / 30.0).rem_euclid(12.0);
    let f = |n: f32| {
        let k = k(n);
        let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * v).round().clamp(0.0, 255.0) as u8
    };

    Rgb::new(f(0.0), f(8.0), f(4.0))
}

/// A soft, saturated color whose hue stays within `HUE_RANGE` of `base_hue`
pub fn random_near_hue<R: Rng>(rng: &mut R, base_hue: f32) -> Hsl {
    let h = base_hue - HUE_RANGE + rng.random::<f32>() * HUE_RANGE * 2.0;
    let s = 68.0 + rng.random::<f32>() * 4.0;
    let l = 54.0 + rng.random::<f32>() * 4.0;
    Hsl::new(h, s, l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::from_hex("#FF6B35"), Ok(Rgb::new(0xff, 0x6b, 0x35)));
        assert_eq!(Rgb::from_hex("006994"), Ok(Rgb::new(0x00, 0x69, 0x94)));
        assert!(matches!(Rgb::from_hex("#fff"), Err(ColorError::BadLength(_))));
        assert!(matches!(Rgb::from_hex("#gg0000"), Err(ColorError::BadDigit(_))));
    }

    #[test]
    fn test_to_hex_is_lowercase() {
        assert_eq!(Rgb::new(0xab, 0xcd, 0xef).to_hex(), "#abcdef");
    }

    #[test]
    fn test_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0).to_hex(), "#ff0000");
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0).to_hex(), "#00ff00");
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0).to_hex(), "#0000ff");
        assert_eq!(hsl_to_rgb(0.0, 0.0, 100.0).to_hex(), "#ffffff");
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsl_to_rgb(-120.0, 100.0, 50.0).to_hex(), hsl_to_rgb(240.0, 100.0, 50.0).to_hex());
        assert_eq!(hsl_to_rgb(480.0, 100.0, 50.0).to_hex(), hsl_to_rgb(120.0, 100.0, 50.0).to_hex());
    }

    #[test]
    fn test_hex_to_hsl() {
        assert_eq!(Hsl::from_hex("#ff0000").unwrap(), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(Hsl::from_hex("#00ff00").unwrap(), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(Hsl::from_hex("#808080").unwrap(), Hsl::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn test_css_string() {
        assert_eq!(Hsl::new(210.0, 70.0, 56.0).css(), "hsl(210, 70%, 56%)");
        assert_eq!(Hsl::new(-30.0, 70.0, 56.0).css(), "hsl(330, 70%, 56%)");
    }

    #[test]
    fn test_random_near_hue_stays_in_window() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let c = random_near_hue(&mut rng, 200.0);
            assert!(c.h >= 150.0 && c.h <= 250.0);
            assert!(c.s >= 68.0 && c.s <= 72.0);
            assert!(c.l >= 54.0 && c.l <= 58.0);
        }
    }
}
