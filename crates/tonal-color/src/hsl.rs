// SPDX-License-Identifier: MIT
//
// HSL: the classic cylindrical sRGB model.
//
// HSL lightness is not perceptual (a 50% yellow is far brighter than a 50%
// blue), so the palette engine only uses it for the HSL scale strategy and
// for `hsl(...)` rendering. Values are kept in CSS units: hue in degrees,
// saturation and lightness in percent.

use crate::color::normalize_hue;
use crate::error::ColorError;
use crate::hex::{format_hex, parse_hex};

/// A color in HSL (hue 0–360, saturation 0–100, lightness 0–100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert 8-bit sRGB to HSL.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            // achromatic
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        #[allow(clippy::float_cmp)]
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h * 60.0, s * 100.0, l * 100.0)
    }

    /// Parse a hex string into HSL.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for malformed input.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let (r, g, b) = parse_hex(hex)?;
        Ok(Self::from_rgb8(r, g, b))
    }

    /// Round every component to whole CSS units.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(self.h.round(), self.s.round(), self.l.round())
    }

    /// Convert to 8-bit sRGB. Saturation and lightness are clamped to
    /// 0–100 and the hue wrapped into [0, 360).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let h = normalize_hue(self.h);
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let l = self.l.clamp(0.0, 100.0) / 100.0;

        let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }

    /// Convert to a lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format_hex(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn primaries() {
        assert_eq!(Hsl::from_rgb8(255, 0, 0).rounded(), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(Hsl::from_rgb8(0, 255, 0).rounded(), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(Hsl::from_rgb8(0, 0, 255).rounded(), Hsl::new(240.0, 100.0, 50.0));
    }

    #[test]
    fn gray_is_unsaturated() {
        let hsl = Hsl::from_rgb8(128, 128, 128);
        assert!(hsl.s.abs() < f64::EPSILON);
        assert!(hsl.h.abs() < f64::EPSILON);
    }

    #[test]
    fn tailwind_blue() {
        // #3b82f6 = hsl(217, 91%, 60%)
        assert_eq!(Hsl::from_hex("#3b82f6").unwrap().rounded(), Hsl::new(217.0, 91.0, 60.0));
    }

    #[test]
    fn roundtrip_through_hex() {
        for hex in ["#ff0000", "#00ff00", "#0000ff", "#ffffff", "#000000", "#808080"] {
            assert_eq!(Hsl::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn hue_360_wraps_to_red() {
        assert_eq!(Hsl::new(360.0, 100.0, 50.0).to_hex(), "#ff0000");
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(Hsl::new(0.0, 150.0, 120.0).to_hex(), "#ffffff");
        assert_eq!(Hsl::new(0.0, -10.0, -5.0).to_hex(), "#000000");
    }
}
