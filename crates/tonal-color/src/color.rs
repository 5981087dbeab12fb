// SPDX-License-Identifier: MIT
//
// tonal color core — OKLCH-native perceptual color.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Every scale step and every token the palette engine produces starts life
// here as an OKLCH triple. Lightness steps in OKLCH look like equal steps to
// a human eye, which is what makes an 11-weight scale feel evenly spaced.
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB ↔ 8-bit hex
//
// Gamut mapping reduces chroma (holding lightness and hue) when an OKLCH
// value falls outside the displayable sRGB cube. Clipping channels
// individually would shift the hue, so it is only used to absorb float
// residue after the chroma search has converged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::hex::{format_hex, parse_hex};

/// Chroma below which a color is treated as gray.
pub const ACHROMATIC_CHROMA: f64 = 1e-5;

/// Upper bound for chroma before gamut search. sRGB tops out near 0.32.
pub const MAX_CHROMA: f64 = 0.4;

/// Tolerance for the in-gamut test, in gamma-encoded sRGB units.
const GAMUT_EPSILON: f64 = 1e-6;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color stored in OKLCH space.
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white)
/// - `c`: chroma, 0.0 (gray) to ~0.37 (most vivid)
/// - `h`: hue angle in degrees, [0, 360)
///
/// Achromatic colors carry `h = 0` by convention so downstream arithmetic
/// never meets an undefined hue.
///
/// # Examples
///
/// ```
/// use tonal_color::color::Color;
///
/// let blue = Color::hex("#3b82f6").unwrap();
/// assert!(blue.h > 250.0 && blue.h < 270.0);
///
/// let tint = Color::oklch(0.97, 0.014, blue.h).to_gamut();
/// assert!(tint.in_srgb_gamut());
/// ```
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,

    /// Chroma (colorfulness): 0.0 (gray) upward.
    pub c: f64,

    /// Hue angle in degrees: 0.0 to 360.0.
    pub h: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Create a color from sRGB values (0.0 to 1.0 range).
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h }
    }

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Create a color from a `#RRGGBB` hex string (the `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for anything that is not exactly
    /// six hex digits. Short or alpha forms are rejected, never coerced.
    pub fn hex(s: &str) -> Result<Self, ColorError> {
        let (r, g, b) = parse_hex(s)?;
        Ok(Self::rgb8(r, g, b))
    }

    /// Pure black.
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Whether this color is achromatic (no visible chroma).
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_CHROMA
    }

    /// Coalesce non-finite coordinates to 0, clamp lightness to 0.0–1.0,
    /// force chroma non-negative and normalize the hue.
    ///
    /// Achromatic results get `h = 0`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let l = finite(self.l).clamp(0.0, 1.0);
        let c = finite(self.c).max(0.0);
        let h = if c < ACHROMATIC_CHROMA { 0.0 } else { normalize_hue(finite(self.h)) };
        Self { l, c, h }
    }

    /// Set lightness to an absolute value (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn set_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Set chroma to an absolute value (clamped to >= 0.0).
    #[inline]
    #[must_use]
    pub const fn set_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    // ─── Conversions to sRGB ─────────────────────────────────────────────

    /// Convert to sRGB with channel clamping (values in 0.0–1.0).
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Convert to 8-bit sRGB with channel clamping.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to a lowercase `#rrggbb` string, gamut-mapping first.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_gamut().to_rgb8();
        format_hex(r, g, b)
    }

    /// Whether this color is within the sRGB gamut.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        let range = -GAMUT_EPSILON..=1.0 + GAMUT_EPSILON;
        range.contains(&r) && range.contains(&g) && range.contains(&b)
    }

    /// Reduce chroma until this color fits within the sRGB gamut.
    ///
    /// Lightness and hue are held fixed; binary search finds the largest
    /// chroma that stays in gamut. Any input is accepted: non-finite values
    /// are coalesced first and chroma is capped at [`MAX_CHROMA`].
    #[must_use]
    pub fn to_gamut(self) -> Self {
        let base = self.sanitized();
        if base.in_srgb_gamut() {
            return base;
        }

        // Binary search for maximum in-gamut chroma
        let mut lo: f64 = 0.0;
        let mut hi: f64 = base.c.min(MAX_CHROMA);

        for _ in 0..24 {
            let mid = (lo + hi) * 0.5;
            let candidate = Self { c: mid, ..base };
            if candidate.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..base }.sanitized()
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f64 = 1e-9;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic()
                || other.is_achromatic()
                || hue_diff(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Hex-level entry points ──────────────────────────────────────────────────

/// Parse a hex string into OKLCH.
///
/// # Errors
///
/// Returns [`ColorError::InvalidHex`] when the input is not six hex digits.
pub fn hex_to_oklch(hex: &str) -> Result<Color, ColorError> {
    Color::hex(hex)
}

/// Render an OKLCH color as hex, chroma-clamping out-of-gamut input.
///
/// Total over every input, including NaN and absurd chroma: the result
/// always matches `#[0-9a-f]{6}`.
#[must_use]
pub fn oklch_to_hex(color: Color) -> String {
    color.to_hex()
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// Oklab math by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// Pipeline: OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // -1e-18 % 360 + 360 rounds to 360.0
    if h >= 360.0 { 0.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel).
#[inline]
fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// Convert OKLCH chroma and hue to Oklab a, b components.
#[inline]
fn oklch_to_oklab_ab(c: f64, h: f64) -> (f64, f64) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

/// Convert Oklab a, b components to OKLCH chroma and hue.
#[inline]
fn oklab_ab_to_oklch(a: f64, b: f64) -> (f64, f64) {
    let c = a.hypot(b);
    let h = if c < ACHROMATIC_CHROMA {
        0.0 // achromatic: hue is undefined
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    (c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The conversion goes through an intermediate LMS (cone response) space.

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_757_3f64.mul_add(b, 0.396_337_777_4f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8f64.mul_add(-b, 0.105_561_345_8f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548f64.mul_add(-b, 0.089_484_177_5f64.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_929_2f64.mul_add(s, 4.076_741_662_1f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5f64.mul_add(-s, (-1.268_438_004_6f64).mul_add(l, 2.609_757_401_1 * m));
    let bl = 1.707_614_701f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    // Linear sRGB → LMS
    let l = 0.051_445_992_9f64.mul_add(b, 0.412_221_470_8f64.mul_add(r, 0.536_332_536_3 * g));
    let m = 0.107_396_956_6f64.mul_add(b, 0.211_903_498_2f64.mul_add(r, 0.680_699_545_1 * g));
    let s = 0.629_978_700_5f64.mul_add(b, 0.088_302_461_9f64.mul_add(r, 0.281_718_837_6 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_046_8f64.mul_add(-s_, 0.210_454_255_3f64.mul_add(l_, 0.793_617_785 * m_));
    let a = 0.450_593_709_9f64.mul_add(s_, 1.977_998_495_1f64.mul_add(l_, -(2.428_592_205 * m_)));
    let b_ok = 0.808_675_766f64.mul_add(-s_, 0.025_904_037_1f64.mul_add(l_, 0.782_771_766_2 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert sRGB (0.0–1.0) → OKLCH.
fn srgb_to_oklch(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (l, a, b_ok) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// Convert OKLCH → sRGB (0.0–1.0, may be out of gamut).
fn oklch_to_srgb(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Conversions ──────────────────────────────────────────────────────

    #[test]
    fn black_is_zero_lightness() {
        let black = Color::rgb8(0, 0, 0);
        assert!(approx_eq(black.l, 0.0, 1e-6), "Black L: {}", black.l);
        assert!(black.is_achromatic());
    }

    #[test]
    fn white_is_full_lightness() {
        let white = Color::rgb8(255, 255, 255);
        assert!(approx_eq(white.l, 1.0, 1e-4), "White L: {}", white.l);
        assert!(white.is_achromatic());
    }

    #[test]
    fn gray_has_no_chroma_and_zero_hue() {
        let gray = Color::rgb8(128, 128, 128);
        assert!(gray.c < ACHROMATIC_CHROMA, "Gray chroma: {}", gray.c);
        assert!(gray.h.abs() < f64::EPSILON, "Gray hue: {}", gray.h);
    }

    #[test]
    fn red_has_hue_near_29() {
        let red = Color::rgb8(255, 0, 0);
        assert!(approx_eq(red.h, 29.2, 1.0), "Red hue: {}", red.h);
        assert!(approx_eq(red.l, 0.628, 0.005), "Red L: {}", red.l);
    }

    #[test]
    fn tailwind_blue_reference_values() {
        // #3b82f6 ≈ oklch(0.623 0.188 259.8)
        let blue = Color::hex("#3b82f6").unwrap();
        assert!(approx_eq(blue.l, 0.623, 0.005), "L: {}", blue.l);
        assert!(approx_eq(blue.c, 0.188, 0.005), "C: {}", blue.c);
        assert!(approx_eq(blue.h, 259.8, 1.0), "H: {}", blue.h);
    }

    #[test]
    fn srgb_roundtrip_is_exact_in_8_bit() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (59, 130, 246), (113, 113, 122), (220, 38, 38)] {
            let back = Color::rgb8(r, g, b).to_rgb8();
            assert_eq!(back, (r, g, b), "roundtrip failed for {r},{g},{b}");
        }
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_accepts_with_and_without_hash() {
        let a = Color::hex("#71717a").unwrap();
        let b = Color::hex("71717A").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hex_rejects_short_and_alpha_forms() {
        assert!(Color::hex("#fff").is_err());
        assert!(Color::hex("#ff000080").is_err());
        assert!(Color::hex("#gg0000").is_err());
        assert!(hex_to_oklch("").is_err());
    }

    #[test]
    fn to_hex_is_lowercase() {
        assert_eq!(Color::hex("#3B82F6").unwrap().to_hex(), "#3b82f6");
    }

    // ── Sanitizing ───────────────────────────────────────────────────────

    #[test]
    fn sanitized_coalesces_nan() {
        let c = Color::oklch(f64::NAN, f64::NAN, f64::NAN).sanitized();
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn sanitized_wraps_hue_and_clamps_lightness() {
        let c = Color::oklch(1.4, 0.1, -30.0).sanitized();
        assert!(approx_eq(c.l, 1.0, 1e-12));
        assert!(approx_eq(c.h, 330.0, 1e-9));
    }

    #[test]
    fn normalize_hue_never_returns_360() {
        assert!(normalize_hue(-1e-18) < 360.0);
        assert!(approx_eq(normalize_hue(720.0), 0.0, 1e-12));
    }

    // ── Gamut mapping ────────────────────────────────────────────────────

    #[test]
    fn in_gamut_colors_unchanged() {
        let c = Color::oklch(0.65, 0.1, 260.0);
        assert!(c.in_srgb_gamut());
        assert_eq!(c.to_gamut(), c);
    }

    #[test]
    fn out_of_gamut_reduced_to_fit() {
        let c = Color::oklch(0.97, 0.3, 260.0);
        assert!(!c.in_srgb_gamut());
        let mapped = c.to_gamut();
        assert!(mapped.in_srgb_gamut());
        assert!(mapped.c < c.c);
        assert!(approx_eq(mapped.l, c.l, 1e-12), "lightness moved");
        assert!(approx_eq(mapped.h, c.h, 1e-9), "hue moved");
    }

    #[test]
    fn gamut_mapping_handles_absurd_chroma() {
        let hex = oklch_to_hex(Color::oklch(0.5, 1e9, 42.0));
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
    }

    #[test]
    fn white_and_black_survive_gamut_mapping() {
        assert_eq!(oklch_to_hex(Color::WHITE), "#ffffff");
        assert_eq!(oklch_to_hex(Color::BLACK), "#000000");
    }

    // ── Equality / formatting ────────────────────────────────────────────

    #[test]
    fn color_equality_achromatic_ignores_hue() {
        assert_eq!(Color::oklch(0.5, 0.0, 0.0), Color::oklch(0.5, 0.0, 120.0));
    }

    #[test]
    fn color_display_hex() {
        assert_eq!(format!("{}", Color::rgb8(255, 0, 0)), "#ff0000");
    }

    #[test]
    fn color_debug_format() {
        let s = format!("{:?}", Color::oklch(0.5, 0.1, 180.0));
        assert_eq!(s, "Color::oklch(0.5000, 0.1000, 180.0)");
    }
}
