// SPDX-License-Identifier: MIT
//
// CIELAB / CIE LCh(ab) with a D65 white point.
//
// The LAB scale strategy works in LCh: lightness 0–100, chroma in Lab
// units (up to ~130 for sRGB), hue in degrees. Gamut mapping mirrors the
// OKLCH path: hold L and h, binary-search the chroma.

use crate::color::{linear_to_srgb, normalize_hue, srgb_to_linear, to_u8};
use crate::error::ColorError;
use crate::hex::{format_hex, parse_hex};

// D65 reference white (2° observer), normalized to Y = 1.
const XN: f64 = 0.950_470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088_830;

// CIE constants: δ = 6/29.
const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

/// Chroma below which an LCh color is treated as gray.
const ACHROMATIC_CHROMA: f64 = 1e-4;

const GAMUT_EPSILON: f64 = 1e-6;

/// A color in CIE LCh(ab): lightness 0–100, chroma ≥ 0, hue in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Convert 8-bit sRGB to LCh.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let lr = srgb_to_linear(f64::from(r) / 255.0);
        let lg = srgb_to_linear(f64::from(g) / 255.0);
        let lb = srgb_to_linear(f64::from(b) / 255.0);

        let x = 0.180_437_5f64.mul_add(lb, 0.412_456_4f64.mul_add(lr, 0.357_576_1 * lg));
        let y = 0.072_175f64.mul_add(lb, 0.212_672_9f64.mul_add(lr, 0.715_152_2 * lg));
        let z = 0.950_304_1f64.mul_add(lb, 0.019_333_9f64.mul_add(lr, 0.119_192 * lg));

        let fx = lab_f(x / XN);
        let fy = lab_f(y / YN);
        let fz = lab_f(z / ZN);

        let l = 116.0f64.mul_add(fy, -16.0);
        let a = 500.0 * (fx - fy);
        let b = 200.0 * (fy - fz);

        let c = a.hypot(b);
        let h = if c < ACHROMATIC_CHROMA { 0.0 } else { normalize_hue(b.atan2(a).to_degrees()) };
        Self { l: l.max(0.0), c, h }
    }

    /// Parse a hex string into LCh.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for malformed input.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let (r, g, b) = parse_hex(hex)?;
        Ok(Self::from_rgb8(r, g, b))
    }

    /// Whether this color has no usable chroma.
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c < ACHROMATIC_CHROMA
    }

    /// Convert to gamma-encoded sRGB, unclamped (may be out of gamut).
    fn to_srgb_unclamped(self) -> (f64, f64, f64) {
        let h = self.h.to_radians();
        let a = self.c * h.cos();
        let b = self.c * h.sin();

        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + a / 500.0;
        let fz = fy - b / 200.0;

        let x = XN * lab_f_inv(fx);
        let y = YN * lab_f_inv(fy);
        let z = ZN * lab_f_inv(fz);

        let r = (-0.498_531_4f64).mul_add(z, 3.240_454_2f64.mul_add(x, -(1.537_138_5 * y)));
        let g = 0.041_556f64.mul_add(z, (-0.969_266f64).mul_add(x, 1.876_010_8 * y));
        let bl = 1.057_225_2f64.mul_add(z, 0.055_643_4f64.mul_add(x, -(0.204_025_9 * y)));

        (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(bl))
    }

    /// Whether this color is within the sRGB gamut.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = self.to_srgb_unclamped();
        let range = -GAMUT_EPSILON..=1.0 + GAMUT_EPSILON;
        range.contains(&r) && range.contains(&g) && range.contains(&b)
    }

    /// Reduce chroma (holding L and h) until the color fits in sRGB.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let base = Self {
            l: finite(self.l).clamp(0.0, 100.0),
            c: finite(self.c).clamp(0.0, 150.0),
            h: normalize_hue(finite(self.h)),
        };
        if base.in_srgb_gamut() {
            return base;
        }

        let mut lo: f64 = 0.0;
        let mut hi: f64 = base.c;
        for _ in 0..24 {
            let mid = (lo + hi) * 0.5;
            let candidate = Self { c: mid, ..base };
            if candidate.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Self { c: lo, ..base }
    }

    /// Convert to 8-bit sRGB after gamut mapping.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_gamut().to_srgb_unclamped();
        (to_u8(r.clamp(0.0, 1.0)), to_u8(g.clamp(0.0, 1.0)), to_u8(b.clamp(0.0, 1.0)))
    }

    /// Convert to a lowercase `#rrggbb` string after gamut mapping.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format_hex(r, g, b)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}
