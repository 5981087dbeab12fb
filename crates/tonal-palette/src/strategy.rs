//! Scale-building strategies, one per color space.
//!
//! Every strategy follows the same recipe:
//!
//! 1. Read the base color's lightness, chroma and hue in its own space.
//! 2. Pick the lightness target for each weight from a fixed curve.
//! 3. Unless the fixed curve is forced, put the base color itself at the
//!    weight whose target is nearest its lightness.
//! 4. Attenuate chroma toward the light and dark ends so tints and shades
//!    stay in gamut and don't look neon.
//!
//! The strategies differ in their curve and attenuation constants and in
//! how they detect a family name.

use tonal_color::hex::{format_hex, with_hash};
use tonal_color::hsl::Hsl;
use tonal_color::lab::Lch;
use tonal_color::Color;

use crate::naming;
use crate::options::ColorSpaceMethod;
use crate::scale::{nearest_weight, ColorScale, ScaleEntry};
use crate::weight::Weight;

/// Builds scales and names colors in one color space.
pub trait ColorSpaceStrategy: Sync {
    fn method(&self) -> ColorSpaceMethod;

    /// Build an eleven-step scale from `base_hex`.
    ///
    /// With `fixed_curve` every step takes its lightness from the curve;
    /// otherwise the base color is placed verbatim at its nearest weight.
    /// Returns `None` if `base_hex` is not a valid hex color.
    fn generate(&self, base_hex: &str, family: &str, fixed_curve: bool) -> Option<ColorScale>;

    /// Detect a family name for `hex`.
    fn detect_name(&self, hex: &str) -> &'static str;
}

impl ColorSpaceMethod {
    /// The strategy implementing this method.
    #[must_use]
    pub fn strategy(self) -> &'static dyn ColorSpaceStrategy {
        match self {
            Self::Oklch => &OklchStrategy,
            Self::Lab => &LabStrategy,
            Self::Hsl => &HslStrategy,
        }
    }

    /// Detect a family name using this method's detector.
    #[must_use]
    pub fn detect_name(self, hex: &str) -> &'static str {
        self.strategy().detect_name(hex)
    }
}

/// Chroma multipliers applied at the light and dark ends of a scale.
struct Attenuation {
    /// Above this lightness: `max(c * light_factor, floor)`.
    light: f64,
    light_factor: f64,
    floor: f64,
    /// Above this lightness (and not above `light`): `c * mid_factor`.
    mid: f64,
    mid_factor: f64,
    /// Below this lightness: `c * dark_factor`.
    dark: f64,
    dark_factor: f64,
}

impl Attenuation {
    /// Attenuated chroma at `lightness`. A gray base stays gray: the floor
    /// only lifts colors that had chroma to begin with.
    fn apply(&self, chroma: f64, lightness: f64) -> f64 {
        if chroma <= 0.0 {
            return 0.0;
        }
        if lightness > self.light {
            (chroma * self.light_factor).max(self.floor)
        } else if lightness > self.mid {
            chroma * self.mid_factor
        } else if lightness < self.dark {
            chroma * self.dark_factor
        } else {
            chroma
        }
    }
}

// ---------------------------------------------------------------------------
// OKLCH
// ---------------------------------------------------------------------------

/// OKLCH lightness per weight.
pub const OKLCH_CURVE: [f64; 11] = [0.99, 0.97, 0.93, 0.87, 0.77, 0.65, 0.53, 0.42, 0.31, 0.22, 0.15];

const OKLCH_SMART: Attenuation = Attenuation {
    light: 0.85,
    light_factor: 0.4,
    floor: 0.015,
    mid: 0.7,
    mid_factor: 0.8,
    dark: 0.2,
    dark_factor: 0.7,
};

const OKLCH_FIXED: Attenuation = Attenuation {
    light: 0.85,
    light_factor: 0.3,
    floor: 0.02,
    mid: 0.7,
    mid_factor: 0.7,
    dark: 0.25,
    dark_factor: 0.8,
};

/// Perceptually uniform scales in OKLCH. The default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OklchStrategy;

impl ColorSpaceStrategy for OklchStrategy {
    fn method(&self) -> ColorSpaceMethod {
        ColorSpaceMethod::Oklch
    }

    fn generate(&self, base_hex: &str, family: &str, fixed_curve: bool) -> Option<ColorScale> {
        let exact_hex = with_hash(base_hex).ok()?;
        let base = Color::hex(base_hex).ok()?.sanitized();
        let (chroma, hue) = if base.is_achromatic() { (0.0, 0.0) } else { (base.c, base.h) };
        let anchor = (!fixed_curve).then(|| nearest_weight(&OKLCH_CURVE, base.l));
        let attenuation = if fixed_curve { &OKLCH_FIXED } else { &OKLCH_SMART };

        let entries = Weight::ALL.into_iter().map(|weight| {
            if anchor == Some(weight) {
                return ScaleEntry::new(weight, exact_hex.clone(), family, Color::oklch(base.l, chroma, hue));
            }
            let lightness = weight.target_lightness();
            let color = Color::oklch(lightness, attenuation.apply(chroma, lightness), hue).to_gamut();
            ScaleEntry::new(weight, color.to_hex(), family, color)
        });
        Some(ColorScale::from_entries(entries))
    }

    fn detect_name(&self, hex: &str) -> &'static str {
        naming::detect_oklch(hex)
    }
}

// ---------------------------------------------------------------------------
// LAB
// ---------------------------------------------------------------------------

/// CIE LCh lightness per weight.
pub const LAB_CURVE: [f64; 11] = [97.0, 94.0, 88.0, 78.0, 65.0, 52.0, 42.0, 32.0, 22.0, 14.0, 8.0];

const LAB_SMART: Attenuation = Attenuation {
    light: 85.0,
    light_factor: 0.4,
    floor: 6.0,
    mid: 70.0,
    mid_factor: 0.8,
    dark: 20.0,
    dark_factor: 0.7,
};

const LAB_FIXED: Attenuation = Attenuation {
    light: 85.0,
    light_factor: 0.3,
    floor: 8.0,
    mid: 70.0,
    mid_factor: 0.7,
    dark: 25.0,
    dark_factor: 0.8,
};

/// Scales in CIE LCh (D65).
#[derive(Debug, Clone, Copy, Default)]
pub struct LabStrategy;

impl ColorSpaceStrategy for LabStrategy {
    fn method(&self) -> ColorSpaceMethod {
        ColorSpaceMethod::Lab
    }

    fn generate(&self, base_hex: &str, family: &str, fixed_curve: bool) -> Option<ColorScale> {
        let exact_hex = with_hash(base_hex).ok()?;
        let base = Lch::from_hex(base_hex).ok()?;
        let (chroma, hue) = if base.is_achromatic() { (0.0, 0.0) } else { (base.c, base.h) };
        let anchor = (!fixed_curve).then(|| nearest_weight(&LAB_CURVE, base.l));
        let attenuation = if fixed_curve { &LAB_FIXED } else { &LAB_SMART };

        let entries = Weight::ALL.into_iter().map(|weight| {
            if anchor == Some(weight) {
                let color = Color::hex(&exact_hex).unwrap_or_default();
                return ScaleEntry::new(weight, exact_hex.clone(), family, color);
            }
            let lightness = LAB_CURVE[weight.index()];
            let (r, g, b) = Lch::new(lightness, attenuation.apply(chroma, lightness), hue).to_rgb8();
            ScaleEntry::new(weight, format_hex(r, g, b), family, Color::rgb8(r, g, b))
        });
        Some(ColorScale::from_entries(entries))
    }

    fn detect_name(&self, hex: &str) -> &'static str {
        naming::detect_lab(hex)
    }
}

// ---------------------------------------------------------------------------
// HSL
// ---------------------------------------------------------------------------

/// HSL lightness (percent) per weight.
pub const HSL_CURVE: [f64; 11] = [98.0, 96.0, 91.0, 84.0, 68.0, 50.0, 43.0, 35.0, 27.0, 16.0, 8.0];

/// Saturation at or below which the base is treated as a neutral.
const HSL_NEUTRAL_SATURATION: f64 = 15.0;

/// Lightness bounds for synthesized HSL steps.
const HSL_LIGHTNESS_RANGE: (f64, f64) = (5.0, 98.0);

/// Classic HSL scales: constant hue and saturation, lightness from the
/// curve. Neutrals lose saturation toward the light end.
#[derive(Debug, Clone, Copy, Default)]
pub struct HslStrategy;

impl HslStrategy {
    fn saturation(base_saturation: f64, neutral: bool, weight: Weight) -> f64 {
        if !neutral {
            return base_saturation;
        }
        match weight.value() {
            ..=200 => base_saturation * 0.3,
            ..=400 => base_saturation * 0.7,
            _ => base_saturation,
        }
    }
}

impl ColorSpaceStrategy for HslStrategy {
    fn method(&self) -> ColorSpaceMethod {
        ColorSpaceMethod::Hsl
    }

    fn generate(&self, base_hex: &str, family: &str, fixed_curve: bool) -> Option<ColorScale> {
        let exact_hex = with_hash(base_hex).ok()?;
        let base = Hsl::from_hex(base_hex).ok()?.rounded();
        let neutral = base.s <= HSL_NEUTRAL_SATURATION;
        let anchor = (!fixed_curve).then(|| nearest_weight(&HSL_CURVE, base.l));
        let (lo, hi) = HSL_LIGHTNESS_RANGE;

        let entries = Weight::ALL.into_iter().map(|weight| {
            let hex = if anchor == Some(weight) {
                exact_hex.clone()
            } else {
                let lightness = HSL_CURVE[weight.index()].clamp(lo, hi);
                Hsl::new(base.h, Self::saturation(base.s, neutral, weight), lightness).to_hex()
            };
            let color = Color::hex(&hex).unwrap_or_default();
            ScaleEntry::new(weight, hex, family, color)
        });
        Some(ColorScale::from_entries(entries))
    }

    fn detect_name(&self, hex: &str) -> &'static str {
        naming::detect_hsl(hex)
    }
}
