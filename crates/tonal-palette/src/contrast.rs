//! WCAG 2 contrast between colors and scale steps.
//!
//! Luminance and ratio follow the WCAG 2.0 definitions (including the
//! 0.03928 linearization threshold). Only the normal-text thresholds are
//! used:
//!
//! - AA: contrast ratio >= 4.5:1
//! - AAA: contrast ratio >= 7:1

use std::collections::BTreeMap;

use serde::Serialize;
use tonal_color::hex::{hex_eq, hex_to_rgb};

use crate::scale::ColorScale;
use crate::weight::Weight;

/// WCAG AA threshold for normal text.
pub const AA: f64 = 4.5;

/// WCAG AAA threshold for normal text.
pub const AAA: f64 = 7.0;

const WHITE: (u8, u8, u8) = (255, 255, 255);
const BLACK: (u8, u8, u8) = (0, 0, 0);

/// Linearize one gamma-encoded 8-bit channel.
fn linear_channel(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

/// Relative luminance of an 8-bit sRGB color, in [0.0, 1.0].
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126f64.mul_add(linear_channel(r), 0.7152f64.mul_add(linear_channel(g), 0.0722 * linear_channel(b)))
}

/// WCAG contrast ratio between two 8-bit colors, in [1.0, 21.0].
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`, symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: (u8, u8, u8), b: (u8, u8, u8)) -> f64 {
    let la = luminance(a.0, a.1, a.2);
    let lb = luminance(b.0, b.1, b.2);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex colors; `None` if either is malformed.
#[must_use]
pub fn contrast_ratio_hex(a: &str, b: &str) -> Option<f64> {
    Some(contrast_ratio(hex_to_rgb(a)?, hex_to_rgb(b)?))
}

/// A scale step that reads well against a reference color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyMatch {
    pub weight: Weight,
    pub hex: String,
    pub ratio: f64,
    pub passes_aa: bool,
    pub passes_aaa: bool,
}

/// The most readable partner for a color: a family step if one passes AA,
/// otherwise white or black, whichever contrasts more.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BestContrast {
    Family(FamilyMatch),
    White { ratio: f64 },
    Black { ratio: f64 },
}

impl BestContrast {
    #[must_use]
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Family(m) => m.ratio,
            Self::White { ratio } | Self::Black { ratio } => *ratio,
        }
    }

    /// Hex of the partner color.
    #[must_use]
    pub fn hex(&self) -> &str {
        match self {
            Self::Family(m) => &m.hex,
            Self::White { .. } => "#ffffff",
            Self::Black { .. } => "#000000",
        }
    }
}

/// Full contrast report for one color against white, black and a scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastResult {
    pub ratio_vs_white: f64,
    pub ratio_vs_black: f64,
    /// Passes AA against white or black.
    pub passes_aa: bool,
    /// Passes AAA against white or black.
    pub passes_aaa: bool,
    pub aa_on_white: bool,
    pub aa_on_black: bool,
    pub aaa_on_white: bool,
    pub aaa_on_black: bool,
    /// Scale steps that differ from the color and pass AA against it.
    pub best_family_matches: BTreeMap<Weight, FamilyMatch>,
}

/// Every step of `scale` that differs from `hex` and passes AA against it.
///
/// Steps with malformed hex strings are skipped. Returns `None` if `hex`
/// itself is malformed.
#[must_use]
pub fn family_matches(hex: &str, scale: &ColorScale) -> Option<BTreeMap<Weight, FamilyMatch>> {
    let rgb = hex_to_rgb(hex)?;
    let matches = scale
        .iter()
        .filter(|entry| !hex_eq(&entry.hex, hex))
        .filter_map(|entry| {
            let ratio = contrast_ratio(rgb, hex_to_rgb(&entry.hex)?);
            (ratio >= AA).then(|| {
                (entry.weight, FamilyMatch {
                    weight: entry.weight,
                    hex: entry.hex.clone(),
                    ratio,
                    passes_aa: true,
                    passes_aaa: ratio >= AAA,
                })
            })
        })
        .collect();
    Some(matches)
}

/// The family step with the highest contrast against `hex` among those
/// passing AA. Ties go to the lighter weight.
#[must_use]
pub fn best_family_match(hex: &str, scale: &ColorScale) -> Option<FamilyMatch> {
    family_matches(hex, scale)?
        .into_values()
        .fold(None, |best: Option<FamilyMatch>, m| match best {
            Some(b) if b.ratio >= m.ratio => Some(b),
            _ => Some(m),
        })
}

/// The most readable partner for `hex`, falling back to white or black
/// when no family step passes AA. `None` if `hex` is malformed.
#[must_use]
pub fn best_contrast(hex: &str, scale: &ColorScale) -> Option<BestContrast> {
    let rgb = hex_to_rgb(hex)?;
    if let Some(m) = best_family_match(hex, scale) {
        return Some(BestContrast::Family(m));
    }
    let white = contrast_ratio(rgb, WHITE);
    let black = contrast_ratio(rgb, BLACK);
    Some(if white >= black {
        BestContrast::White { ratio: white }
    } else {
        BestContrast::Black { ratio: black }
    })
}

/// Contrast report for `hex`. `None` if `hex` is malformed.
#[must_use]
pub fn analyze(hex: &str, scale: &ColorScale) -> Option<ContrastResult> {
    let rgb = hex_to_rgb(hex)?;
    let ratio_vs_white = contrast_ratio(rgb, WHITE);
    let ratio_vs_black = contrast_ratio(rgb, BLACK);
    let aa_on_white = ratio_vs_white >= AA;
    let aa_on_black = ratio_vs_black >= AA;
    let aaa_on_white = ratio_vs_white >= AAA;
    let aaa_on_black = ratio_vs_black >= AAA;
    Some(ContrastResult {
        ratio_vs_white,
        ratio_vs_black,
        passes_aa: aa_on_white || aa_on_black,
        passes_aaa: aaa_on_white || aaa_on_black,
        aa_on_white,
        aa_on_black,
        aaa_on_white,
        aaa_on_black,
        best_family_matches: family_matches(hex, scale)?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GenerationOptions;
    use crate::scale::{generate, ScaleEntry};
    use tonal_color::Color;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn zinc() -> ColorScale {
        generate("#71717a", "zinc", &GenerationOptions::default()).unwrap()
    }

    // ── Luminance ──

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(luminance(0, 0, 0), 0.0, 1e-12));
        assert!(approx_eq(luminance(255, 255, 255), 1.0, 1e-12));
    }

    #[test]
    fn luminance_weights_green_highest() {
        let r = luminance(255, 0, 0);
        let g = luminance(0, 255, 0);
        let b = luminance(0, 0, 255);
        assert!(approx_eq(r, 0.2126, 1e-9));
        assert!(approx_eq(g, 0.7152, 1e-9));
        assert!(approx_eq(b, 0.0722, 1e-9));
    }

    // ── Ratio ──

    #[test]
    fn black_on_white_is_21() {
        assert!(approx_eq(contrast_ratio(BLACK, WHITE), 21.0, 1e-9));
    }

    #[test]
    fn same_color_is_1() {
        assert!(approx_eq(contrast_ratio((59, 130, 246), (59, 130, 246)), 1.0, 1e-12));
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = (113, 113, 122);
        let b = (250, 250, 250);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
    }

    #[test]
    fn known_ratio() {
        // #767676 on white is the classic 4.54:1 AA boundary gray.
        let ratio = contrast_ratio_hex("#767676", "#ffffff").unwrap();
        assert!(approx_eq(ratio, 4.54, 0.01), "ratio: {ratio}");
        assert!(contrast_ratio_hex("#767676", "bad").is_none());
    }

    // ── Family matches ──

    #[test]
    fn best_family_match_passes_aa() {
        let scale = zinc();
        let m = best_family_match("#71717a", &scale).unwrap();
        assert!(m.ratio >= AA);
        assert!(!hex_eq(&m.hex, "#71717a"));
        // Only the lightest step clears AA against the mid-gray base.
        assert_eq!(m.weight, Weight::W50);
    }

    #[test]
    fn matches_exclude_the_input_color() {
        let scale = ColorScale::from_entries([
            ScaleEntry::new(Weight::W50, "#FFFFFF".into(), "x", Color::WHITE),
            ScaleEntry::new(Weight::W950, "#000000".into(), "x", Color::BLACK),
        ]);
        let matches = family_matches("#ffffff", &scale).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&Weight::W950));
        assert!(matches[&Weight::W950].passes_aaa);
    }

    #[test]
    fn no_family_match_falls_back_to_black_or_white() {
        let scale = ColorScale::from_entries([ScaleEntry::new(
            Weight::W500,
            "#777777".into(),
            "x",
            Color::hex("#777777").unwrap(),
        )]);
        assert!(best_family_match("#787878", &scale).is_none());

        let best = best_contrast("#787878", &scale).unwrap();
        assert!(matches!(best, BestContrast::Black { .. }), "{best:?}");
        assert_eq!(best.hex(), "#000000");

        let best = best_contrast("#1e1e1e", &scale).unwrap();
        assert!(matches!(best, BestContrast::White { .. }));
    }

    #[test]
    fn invalid_input_is_none() {
        assert!(best_family_match("nope", &zinc()).is_none());
        assert!(best_contrast("nope", &zinc()).is_none());
        assert!(analyze("nope", &zinc()).is_none());
    }

    // ── Analysis ──

    #[test]
    fn analyze_blue() {
        let result = analyze("#3b82f6", &zinc()).unwrap();
        // #3b82f6 on white ≈ 3.68, on black ≈ 5.71.
        assert!(approx_eq(result.ratio_vs_white, 3.68, 0.02), "{}", result.ratio_vs_white);
        assert!(approx_eq(result.ratio_vs_black, 5.71, 0.02), "{}", result.ratio_vs_black);
        assert!(!result.aa_on_white);
        assert!(result.aa_on_black);
        assert!(result.passes_aa);
        assert!(!result.passes_aaa);
        assert!(result.best_family_matches.values().all(|m| m.ratio >= AA));
    }
}
