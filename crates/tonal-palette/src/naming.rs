//! Color-family name detection.
//!
//! Each color space has its own detector. OKLCH and LAB classify by hue
//! angle after filtering out low-chroma colors; HSL matches a table of
//! hue/saturation ranges named after familiar palette families.
//! Malformed hex input is reported as `"custom"`.

use tonal_color::hsl::Hsl;
use tonal_color::lab::Lch;
use tonal_color::Color;

/// Name returned when nothing matches.
pub const CUSTOM: &str = "custom";

/// Hue families, checked in order; bounds are inclusive.
const HUE_FAMILIES: [(&str, &[(f64, f64)]); 9] = [
    ("red", &[(0.0, 30.0), (330.0, 360.0)]),
    ("orange", &[(30.0, 60.0)]),
    ("yellow", &[(60.0, 90.0)]),
    ("green", &[(90.0, 150.0)]),
    ("teal", &[(150.0, 180.0)]),
    ("cyan", &[(180.0, 210.0)]),
    ("blue", &[(210.0, 270.0)]),
    ("purple", &[(270.0, 300.0)]),
    ("pink", &[(300.0, 330.0)]),
];

/// OKLCH chroma below which a color is called neutral or gray.
const OKLCH_NEUTRAL_CHROMA: f64 = 0.02;

/// LCh chroma below which a color is called neutral or gray.
const LAB_NEUTRAL_CHROMA: f64 = 8.0;

/// HSL family table: (name, hue range, saturation range), checked in order.
const HSL_FAMILIES: [(&str, (f64, f64), (f64, f64)); 20] = [
    ("slate", (200.0, 220.0), (0.0, 20.0)),
    ("gray", (0.0, 360.0), (0.0, 10.0)),
    ("zinc", (0.0, 360.0), (0.0, 5.0)),
    ("neutral", (0.0, 360.0), (0.0, 8.0)),
    ("stone", (20.0, 40.0), (5.0, 15.0)),
    ("sky", (190.0, 210.0), (70.0, 100.0)),
    ("blue", (210.0, 240.0), (70.0, 100.0)),
    ("indigo", (240.0, 260.0), (70.0, 100.0)),
    ("emerald", (150.0, 170.0), (70.0, 100.0)),
    ("green", (110.0, 140.0), (60.0, 100.0)),
    ("teal", (170.0, 190.0), (70.0, 100.0)),
    ("red", (0.0, 20.0), (70.0, 100.0)),
    ("rose", (340.0, 360.0), (70.0, 100.0)),
    ("pink", (320.0, 340.0), (70.0, 100.0)),
    ("yellow", (50.0, 70.0), (70.0, 100.0)),
    ("amber", (35.0, 55.0), (70.0, 100.0)),
    ("orange", (20.0, 40.0), (70.0, 100.0)),
    ("purple", (260.0, 290.0), (70.0, 100.0)),
    ("violet", (250.0, 270.0), (70.0, 100.0)),
    ("fuchsia", (290.0, 320.0), (70.0, 100.0)),
];

fn hue_family(hue: f64) -> Option<&'static str> {
    HUE_FAMILIES
        .iter()
        .find(|(_, ranges)| ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&hue)))
        .map(|&(name, _)| name)
}

/// Detect a family name from OKLCH coordinates.
#[must_use]
pub fn detect_oklch(hex: &str) -> &'static str {
    let Ok(color) = Color::hex(hex) else {
        return CUSTOM;
    };
    if color.c < OKLCH_NEUTRAL_CHROMA {
        return if color.l > 0.5 { "neutral" } else { "gray" };
    }
    hue_family(color.h).unwrap_or(CUSTOM)
}

/// Detect a family name from CIE LCh coordinates.
#[must_use]
pub fn detect_lab(hex: &str) -> &'static str {
    let Ok(lch) = Lch::from_hex(hex) else {
        return CUSTOM;
    };
    if lch.c < LAB_NEUTRAL_CHROMA {
        return if lch.l > 50.0 { "neutral" } else { "gray" };
    }
    hue_family(lch.h).unwrap_or(CUSTOM)
}

/// Detect a family name from rounded HSL values.
#[must_use]
pub fn detect_hsl(hex: &str) -> &'static str {
    let Ok(hsl) = Hsl::from_hex(hex).map(Hsl::rounded) else {
        return CUSTOM;
    };
    if hsl.s <= 10.0 {
        return if hsl.s <= 5.0 {
            "zinc"
        } else if hsl.s <= 8.0 {
            "neutral"
        } else {
            "gray"
        };
    }
    HSL_FAMILIES
        .iter()
        .find(|(_, (h_lo, h_hi), (s_lo, s_hi))| {
            (*h_lo..=*h_hi).contains(&hsl.h) && (*s_lo..=*s_hi).contains(&hsl.s)
        })
        .map_or(CUSTOM, |&(name, _, _)| name)
}
