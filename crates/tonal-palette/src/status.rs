//! Success, warning and error colors.
//!
//! Two sources: a fixed green/amber/red palette, or scales derived from the
//! primary's chroma at fixed hues so status colors sit at the same
//! saturation as the brand.

use serde::Serialize;
use tonal_color::Color;

use crate::scale::ColorScale;
use crate::strategy::{ColorSpaceStrategy, OklchStrategy};
use crate::weight::Weight;

/// Upper bound for derived status chroma.
pub const MAX_STATUS_CHROMA: f64 = 0.37;

/// Lower bound for the primary chroma that seeds status scales. A gray
/// primary still yields distinguishable status hues.
pub const MIN_SEED_CHROMA: f64 = 0.08;

/// OKLCH lightness of the derived status seed colors.
const SEED_LIGHTNESS: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

/// A hex value with the palette name it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub hex: &'static str,
    pub name: &'static str,
}

const fn swatch(hex: &'static str, name: &'static str) -> Swatch {
    Swatch { hex, name }
}

/// Fixed status colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSwatches {
    pub primary: Swatch,
    pub background: Swatch,
    pub foreground: Swatch,
}

impl StatusKind {
    pub const ALL: [Self; 3] = [Self::Success, Self::Warning, Self::Error];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// OKLCH hue of the derived status color.
    #[must_use]
    pub const fn hue(self) -> f64 {
        match self {
            Self::Success => 140.0,
            Self::Warning => 40.0,
            Self::Error => 15.0,
        }
    }

    /// Multiplier on the primary's chroma. Amber clips earliest, so
    /// warning gets the largest boost.
    #[must_use]
    pub const fn chroma_boost(self) -> f64 {
        match self {
            Self::Success => 1.3,
            Self::Warning => 1.6,
            Self::Error => 1.4,
        }
    }

    /// Scale weight used for `{status}-primary`.
    #[must_use]
    pub const fn primary_weight(self) -> Weight {
        match self {
            Self::Warning => Weight::W500,
            Self::Success | Self::Error => Weight::W600,
        }
    }

    /// Scale weight used for `{status}-background`.
    #[must_use]
    pub const fn background_weight(dark: bool) -> Weight {
        if dark { Weight::W900 } else { Weight::W100 }
    }

    /// Scale weight used for `{status}-foreground`.
    #[must_use]
    pub const fn foreground_weight(dark: bool) -> Weight {
        if dark { Weight::W400 } else { Weight::W600 }
    }

    /// The fixed palette for this status.
    #[must_use]
    pub const fn swatches(self, dark: bool) -> StatusSwatches {
        match (self, dark) {
            (Self::Success, false) => StatusSwatches {
                primary: swatch("#16a34a", "green-600"),
                background: swatch("#dcfce7", "green-100"),
                foreground: swatch("#16a34a", "green-600"),
            },
            (Self::Success, true) => StatusSwatches {
                primary: swatch("#16a34a", "green-600"),
                background: swatch("#064e3b", "green-900"),
                foreground: swatch("#4ade80", "green-400"),
            },
            (Self::Warning, false) => StatusSwatches {
                primary: swatch("#eab308", "amber-500"),
                background: swatch("#fef3c7", "amber-100"),
                foreground: swatch("#d97706", "amber-600"),
            },
            (Self::Warning, true) => StatusSwatches {
                primary: swatch("#eab308", "amber-500"),
                background: swatch("#451a03", "amber-900"),
                foreground: swatch("#fbbf24", "amber-400"),
            },
            (Self::Error, false) => StatusSwatches {
                primary: swatch("#dc2626", "red-600"),
                background: swatch("#fee2e2", "red-100"),
                foreground: swatch("#dc2626", "red-600"),
            },
            (Self::Error, true) => StatusSwatches {
                primary: swatch("#dc2626", "red-600"),
                background: swatch("#450a0a", "red-900"),
                foreground: swatch("#f87171", "red-400"),
            },
        }
    }
}

/// Derived status scales, one per [`StatusKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusScales {
    pub success: ColorScale,
    pub warning: ColorScale,
    pub error: ColorScale,
}

impl StatusScales {
    #[must_use]
    pub const fn get(&self, kind: StatusKind) -> &ColorScale {
        match kind {
            StatusKind::Success => &self.success,
            StatusKind::Warning => &self.warning,
            StatusKind::Error => &self.error,
        }
    }

    /// Derive status scales from a primary scale.
    ///
    /// Returns `None` if the primary scale has neither a 500 nor a 600 step.
    #[must_use]
    pub fn derive(primary: &ColorScale) -> Option<Self> {
        let chroma = seed_chroma(primary)?;
        let scale = |kind: StatusKind| {
            let seed = seed_color(kind, chroma);
            OklchStrategy.generate(&seed.to_hex(), kind.name(), true)
        };
        Some(Self {
            success: scale(StatusKind::Success)?,
            warning: scale(StatusKind::Warning)?,
            error: scale(StatusKind::Error)?,
        })
    }
}

/// Primary chroma that seeds the status colors: weight 500, else 600,
/// raised to [`MIN_SEED_CHROMA`].
#[must_use]
pub fn seed_chroma(primary: &ColorScale) -> Option<f64> {
    let entry = primary.get(Weight::W500).or_else(|| primary.get(Weight::W600))?;
    let chroma = if entry.color.c.is_finite() { entry.color.c } else { 0.0 };
    Some(chroma.max(MIN_SEED_CHROMA))
}

/// The gamut-mapped seed color for one status.
#[must_use]
pub fn seed_color(kind: StatusKind, primary_chroma: f64) -> Color {
    let chroma = (primary_chroma * kind.chroma_boost()).min(MAX_STATUS_CHROMA);
    Color::oklch(SEED_LIGHTNESS, chroma, kind.hue()).to_gamut()
}
