//! Generation options: which color space builds the scales, how lightness
//! is distributed, and how interactive and status colors are chosen.
//!
//! Every field has a serde default so a partial TOML table (or none at all)
//! deserializes into a working configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PaletteError;
use crate::weight::Weight;

/// Color space used to build a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpaceMethod {
    Hsl,
    Lab,
    #[default]
    Oklch,
}

impl ColorSpaceMethod {
    pub const ALL: [Self; 3] = [Self::Hsl, Self::Lab, Self::Oklch];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hsl => "hsl",
            Self::Lab => "lab",
            Self::Oklch => "oklch",
        }
    }
}

impl fmt::Display for ColorSpaceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpaceMethod {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| PaletteError::UnknownMethod(s.to_string()))
    }
}

/// How the `interactive-primary` color is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractiveColorMode {
    /// Use the configured weight of the primary scale.
    #[default]
    Optimized,
    /// Use the scale step that holds the user's own primary hex.
    Exact,
}

impl InteractiveColorMode {
    pub const ALL: [Self; 2] = [Self::Optimized, Self::Exact];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Optimized => "optimized",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for InteractiveColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InteractiveColorMode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| PaletteError::UnknownInteractiveMode(s.to_string()))
    }
}

/// Default weight of the primary scale used for `interactive-primary`.
pub const DEFAULT_INTERACTIVE_WEIGHT: u16 = 600;

/// Allowed range for the interactive weight.
pub const INTERACTIVE_WEIGHT_RANGE: (u16, u16) = (400, 700);

/// Options steering scale generation and token derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Use the fixed lightness curve instead of placing the base color at
    /// its nearest weight.
    pub use_fixed_contrast_curve: bool,
    pub color_space_method: ColorSpaceMethod,
    /// Derive status colors from the primary's chroma instead of the fixed
    /// green/amber/red constants.
    pub dynamic_status_chroma: bool,
    pub interactive_color_mode: InteractiveColorMode,
    /// Primary weight for interactive colors in optimized mode. Clamped to
    /// 400–700 and snapped to the nearest canonical weight.
    pub interactive_weight: u16,
    /// Replace empty or `"auto"` color names with detected ones.
    pub auto_detect_names: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            use_fixed_contrast_curve: false,
            color_space_method: ColorSpaceMethod::default(),
            dynamic_status_chroma: false,
            interactive_color_mode: InteractiveColorMode::default(),
            interactive_weight: DEFAULT_INTERACTIVE_WEIGHT,
            auto_detect_names: false,
        }
    }
}

impl GenerationOptions {
    /// The interactive weight clamped to 400–700 and snapped to a weight.
    #[must_use]
    pub fn safe_interactive_weight(&self) -> Weight {
        let (lo, hi) = INTERACTIVE_WEIGHT_RANGE;
        let clamped = self.interactive_weight.clamp(lo, hi);
        let snapped = (clamped + 50) / 100 * 100;
        Weight::from_value(snapped).unwrap_or(Weight::W600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = GenerationOptions::default();
        assert!(!opts.use_fixed_contrast_curve);
        assert_eq!(opts.color_space_method, ColorSpaceMethod::Oklch);
        assert_eq!(opts.interactive_color_mode, InteractiveColorMode::Optimized);
        assert_eq!(opts.interactive_weight, 600);
        assert!(!opts.dynamic_status_chroma);
        assert!(!opts.auto_detect_names);
    }

    #[test]
    fn interactive_weight_is_clamped() {
        let weight = |w| GenerationOptions { interactive_weight: w, ..Default::default() }
            .safe_interactive_weight();
        assert_eq!(weight(600), Weight::W600);
        assert_eq!(weight(950), Weight::W700);
        assert_eq!(weight(50), Weight::W400);
        assert_eq!(weight(0), Weight::W400);
        assert_eq!(weight(549), Weight::W500);
        assert_eq!(weight(550), Weight::W600);
    }

    #[test]
    fn method_parsing() {
        assert_eq!("LAB".parse::<ColorSpaceMethod>().unwrap(), ColorSpaceMethod::Lab);
        assert_eq!("oklch".parse::<ColorSpaceMethod>().unwrap(), ColorSpaceMethod::Oklch);
        let err = "cmyk".parse::<ColorSpaceMethod>().unwrap_err();
        assert!(matches!(err, PaletteError::UnknownMethod(ref s) if s == "cmyk"));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("exact".parse::<InteractiveColorMode>().unwrap(), InteractiveColorMode::Exact);
        assert!("random".parse::<InteractiveColorMode>().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let opts: GenerationOptions =
            serde_json::from_str(r#"{"color_space_method":"hsl","interactive_weight":500}"#).unwrap();
        assert_eq!(opts.color_space_method, ColorSpaceMethod::Hsl);
        assert_eq!(opts.interactive_weight, 500);
        assert!(!opts.use_fixed_contrast_curve);
    }

    #[test]
    fn display_matches_serde_names() {
        for m in ColorSpaceMethod::ALL {
            assert_eq!(serde_json::to_string(&m).unwrap(), format!("\"{m}\""));
        }
        for m in InteractiveColorMode::ALL {
            assert_eq!(serde_json::to_string(&m).unwrap(), format!("\"{m}\""));
        }
    }
}
