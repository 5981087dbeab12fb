//! Color scales: eleven perceptually ordered steps built from one base hex.
//!
//! A [`ColorScale`] maps each [`Weight`] to a [`ScaleEntry`]. Generated
//! scales are always complete; scales read back from serialized data may
//! be partial, which is why lookups return `Option`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tonal_color::hex::{hex_eq, is_valid_hex};
use tonal_color::Color;

use crate::options::GenerationOptions;
use crate::weight::Weight;

/// One step of a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry {
    pub weight: Weight,
    /// `#rrggbb`. Lowercase for synthesized steps; the user's own string
    /// at the weight that holds the base color.
    pub hex: String,
    /// Display name, e.g. `"Blue 600"`.
    pub name: String,
    /// OKLCH coordinates of the step.
    pub color: Color,
}

impl ScaleEntry {
    #[must_use]
    pub fn new(weight: Weight, hex: String, family: &str, color: Color) -> Self {
        Self { weight, hex, name: display_name(family, weight), color }
    }
}

/// A weight-indexed color scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorScale {
    entries: BTreeMap<Weight, ScaleEntry>,
}

impl ColorScale {
    /// Build a scale from entries; later entries win on duplicate weights.
    pub fn from_entries(entries: impl IntoIterator<Item = ScaleEntry>) -> Self {
        Self { entries: entries.into_iter().map(|e| (e.weight, e)).collect() }
    }

    #[must_use]
    pub fn get(&self, weight: Weight) -> Option<&ScaleEntry> {
        self.entries.get(&weight)
    }

    /// Hex string at `weight`.
    #[must_use]
    pub fn hex(&self, weight: Weight) -> Option<&str> {
        self.get(weight).map(|e| e.hex.as_str())
    }

    /// Entries from lightest to darkest.
    pub fn iter(&self) -> impl Iterator<Item = &ScaleEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every canonical weight is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Weight::ALL.iter().all(|w| self.entries.contains_key(w))
    }

    /// The first weight whose hex equals `hex`, ignoring case and `#`.
    #[must_use]
    pub fn weight_of(&self, hex: &str) -> Option<Weight> {
        self.iter().find(|e| hex_eq(&e.hex, hex)).map(|e| e.weight)
    }

    /// Whether any step carries `hex`, ignoring case and `#`.
    #[must_use]
    pub fn contains_hex(&self, hex: &str) -> bool {
        self.weight_of(hex).is_some()
    }
}

/// Build an eleven-step scale for `base_hex` with the configured strategy.
///
/// Returns `None` (and logs an error) if `base_hex` is not a valid hex
/// color.
#[must_use]
pub fn generate(base_hex: &str, family: &str, options: &GenerationOptions) -> Option<ColorScale> {
    if !is_valid_hex(base_hex) {
        tracing::error!(hex = base_hex, family, "invalid base color, no scale generated");
        return None;
    }
    options.color_space_method.strategy().generate(
        base_hex,
        family,
        options.use_fixed_contrast_curve,
    )
}

/// Weight whose curve lightness is nearest to `lightness`.
///
/// Weights are scanned from light to dark and only a strictly smaller
/// distance replaces the current pick, so ties go to the lighter weight.
#[must_use]
pub fn nearest_weight(curve: &[f64; 11], lightness: f64) -> Weight {
    let mut best = Weight::W50;
    let mut best_distance = f64::INFINITY;
    for weight in Weight::ALL {
        let distance = (curve[weight.index()] - lightness).abs();
        if distance < best_distance {
            best = weight;
            best_distance = distance;
        }
    }
    best
}

/// `"blue"` → `"Blue"`.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

fn display_name(family: &str, weight: Weight) -> String {
    format!("{} {weight}", capitalize(family))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options::ColorSpaceMethod;

    // ── Lookup ──

    fn sample() -> ColorScale {
        ColorScale::from_entries([
            ScaleEntry::new(Weight::W50, "#eff6ff".into(), "blue", Color::oklch(0.97, 0.01, 255.0)),
            ScaleEntry::new(Weight::W500, "#3B82F6".into(), "blue", Color::oklch(0.62, 0.19, 260.0)),
        ])
    }

    #[test]
    fn partial_scale_lookups() {
        let scale = sample();
        assert_eq!(scale.len(), 2);
        assert!(!scale.is_complete());
        assert_eq!(scale.hex(Weight::W50), Some("#eff6ff"));
        assert!(scale.get(Weight::W600).is_none());
    }

    #[test]
    fn weight_of_ignores_case_and_hash() {
        let scale = sample();
        assert_eq!(scale.weight_of("3b82f6"), Some(Weight::W500));
        assert_eq!(scale.weight_of("#EFF6FF"), Some(Weight::W50));
        assert_eq!(scale.weight_of("#000000"), None);
    }

    #[test]
    fn entry_names() {
        let scale = sample();
        assert_eq!(scale.get(Weight::W500).unwrap().name, "Blue 500");
        assert_eq!(capitalize("zinc"), "Zinc");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn iterates_light_to_dark() {
        let weights: Vec<Weight> = sample().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![Weight::W50, Weight::W500]);
    }

    // ── Nearest weight ──

    #[test]
    fn nearest_weight_prefers_lighter_on_tie() {
        let curve = [0.99, 0.97, 0.93, 0.87, 0.77, 0.65, 0.53, 0.42, 0.31, 0.22, 0.15];
        assert_eq!(nearest_weight(&curve, 0.65), Weight::W500);
        assert_eq!(nearest_weight(&curve, 0.98), Weight::W50);
        assert_eq!(nearest_weight(&curve, 0.0), Weight::W950);
        assert_eq!(nearest_weight(&curve, 1.0), Weight::W50);
        assert_eq!(nearest_weight(&curve, 0.60), Weight::W500);
        // Exact midpoint between 200 and 300 (binary-exact values).
        let halves = [1.0, 0.75, 0.5, 0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(nearest_weight(&halves, 0.625), Weight::W100);
    }

    // ── Dispatch ──

    #[test]
    fn generate_rejects_invalid_hex() {
        let opts = GenerationOptions::default();
        assert!(generate("not-a-color", "blue", &opts).is_none());
        assert!(generate("#12345", "blue", &opts).is_none());
    }

    #[test]
    fn generate_complete_for_every_method() {
        for method in ColorSpaceMethod::ALL {
            for fixed in [false, true] {
                let opts = GenerationOptions {
                    color_space_method: method,
                    use_fixed_contrast_curve: fixed,
                    ..Default::default()
                };
                let scale = generate("#3b82f6", "blue", &opts).unwrap();
                assert!(scale.is_complete(), "{method} fixed={fixed}");
            }
        }
    }

    #[test]
    fn serializes_keyed_by_weight() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["500"]["hex"], "#3B82F6");
        assert_eq!(json["50"]["name"], "Blue 50");
        let back: ColorScale = serde_json::from_value(json).unwrap();
        assert_eq!(back.len(), 2);
    }
}
