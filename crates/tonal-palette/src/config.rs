//! System configuration: the two base colors plus generation options.
//!
//! Loaded from TOML:
//!
//! ```toml
//! [neutral]
//! name = "zinc"
//! hex = "#71717a"
//!
//! [primary]
//! name = "blue"
//! hex = "#3b82f6"
//!
//! [options]
//! color_space_method = "oklch"
//! interactive_color_mode = "exact"
//! ```
//!
//! Any missing table or key falls back to the default preset.

use serde::{Deserialize, Serialize};
use tonal_color::hex::{is_valid_hex, with_hash};

use crate::error::PaletteError;
use crate::options::GenerationOptions;

/// Name that asks for the family name to be detected from the hex.
pub const AUTO_NAME: &str = "auto";

/// One base color and its family name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseColorSpec {
    pub name: String,
    pub hex: String,
}

impl BaseColorSpec {
    /// Build a spec, normalizing the hex to carry a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Color`] if `hex` is not a six-digit hex color.
    pub fn new(name: impl Into<String>, hex: &str) -> Result<Self, PaletteError> {
        Ok(Self { name: name.into(), hex: with_hash(hex)? })
    }

    /// Whether the name should be replaced by a detected one.
    #[must_use]
    pub fn wants_detected_name(&self) -> bool {
        let name = self.name.trim();
        name.is_empty() || name.eq_ignore_ascii_case(AUTO_NAME)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_hex(&self.hex)
    }
}

/// Everything needed to generate a color system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub neutral: BaseColorSpec,
    pub primary: BaseColorSpec,
    pub options: GenerationOptions,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            neutral: BaseColorSpec { name: "zinc".into(), hex: "#71717a".into() },
            primary: BaseColorSpec { name: "blue".into(), hex: "#3b82f6".into() },
            options: GenerationOptions::default(),
        }
    }
}

impl SystemConfig {
    /// Parse a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Config`] for malformed TOML or unknown enum
    /// values. Hex strings are validated later, at generation time.
    pub fn from_toml_str(s: &str) -> Result<Self, PaletteError> {
        Ok(toml::from_str(s)?)
    }

    /// Layer a TOML document over this configuration. Keys present in `s`
    /// win; everything else keeps its current value.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Config`] for malformed TOML or values that
    /// don't fit the schema.
    pub fn overlay_toml_str(&self, s: &str) -> Result<Self, PaletteError> {
        let overlay: toml::Table = toml::from_str(s)?;
        let mut base = toml::Value::try_from(self)?;
        if let toml::Value::Table(table) = &mut base {
            merge_tables(table, overlay);
        }
        Ok(base.try_into()?)
    }

    /// Render as TOML, in the same shape [`SystemConfig::from_toml_str`] reads.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ConfigSerialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, PaletteError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replace both base colors under the generic names `neutral` and
    /// `primary`. Name detection is switched off; the other options are kept.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Color`] if either hex is malformed.
    pub fn with_custom_colors(&self, neutral_hex: &str, primary_hex: &str) -> Result<Self, PaletteError> {
        Ok(Self {
            neutral: BaseColorSpec::new("neutral", neutral_hex)?,
            primary: BaseColorSpec::new("primary", primary_hex)?,
            options: GenerationOptions { auto_detect_names: false, ..self.options.clone() },
        })
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(inner) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, inner);
                continue;
            }
            base.insert(key, toml::Value::Table(inner));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options::{ColorSpaceMethod, InteractiveColorMode};

    #[test]
    fn parse_full_config() {
        let config = SystemConfig::from_toml_str(
            r##"
            [neutral]
            name = "slate"
            hex = "#64748b"

            [primary]
            name = "indigo"
            hex = "#6366f1"

            [options]
            use_fixed_contrast_curve = true
            color_space_method = "lab"
            interactive_color_mode = "exact"
            interactive_weight = 500
            "##,
        )
        .unwrap();
        assert_eq!(config.neutral, BaseColorSpec { name: "slate".into(), hex: "#64748b".into() });
        assert_eq!(config.primary.name, "indigo");
        assert!(config.options.use_fixed_contrast_curve);
        assert_eq!(config.options.color_space_method, ColorSpaceMethod::Lab);
        assert_eq!(config.options.interactive_color_mode, InteractiveColorMode::Exact);
        assert_eq!(config.options.interactive_weight, 500);
        assert!(!config.options.dynamic_status_chroma);
    }

    #[test]
    fn missing_tables_use_defaults() {
        let config = SystemConfig::from_toml_str("[options]\ndynamic_status_chroma = true\n").unwrap();
        assert_eq!(config.neutral, SystemConfig::default().neutral);
        assert_eq!(config.primary.hex, "#3b82f6");
        assert!(config.options.dynamic_status_chroma);
        assert_eq!(SystemConfig::from_toml_str("").unwrap(), SystemConfig::default());
    }

    #[test]
    fn unknown_method_is_a_config_error() {
        let err = SystemConfig::from_toml_str("[options]\ncolor_space_method = \"cmyk\"\n").unwrap_err();
        assert!(matches!(err, PaletteError::Config(_)), "{err}");
    }

    #[test]
    fn custom_colors_use_generic_names() {
        let mut base = SystemConfig::default();
        base.options.auto_detect_names = true;
        base.options.dynamic_status_chroma = true;
        let config = base.with_custom_colors("6b7280", "#8B5CF6").unwrap();
        assert_eq!(config.neutral, BaseColorSpec { name: "neutral".into(), hex: "#6b7280".into() });
        assert_eq!(config.primary.hex, "#8B5CF6");
        assert_eq!(config.primary.name, "primary");
        assert!(!config.options.auto_detect_names);
        assert!(config.options.dynamic_status_chroma);
    }

    #[test]
    fn overlay_keeps_unset_keys() {
        let modern = SystemConfig {
            neutral: BaseColorSpec { name: "slate".into(), hex: "#64748b".into() },
            ..SystemConfig::default()
        };
        let merged = modern
            .overlay_toml_str("[primary]\nhex = \"#ef4444\"\n\n[options]\ncolor_space_method = \"hsl\"\n")
            .unwrap();
        assert_eq!(merged.neutral, modern.neutral);
        assert_eq!(merged.primary, BaseColorSpec { name: "blue".into(), hex: "#ef4444".into() });
        assert_eq!(merged.options.color_space_method, ColorSpaceMethod::Hsl);
        assert_eq!(merged.options.interactive_weight, 600);
    }

    #[test]
    fn overlay_rejects_bad_values() {
        let err = SystemConfig::default().overlay_toml_str("[options]\ninteractive_color_mode = 3\n").unwrap_err();
        assert!(matches!(err, PaletteError::Config(_)), "{err}");
    }

    #[test]
    fn toml_round_trip() {
        let mut config = SystemConfig::default();
        config.options.dynamic_status_chroma = true;
        config.options.color_space_method = ColorSpaceMethod::Lab;
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("color_space_method = \"lab\""));
        assert_eq!(SystemConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn custom_colors_reject_bad_hex() {
        let err = SystemConfig::default().with_custom_colors("#fff", "#8b5cf6").unwrap_err();
        assert!(matches!(err, PaletteError::Color(_)));
    }

    #[test]
    fn detected_name_requests() {
        let spec = |name: &str| BaseColorSpec { name: name.into(), hex: "#000000".into() };
        assert!(spec("").wants_detected_name());
        assert!(spec("  ").wants_detected_name());
        assert!(spec("AUTO").wants_detected_name());
        assert!(!spec("zinc").wants_detected_name());
    }
}
