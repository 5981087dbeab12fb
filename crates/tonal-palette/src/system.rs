//! The color system aggregate: both scales, the token map and metadata.
//!
//! A [`ColorSystem`] is built in one call and never mutated. Any change to
//! the configuration means generating a new one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tonal_color::hex::{hex_eq, parse_hex};

use crate::config::{BaseColorSpec, SystemConfig};
use crate::contrast::{self, ContrastResult};
use crate::error::PaletteError;
use crate::scale::{self, ColorScale};
use crate::status::StatusScales;
use crate::tokens::{self, Theme, TokenInputs, TokenMap};

/// Names and timestamp recorded at generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemMeta {
    pub neutral_name: String,
    pub primary_name: String,
    pub generated_at: DateTime<Utc>,
}

/// Which of the two base scales to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleFamily {
    Neutral,
    Primary,
}

/// Scales, tokens and metadata generated from one [`SystemConfig`].
#[derive(Debug, Clone, Serialize)]
pub struct ColorSystem {
    #[serde(skip)]
    config: SystemConfig,
    neutral: ColorScale,
    primary: ColorScale,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<StatusScales>,
    tokens: TokenMap,
    meta: SystemMeta,
}

impl ColorSystem {
    /// Generate scales and tokens for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Color`] if a base hex is malformed.
    pub fn generate(config: &SystemConfig) -> Result<Self, PaletteError> {
        let options = &config.options;
        let method = options.color_space_method;

        let family_name = |spec: &BaseColorSpec| {
            if options.auto_detect_names && spec.wants_detected_name() {
                method.detect_name(&spec.hex).to_string()
            } else {
                spec.name.clone()
            }
        };
        let neutral_name = family_name(&config.neutral);
        let primary_name = distinct_primary_name(&neutral_name, family_name(&config.primary));

        let build = |hex: &str, name: &str| -> Result<ColorScale, PaletteError> {
            parse_hex(hex)?;
            scale::generate(hex, name, options)
                .ok_or_else(|| PaletteError::ScaleGeneration { family: name.to_string(), hex: hex.to_string() })
        };
        let neutral = build(&config.neutral.hex, &neutral_name)?;
        let primary = build(&config.primary.hex, &primary_name)?;

        let status = if options.dynamic_status_chroma { StatusScales::derive(&primary) } else { None };

        let tokens = tokens::derive(
            &TokenInputs {
                neutral: &neutral,
                primary: &primary,
                neutral_name: &neutral_name,
                primary_name: &primary_name,
                primary_hex: &config.primary.hex,
                status: status.as_ref(),
            },
            options,
        );

        tracing::debug!(
            neutral = %neutral_name,
            primary = %primary_name,
            method = %method,
            tokens = tokens.len(),
            "color system generated"
        );

        Ok(Self {
            config: config.clone(),
            neutral,
            primary,
            status,
            tokens,
            meta: SystemMeta { neutral_name, primary_name, generated_at: Utc::now() },
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SystemConfig {
        &self.config
    }

    #[must_use]
    pub const fn neutral(&self) -> &ColorScale {
        &self.neutral
    }

    #[must_use]
    pub const fn primary(&self) -> &ColorScale {
        &self.primary
    }

    #[must_use]
    pub const fn scale(&self, family: ScaleFamily) -> &ColorScale {
        match family {
            ScaleFamily::Neutral => &self.neutral,
            ScaleFamily::Primary => &self.primary,
        }
    }

    /// Derived status scales, present when dynamic status chroma is on.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusScales> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn tokens(&self) -> &TokenMap {
        &self.tokens
    }

    #[must_use]
    pub const fn meta(&self) -> &SystemMeta {
        &self.meta
    }

    /// Whether `hex` is the configured base color of `family`.
    #[must_use]
    pub fn is_base_color(&self, family: ScaleFamily, hex: &str) -> bool {
        let spec = match family {
            ScaleFamily::Neutral => &self.config.neutral,
            ScaleFamily::Primary => &self.config.primary,
        };
        hex_eq(&spec.hex, hex)
    }

    /// Whether `hex` is the `interactive-primary` color in `theme`.
    #[must_use]
    pub fn is_interactive_color(&self, hex: &str, theme: Theme) -> bool {
        self.tokens
            .get("interactive-primary")
            .is_some_and(|t| hex_eq(&t.get(theme).hex, hex))
    }

    /// Contrast report for `hex` against white, black and `family`'s scale.
    #[must_use]
    pub fn contrast_info(&self, hex: &str, family: ScaleFamily) -> Option<ContrastResult> {
        contrast::analyze(hex, self.scale(family))
    }
}

/// Scale names key exports, so the primary gives way when both families
/// share a name.
fn distinct_primary_name(neutral: &str, primary: String) -> String {
    if !neutral.eq_ignore_ascii_case(&primary) {
        return primary;
    }
    let renamed = format!("{primary}-primary");
    tracing::warn!(family = %primary, renamed = %renamed, "neutral and primary share a family name");
    renamed
}
