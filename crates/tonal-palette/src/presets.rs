//! Named preset configurations: a neutral and a primary that work well
//! together.

use crate::config::{BaseColorSpec, SystemConfig};
use crate::error::PaletteError;
use crate::options::GenerationOptions;

fn config(neutral: (&str, &str), primary: (&str, &str)) -> SystemConfig {
    SystemConfig {
        neutral: BaseColorSpec { name: neutral.0.into(), hex: neutral.1.into() },
        primary: BaseColorSpec { name: primary.0.into(), hex: primary.1.into() },
        options: GenerationOptions::default(),
    }
}

/// Look up a preset by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn preset(name: &str) -> Option<SystemConfig> {
    let config = lookup(name);
    if config.is_none() {
        tracing::warn!(preset = name, "unknown preset");
    }
    config
}

/// Look up a preset by name, failing on unknown names.
///
/// # Errors
///
/// Returns [`PaletteError::UnknownPreset`] if the name is not recognized.
pub fn require(name: &str) -> Result<SystemConfig, PaletteError> {
    preset(name).ok_or_else(|| PaletteError::UnknownPreset(name.to_string()))
}

fn lookup(name: &str) -> Option<SystemConfig> {
    Some(match name {
        "default" => config(("zinc", "#71717a"), ("blue", "#3b82f6")),
        "modern" => config(("slate", "#64748b"), ("indigo", "#6366f1")),
        "natural" => config(("stone", "#78716c"), ("emerald", "#10b981")),
        "custom" => config(("neutral", "#6b7280"), ("primary", "#8b5cf6")),
        _ => return None,
    })
}

/// List all preset names.
#[must_use]
pub const fn preset_names() -> &'static [&'static str] {
    &["default", "modern", "natural", "custom"]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
