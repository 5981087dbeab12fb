//! Errors surfaced at the palette boundary.
//!
//! Most of the engine degrades instead of failing: scale generation yields
//! `None`, token derivation skips single tokens, out-of-gamut colors are
//! chroma-clamped. These variants cover what a caller has to see.

use tonal_color::ColorError;

#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("unknown color space method {0:?}: expected hsl, lab or oklch")]
    UnknownMethod(String),

    #[error("unknown interactive color mode {0:?}: expected optimized or exact")]
    UnknownInteractiveMode(String),

    #[error("unknown theme {0:?}: expected light or dark")]
    UnknownTheme(String),

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error("unknown export format {0:?}")]
    UnknownFormat(String),

    #[error("could not generate the {family} scale from {hex:?}")]
    ScaleGeneration { family: String, hex: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
