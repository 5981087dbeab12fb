//! # tonal-palette — Perceptual Scale and Design Token Engine
//!
//! Turns two base colors (a neutral and a primary) into eleven-step weight
//! scales, WCAG contrast reports and a themed set of semantic tokens. The
//! same configuration always yields the same system.
//!
//! # Architecture
//!
//! ```text
//! SystemConfig (neutral hex, primary hex, GenerationOptions)
//!     │
//!     ▼
//! naming.rs:    optional family-name detection from hue/chroma
//!     │
//!     ▼
//! strategy.rs:  OKLCH / LAB / HSL scale builders (weight 50..950)
//!     │
//!     ├──► status.rs:   success/warning/error scales seeded by primary chroma
//!     │
//!     ▼
//! tokens.rs:    42 light/dark semantic tokens from the weight table
//!     │
//!     ▼
//! system.rs:    ColorSystem aggregate ──► export.rs (CSS, Tailwind, JSON, TS)
//!                                   └──► contrast.rs (per-swatch reports)
//! ```
//!
//! # Failure model
//!
//! Generation degrades instead of aborting. A malformed base hex yields no
//! scale, a missing scale step drops only the tokens that read it, and
//! out-of-gamut colors lose chroma until they fit. Only the
//! [`ColorSystem`] boundary turns these into a [`PaletteError`].

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// Token and export tables are long by nature.
#![allow(clippy::too_many_lines)]

pub mod config;
pub mod contrast;
pub mod error;
pub mod export;
pub mod naming;
pub mod options;
pub mod presets;
pub mod scale;
pub mod status;
pub mod strategy;
pub mod system;
pub mod tokens;
pub mod weight;

pub use config::{BaseColorSpec, SystemConfig};
pub use contrast::{BestContrast, ContrastResult, FamilyMatch};
pub use error::PaletteError;
pub use export::{ExportFormat, ExportOptions, Sections};
pub use options::{ColorSpaceMethod, GenerationOptions, InteractiveColorMode};
pub use scale::{ColorScale, ScaleEntry};
pub use status::{StatusKind, StatusScales};
pub use strategy::ColorSpaceStrategy;
pub use system::{ColorSystem, ScaleFamily, SystemMeta};
pub use tokens::{SemanticToken, Theme, TokenMap, TokenValue};
pub use weight::Weight;
