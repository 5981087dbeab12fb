// SPDX-License-Identifier: MIT
//
// tonal-color — color math for the tonal palette engine.
//
// OKLCH is the working space: every scale step and token starts as an
// OKLCH triple and leaves as a gamut-mapped `#rrggbb` string. CIELAB (LCh)
// and HSL exist for the alternative scale strategies and for CSS output.
//
// Nothing here allocates beyond the output strings, touches I/O or holds
// state. All conversions are pure functions of their inputs.

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// Color-science constants are quoted to their published precision.
#![allow(clippy::excessive_precision, clippy::unreadable_literal)]

pub mod color;
pub mod error;
pub mod format;
pub mod hex;
pub mod hsl;
pub mod lab;

pub use color::Color;
pub use error::ColorError;
pub use format::ColorFormat;
