// SPDX-License-Identifier: MIT
//
// CSS color string rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::hex::hex_to_rgb;
use crate::hsl::Hsl;

/// How a color value is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#3b82f6`
    #[default]
    Hex,
    /// `rgb(59, 130, 246)`
    Rgb,
    /// `hsl(217, 91%, 60%)`
    Hsl,
}

impl ColorFormat {
    /// All formats, in display order.
    pub const ALL: [Self; 3] = [Self::Hex, Self::Rgb, Self::Hsl];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
        }
    }

    /// Render a color value in this format.
    ///
    /// Values that are not six-digit hex (e.g. `rgba(...)` alpha tokens)
    /// pass through unchanged.
    #[must_use]
    pub fn render(self, value: &str) -> String {
        let Some((r, g, b)) = hex_to_rgb(value) else {
            return value.to_string();
        };
        match self {
            Self::Hex => value.to_string(),
            Self::Rgb => format!("rgb({r}, {g}, {b})"),
            Self::Hsl => {
                let hsl = Hsl::from_rgb8(r, g, b).rounded();
                format!("hsl({}, {}%, {}%)", hsl.h, hsl.s, hsl.l)
            }
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFormat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == lower)
            .ok_or_else(|| ColorError::UnknownFormat(s.to_string()))
    }
}

/// Render a hex color as a CSS `rgba(r, g, b, alpha)` string.
///
/// Returns `None` if `hex` is malformed.
#[must_use]
pub fn rgba(hex: &str, alpha: f64) -> Option<String> {
    let (r, g, b) = hex_to_rgb(hex)?;
    Some(format!("rgba({r}, {g}, {b}, {alpha})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_each_format() {
        assert_eq!(ColorFormat::Hex.render("#3b82f6"), "#3b82f6");
        assert_eq!(ColorFormat::Rgb.render("#3b82f6"), "rgb(59, 130, 246)");
        assert_eq!(ColorFormat::Hsl.render("#3b82f6"), "hsl(217, 91%, 60%)");
    }

    #[test]
    fn non_hex_passes_through() {
        let v = "rgba(0,0,0,0.36)";
        assert_eq!(ColorFormat::Rgb.render(v), v);
        assert_eq!(ColorFormat::Hsl.render(v), v);
    }

    #[test]
    fn parse_names() {
        assert_eq!("RGB".parse::<ColorFormat>().unwrap(), ColorFormat::Rgb);
        assert!("cmyk".parse::<ColorFormat>().is_err());
    }

    #[test]
    fn rgba_string() {
        assert_eq!(rgba("#2563eb", 0.24).unwrap(), "rgba(37, 99, 235, 0.24)");
        assert!(rgba("nope", 0.5).is_none());
    }
}
