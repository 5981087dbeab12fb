// SPDX-License-Identifier: MIT
//
// Hex color strings, the only color notation that crosses the boundary.
//
// Input is validated once against `^#?[0-9a-fA-F]{6}$`. Anything else is an
// error, never silently repaired: `#fff`, `#ff000080` and `red` are all
// rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ColorError;

static HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
        .expect("hex pattern is a valid regex")
});

/// Whether `s` is a six-digit hex color, with or without a leading `#`.
#[must_use]
pub fn is_valid_hex(s: &str) -> bool {
    HEX_PATTERN.is_match(s)
}

/// Parse a six-digit hex color into 8-bit sRGB channels.
///
/// # Errors
///
/// Returns [`ColorError::InvalidHex`] when `s` does not match the pattern.
pub fn parse_hex(s: &str) -> Result<(u8, u8, u8), ColorError> {
    let caps = HEX_PATTERN
        .captures(s)
        .ok_or_else(|| ColorError::InvalidHex(s.to_string()))?;
    let channel = |i: usize| {
        u8::from_str_radix(&caps[i], 16).map_err(|_| ColorError::InvalidHex(s.to_string()))
    };
    Ok((channel(1)?, channel(2)?, channel(3)?))
}

/// Parse a hex color into an `(r, g, b)` triplet, or `None` when malformed.
#[must_use]
pub fn hex_to_rgb(s: &str) -> Option<(u8, u8, u8)> {
    parse_hex(s).ok()
}

/// Format 8-bit channels as a lowercase `#rrggbb` string.
#[must_use]
pub fn format_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Ensure a valid hex string carries its leading `#`, preserving the
/// digits exactly as written.
///
/// # Errors
///
/// Returns [`ColorError::InvalidHex`] when `s` is not a six-digit hex color.
pub fn with_hash(s: &str) -> Result<String, ColorError> {
    if !is_valid_hex(s) {
        return Err(ColorError::InvalidHex(s.to_string()));
    }
    Ok(if s.starts_with('#') { s.to_string() } else { format!("#{s}") })
}

/// Case-insensitive hex equality that tolerates a missing `#`.
#[must_use]
pub fn hex_eq(a: &str, b: &str) -> bool {
    a.trim_start_matches('#').eq_ignore_ascii_case(b.trim_start_matches('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rrggbb() {
        assert_eq!(parse_hex("#3b82f6").unwrap(), (59, 130, 246));
        assert_eq!(parse_hex("FFFFFF").unwrap(), (255, 255, 255));
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "#", "#fff", "#ffff", "#ff000080", "#12345g", " #123456", "rgb(0,0,0)"] {
            assert!(parse_hex(bad).is_err(), "accepted {bad:?}");
            assert!(hex_to_rgb(bad).is_none());
        }
    }

    #[test]
    fn error_carries_input() {
        let err = parse_hex("#xyz").unwrap_err();
        assert_eq!(err, ColorError::InvalidHex("#xyz".to_string()));
    }

    #[test]
    fn with_hash_preserves_case() {
        assert_eq!(with_hash("71717A").unwrap(), "#71717A");
        assert_eq!(with_hash("#71717a").unwrap(), "#71717a");
        assert!(with_hash("#7171").is_err());
    }

    #[test]
    fn hex_eq_ignores_case_and_hash() {
        assert!(hex_eq("#71717A", "71717a"));
        assert!(!hex_eq("#71717a", "#71717b"));
    }

    #[test]
    fn format_pads_channels() {
        assert_eq!(format_hex(0, 10, 255), "#000aff");
    }
}
