// SPDX-License-Identifier: MIT

/// Errors raised at the color-string boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string is not a six-digit hex color (`#RRGGBB` or `RRGGBB`).
    #[error("invalid hex color {0:?}: expected six hex digits, e.g. #3b82f6")]
    InvalidHex(String),

    /// Unrecognized color output format name.
    #[error("unknown color format {0:?}: expected hex, rgb or hsl")]
    UnknownFormat(String),
}
