//! Text exports of a [`ColorSystem`].
//!
//! Every format is a pure function of the system and an [`ExportOptions`]:
//! CSS custom properties, a Tailwind `colors` block, Tailwind `@layer base`
//! CSS, JSON and TypeScript type declarations. Color values go through a
//! [`ColorFormat`] so the same system can be written as hex, `rgb()` or
//! `hsl()`. Alpha tokens are already `rgba()` strings and pass through.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Serialize, Serializer};
use tonal_color::ColorFormat;

use crate::error::PaletteError;
use crate::scale::{capitalize, ColorScale};
use crate::system::ColorSystem;
use crate::tokens::{Theme, TokenMap};
use crate::weight::Weight;

bitflags! {
    /// Which parts of the system an export includes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sections: u8 {
        /// The neutral and primary scales.
        const SCALES      = 0b0001;
        /// Semantic tokens with their light values.
        const TOKENS      = 0b0010;
        /// Dark values of the semantic tokens.
        const DARK        = 0b0100;
        /// CSS only: wrap themes in `prefers-color-scheme` media queries
        /// instead of `:root` / `[data-theme="dark"]`.
        const MEDIA_QUERY = 0b1000;
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::SCALES | Self::TOKENS | Self::DARK
    }
}

impl Sections {
    fn dark_tokens(self) -> bool {
        self.contains(Self::TOKENS | Self::DARK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Css,
    TailwindConfig,
    TailwindCss,
    Json,
    TypeScript,
}

impl ExportFormat {
    pub const ALL: [Self; 5] = [Self::Css, Self::TailwindConfig, Self::TailwindCss, Self::Json, Self::TypeScript];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::TailwindConfig => "tailwind-config",
            Self::TailwindCss => "tailwind-css",
            Self::Json => "json",
            Self::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == lower)
            .ok_or_else(|| PaletteError::UnknownFormat(s.to_string()))
    }
}

/// Color rendering and section selection shared by all formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub color_format: ColorFormat,
    pub sections: Sections,
}

/// Render `system` in `format`.
///
/// # Errors
///
/// Returns [`PaletteError::Json`] if JSON serialization fails. The text
/// formats cannot fail.
pub fn export(system: &ColorSystem, format: ExportFormat, options: &ExportOptions) -> Result<String, PaletteError> {
    Ok(match format {
        ExportFormat::Css => css(system, options),
        ExportFormat::TailwindConfig => tailwind_config(system, options),
        ExportFormat::TailwindCss => tailwind_css(system, options),
        ExportFormat::Json => json(system, options)?,
        ExportFormat::TypeScript => typescript(system, options),
    })
}

// ── Block template ──────────────────────────────────────────────────────────

const INDENT: &str = "  ";

/// A run of lines inside zero or more nested braces.
///
/// Openers are written one level deeper each; the lines sit one level
/// inside the innermost opener and a `}` closes each opener in turn.
/// Blank lines stay blank.
#[derive(Debug, Default)]
struct Block {
    openers: Vec<String>,
    lines: Vec<String>,
}

impl Block {
    fn new(openers: &[&str]) -> Self {
        Self { openers: openers.iter().map(|o| (*o).to_string()).collect(), lines: Vec::new() }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn render(&self, out: &mut String) {
        for (depth, opener) in self.openers.iter().enumerate() {
            push_line(out, depth, opener);
        }
        let depth = self.openers.len();
        for line in &self.lines {
            if line.is_empty() {
                out.push('\n');
            } else {
                push_line(out, depth, line);
            }
        }
        for depth in (0..self.openers.len()).rev() {
            push_line(out, depth, "}");
        }
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

/// Render blocks separated by one blank line, without a trailing newline.
fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        block.render(&mut out);
    }
    out.truncate(out.trim_end_matches('\n').len());
    out
}

// ── Shared pieces ───────────────────────────────────────────────────────────

/// `(family name, scale)` for the neutral then the primary family.
fn families(system: &ColorSystem) -> [(&str, &ColorScale); 2] {
    let meta = system.meta();
    [(meta.neutral_name.as_str(), system.neutral()), (meta.primary_name.as_str(), system.primary())]
}

fn css_scale_vars(block: &mut Block, system: &ColorSystem, format: ColorFormat) {
    for (i, (name, scale)) in families(system).into_iter().enumerate() {
        if i > 0 {
            block.blank();
        }
        for entry in scale.iter() {
            block.line(format!("--{name}-{}: {};", entry.weight, format.render(&entry.hex)));
        }
    }
}

fn css_token_vars(block: &mut Block, tokens: &TokenMap, theme: Theme, format: ColorFormat) {
    for token in tokens.iter() {
        block.line(format!("--{}: {};", token.name, format.render(&token.get(theme).hex)));
    }
}

// ── CSS ─────────────────────────────────────────────────────────────────────

/// CSS custom properties: scales and light tokens on `:root`, dark token
/// overrides on `[data-theme="dark"]` (or both inside media queries).
#[must_use]
pub fn css(system: &ColorSystem, options: &ExportOptions) -> String {
    let ExportOptions { color_format, sections } = *options;
    let media = sections.contains(Sections::MEDIA_QUERY);

    let mut root = if media {
        Block::new(&["@media (prefers-color-scheme: light) {", ":root {"])
    } else {
        Block::new(&[":root {"])
    };
    if sections.contains(Sections::SCALES) {
        css_scale_vars(&mut root, system, color_format);
    }
    if sections.contains(Sections::TOKENS) {
        if !root.lines.is_empty() {
            root.blank();
        }
        root.line("/* Semantic tokens */");
        css_token_vars(&mut root, system.tokens(), Theme::Light, color_format);
    }

    let mut blocks = vec![root];
    if sections.dark_tokens() {
        let mut dark = if media {
            Block::new(&["@media (prefers-color-scheme: dark) {", ":root {"])
        } else {
            Block::new(&["[data-theme=\"dark\"] {"])
        };
        dark.line("/* Dark theme overrides */");
        css_token_vars(&mut dark, system.tokens(), Theme::Dark, color_format);
        blocks.push(dark);
    }
    render_blocks(&blocks)
}

// ── Tailwind ────────────────────────────────────────────────────────────────

/// The `colors` block of a Tailwind config, one object per family.
#[must_use]
pub fn tailwind_config(system: &ColorSystem, options: &ExportOptions) -> String {
    let mut block = Block::new(&["colors: {"]);
    let families = families(system);
    for (i, (name, scale)) in families.iter().enumerate() {
        block.line(format!("{name}: {{"));
        for entry in scale.iter() {
            block.line(format!("{INDENT}{}: '{}',", entry.weight, options.color_format.render(&entry.hex)));
        }
        block.line(if i + 1 < families.len() { "}," } else { "}" });
    }
    render_blocks(&[block])
}

/// Semantic tokens inside `@layer base`, light on `:root` and dark on
/// `[data-theme="dark"]`.
#[must_use]
pub fn tailwind_css(system: &ColorSystem, options: &ExportOptions) -> String {
    let ExportOptions { color_format, sections } = *options;
    let mut layer = Block::new(&["@layer base {"]);

    let selector = |layer: &mut Block, scope: &str, theme: Theme| {
        layer.line(format!("{scope} {{"));
        for token in system.tokens().iter() {
            layer.line(format!("{INDENT}--{}: {};", token.name, color_format.render(&token.get(theme).hex)));
        }
        layer.line("}");
    };

    if sections.contains(Sections::TOKENS) {
        selector(&mut layer, ":root", Theme::Light);
        if sections.dark_tokens() {
            layer.blank();
            selector(&mut layer, "[data-theme=\"dark\"]", Theme::Dark);
        }
    }
    render_blocks(&[layer])
}

// ── JSON ────────────────────────────────────────────────────────────────────

/// `{ weight: color }` in scale order.
struct ScaleValues<'a> {
    scale: &'a ColorScale,
    format: ColorFormat,
}

impl Serialize for ScaleValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.scale.iter().map(|e| (e.weight, self.format.render(&e.hex))))
    }
}

/// `{ family: { weight: color } }`, neutral first.
struct FamilyValues<'a> {
    families: [(&'a str, &'a ColorScale); 2],
    format: ColorFormat,
}

impl Serialize for FamilyValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.families
                .iter()
                .map(|&(name, scale)| (name, ScaleValues { scale, format: self.format })),
        )
    }
}

/// `{ token: color }` for one theme, in token order.
struct TokenValues<'a> {
    tokens: &'a TokenMap,
    theme: Theme,
    format: ColorFormat,
}

impl Serialize for TokenValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.tokens
                .iter()
                .map(|t| (t.name.as_str(), self.format.render(&t.get(self.theme).hex))),
        )
    }
}

#[derive(Serialize)]
struct ThemedTokens<'a> {
    light: TokenValues<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dark: Option<TokenValues<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    colors: Option<FamilyValues<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    semantic_tokens: Option<ThemedTokens<'a>>,
}

/// Pretty-printed JSON with `colors` and `semanticTokens.light/dark`.
///
/// # Errors
///
/// Returns [`PaletteError::Json`] if serialization fails.
pub fn json(system: &ColorSystem, options: &ExportOptions) -> Result<String, PaletteError> {
    let ExportOptions { color_format: format, sections } = *options;
    let tokens = |theme| TokenValues { tokens: system.tokens(), theme, format };
    let doc = JsonExport {
        colors: sections
            .contains(Sections::SCALES)
            .then(|| FamilyValues { families: families(system), format }),
        semantic_tokens: sections.contains(Sections::TOKENS).then(|| ThemedTokens {
            light: tokens(Theme::Light),
            dark: sections.contains(Sections::DARK).then(|| tokens(Theme::Dark)),
        }),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

// ── TypeScript ──────────────────────────────────────────────────────────────

/// Type declarations: the weight union, one template-literal type per
/// family and the union of semantic token names.
#[must_use]
pub fn typescript(system: &ColorSystem, options: &ExportOptions) -> String {
    let sections = options.sections;
    let mut block = Block::default();
    block.line("// Color system type definitions");

    if sections.contains(Sections::SCALES) {
        let weights: Vec<String> = Weight::ALL.iter().map(|w| format!("\"{w}\"")).collect();
        block.blank();
        block.line(format!("export type ColorWeight = {};", weights.join(" | ")));
        block.blank();
        for (name, _) in families(system) {
            block.line(format!("export type {}Color = `{name}-${{ColorWeight}}`;", type_name(name)));
        }
    }

    if sections.contains(Sections::TOKENS) && !system.tokens().is_empty() {
        block.blank();
        block.line("export type SemanticToken =");
        for (i, name) in system.tokens().names().enumerate() {
            let bar = if i == 0 { ' ' } else { '|' };
            block.line(format!("{INDENT}{bar} \"{name}\""));
        }
        block.line(";");
    }
    render_blocks(&[block])
}

/// `"slate"` → `"Slate"`, `"my blue"` → `"MyBlue"`. Characters that cannot
/// appear in a TypeScript identifier are dropped.
fn type_name(family: &str) -> String {
    family
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}
