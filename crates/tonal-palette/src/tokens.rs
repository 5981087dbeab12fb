//! Semantic tokens: named roles (text, border, foreground, background,
//! interactive, status) resolved to concrete colors for light and dark
//! themes.
//!
//! Most tokens read a fixed weight from the neutral scale; dark themes use
//! the mirrored weight. Interactive tokens read the primary scale at a weight
//! picked by [`interactive_weight`]. Focus rings are alpha tints of their
//! base color. Derivation is best-effort per token: a reference to a missing
//! scale step drops that one token with a warning.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tonal_color::format::rgba;
use tonal_color::hex::hex_to_rgb;

use crate::error::PaletteError;
use crate::options::{GenerationOptions, InteractiveColorMode};
use crate::scale::ColorScale;
use crate::status::{StatusKind, StatusScales, Swatch};
use crate::weight::Weight;

/// RGB distance beyond which exact mode gives up and uses weight 600.
pub const EXACT_MATCH_THRESHOLD: f64 = 50.0;

/// Focus-ring opacity in light themes.
pub const FOCUS_ALPHA_LIGHT: f64 = 0.24;

/// Focus-ring opacity in dark themes.
pub const FOCUS_ALPHA_DARK: f64 = 0.36;

/// Light or dark variant of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    const fn focus_alpha(self) -> f64 {
        if self.is_dark() { FOCUS_ALPHA_DARK } else { FOCUS_ALPHA_LIGHT }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(PaletteError::UnknownTheme(s.to_string())),
        }
    }
}

/// A resolved token color: a `#rrggbb` or `rgba(...)` string plus the
/// palette name it came from (e.g. `"zinc-950"`, `"base-white"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValue {
    pub hex: String,
    pub name: String,
}

/// One semantic token with both theme variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticToken {
    pub name: String,
    pub light: TokenValue,
    pub dark: TokenValue,
}

impl SemanticToken {
    #[must_use]
    pub const fn get(&self, theme: Theme) -> &TokenValue {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl Serialize for SemanticToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SemanticToken", 2)?;
        state.serialize_field("light", &self.light)?;
        state.serialize_field("dark", &self.dark)?;
        state.end()
    }
}

/// Tokens in definition order, serialized as a name-keyed map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenMap {
    tokens: Vec<SemanticToken>,
}

impl TokenMap {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SemanticToken> {
        self.tokens.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SemanticToken> {
        self.tokens.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Serialize for TokenMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.tokens.iter().map(|t| (&t.name, t)))
    }
}

/// Every token name, in definition order.
pub const TOKEN_NAMES: [&str; 42] = [
    "text-primary",
    "text-primary-on-brand",
    "text-secondary",
    "text-tertiary",
    "text-quaternary",
    "text-white",
    "text-disabled",
    "text-placeholder",
    "border-primary",
    "border-secondary",
    "border-tertiary",
    "border-disabled",
    "fg-primary",
    "fg-primary-on-brand",
    "fg-secondary",
    "fg-tertiary",
    "fg-white",
    "fg-disabled",
    "bg-primary",
    "bg-secondary",
    "bg-tertiary",
    "bg-base",
    "bg-modal-overlay",
    "interactive-primary",
    "interactive-primary-hover",
    "interactive-primary-active",
    "interactive-secondary",
    "interactive-secondary-hover",
    "interactive-secondary-active",
    "interactive-focus",
    "success-primary",
    "success-background",
    "success-foreground",
    "success-focus",
    "warning-primary",
    "warning-background",
    "warning-foreground",
    "warning-focus",
    "error-primary",
    "error-background",
    "error-foreground",
    "error-focus",
];

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Which scale a token reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Neutral,
    Primary,
    Status(StatusKind),
}

/// Where a token's color comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Base {
    Scale(Family, Weight),
    Literal { value: &'static str, name: &'static str },
}

/// A base color, optionally rendered as an alpha tint.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Source {
    base: Base,
    alpha: Option<f64>,
}

impl Source {
    const fn neutral(weight: Weight) -> Self {
        Self { base: Base::Scale(Family::Neutral, weight), alpha: None }
    }

    const fn primary(weight: Weight) -> Self {
        Self { base: Base::Scale(Family::Primary, weight), alpha: None }
    }

    const fn literal(value: &'static str, name: &'static str) -> Self {
        Self { base: Base::Literal { value, name }, alpha: None }
    }

    const fn swatch(swatch: Swatch) -> Self {
        Self::literal(swatch.hex, swatch.name)
    }

    const fn tinted(self, alpha: f64) -> Self {
        Self { alpha: Some(alpha), ..self }
    }
}

const WHITE: Source = Source::literal("#ffffff", "base-white");
const MODAL_OVERLAY: Source = Source::literal("rgba(0,0,0,0.36)", "alpha-black-modal");

/// Neutral-scale and literal tokens: (name, light, dark).
const NEUTRAL_TOKENS: [(&str, Source, Source); 23] = {
    use Weight::{W100, W200, W300, W400, W50, W500, W600, W700, W800, W900, W950};
    const fn n(weight: Weight) -> Source {
        Source::neutral(weight)
    }
    [
        ("text-primary", n(W950), n(W50)),
        ("text-primary-on-brand", n(W50), n(W50)),
        ("text-secondary", n(W900), n(W300)),
        ("text-tertiary", n(W700), n(W400)),
        ("text-quaternary", n(W500), n(W400)),
        ("text-white", WHITE, WHITE),
        ("text-disabled", n(W500), n(W500)),
        ("text-placeholder", n(W500), n(W400)),
        ("border-primary", n(W300), n(W600)),
        ("border-secondary", n(W400), n(W700)),
        ("border-tertiary", n(W200), n(W900)),
        ("border-disabled", n(W300), n(W600)),
        ("fg-primary", n(W950), n(W50)),
        ("fg-primary-on-brand", n(W50), n(W50)),
        ("fg-secondary", n(W900), n(W300)),
        ("fg-tertiary", n(W700), n(W400)),
        ("fg-white", WHITE, WHITE),
        ("fg-disabled", n(W500), n(W500)),
        ("bg-primary", n(W50), n(W950)),
        ("bg-secondary", n(W100), n(W900)),
        ("bg-tertiary", n(W200), n(W800)),
        ("bg-base", WHITE, n(W950)),
        ("bg-modal-overlay", MODAL_OVERLAY, MODAL_OVERLAY),
    ]
};

/// Translucent secondary interactive fills: (suffix, light, dark).
const SECONDARY_TOKENS: [(&str, Source, Source); 3] = [
    (
        "",
        Source::literal("rgba(0,0,0,0.06)", "alpha-black-200"),
        Source::literal("rgba(255,255,255,0.06)", "alpha-white-200"),
    ),
    (
        "-hover",
        Source::literal("rgba(0,0,0,0.04)", "alpha-black-100"),
        Source::literal("rgba(255,255,255,0.04)", "alpha-white-100"),
    ),
    (
        "-active",
        Source::literal("rgba(0,0,0,0.02)", "alpha-black-50"),
        Source::literal("rgba(255,255,255,0.02)", "alpha-white-50"),
    ),
];

struct Rule {
    name: String,
    light: Source,
    dark: Source,
}

impl Rule {
    fn new(name: impl Into<String>, light: Source, dark: Source) -> Self {
        Self { name: name.into(), light, dark }
    }
}

// ---------------------------------------------------------------------------
// Interactive weights
// ---------------------------------------------------------------------------

/// Weight of the primary scale used for `interactive-primary`.
///
/// Optimized mode uses the configured weight (clamped to 400–700). Exact
/// mode uses the step closest in RGB to `primary_hex`, or 600 when nothing
/// lies within [`EXACT_MATCH_THRESHOLD`].
#[must_use]
pub fn interactive_weight(primary: &ColorScale, primary_hex: &str, options: &GenerationOptions) -> Weight {
    match options.interactive_color_mode {
        InteractiveColorMode::Optimized => options.safe_interactive_weight(),
        InteractiveColorMode::Exact => closest_weight(primary, primary_hex)
            .filter(|&(_, distance)| distance <= EXACT_MATCH_THRESHOLD)
            .map_or_else(
                || {
                    tracing::debug!(hex = primary_hex, "no close primary step, using 600");
                    Weight::W600
                },
                |(weight, _)| weight,
            ),
    }
}

/// The scale step nearest `hex` by Euclidean RGB distance. Ties go to the
/// lighter weight.
#[must_use]
pub fn closest_weight(scale: &ColorScale, hex: &str) -> Option<(Weight, f64)> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let mut best: Option<(Weight, f64)> = None;
    for entry in scale.iter() {
        let Some((er, eg, eb)) = hex_to_rgb(&entry.hex) else {
            continue;
        };
        let dr = f64::from(r) - f64::from(er);
        let dg = f64::from(g) - f64::from(eg);
        let db = f64::from(b) - f64::from(eb);
        let distance = db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((entry.weight, distance));
        }
    }
    best
}

/// Hover (and active) weight for an interactive base weight.
///
/// Light bases (300 and below) darken one step; everything else lightens
/// one step. Active reuses the hover weight.
#[must_use]
pub const fn hover_weight(base: Weight) -> Weight {
    if base.value() <= 300 { base.darker() } else { base.lighter() }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Inputs to [`derive`].
#[derive(Debug, Clone, Copy)]
pub struct TokenInputs<'a> {
    pub neutral: &'a ColorScale,
    pub primary: &'a ColorScale,
    pub neutral_name: &'a str,
    pub primary_name: &'a str,
    /// The user's primary hex, used by exact interactive mode.
    pub primary_hex: &'a str,
    /// Derived status scales; used when dynamic status chroma is enabled.
    pub status: Option<&'a StatusScales>,
}

/// A token source that could not be resolved.
#[derive(Debug)]
enum Unresolved {
    MissingEntry { family: String, weight: Weight },
    MalformedColor(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEntry { family, weight } => write!(f, "{family} scale has no {weight} step"),
            Self::MalformedColor(value) => write!(f, "cannot tint {value:?}"),
        }
    }
}

struct Resolver<'a> {
    inputs: &'a TokenInputs<'a>,
    status: Option<&'a StatusScales>,
}

impl Resolver<'_> {
    fn family(&self, family: Family) -> Option<(&ColorScale, &str)> {
        match family {
            Family::Neutral => Some((self.inputs.neutral, self.inputs.neutral_name)),
            Family::Primary => Some((self.inputs.primary, self.inputs.primary_name)),
            Family::Status(kind) => self.status.map(|s| (s.get(kind), kind.name())),
        }
    }

    fn base(&self, base: Base) -> Result<TokenValue, Unresolved> {
        match base {
            Base::Literal { value, name } => Ok(TokenValue { hex: value.to_string(), name: name.to_string() }),
            Base::Scale(family, weight) => {
                let missing = |family_name: &str| Unresolved::MissingEntry { family: family_name.to_string(), weight };
                let (scale, family_name) = self.family(family).ok_or_else(|| missing("status"))?;
                let entry = scale.get(weight).ok_or_else(|| missing(family_name))?;
                Ok(TokenValue { hex: entry.hex.clone(), name: format!("{family_name}-{weight}") })
            }
        }
    }

    fn resolve(&self, source: Source) -> Result<TokenValue, Unresolved> {
        let value = self.base(source.base)?;
        let Some(alpha) = source.alpha else {
            return Ok(value);
        };
        let hex = rgba(&value.hex, alpha).ok_or(Unresolved::MalformedColor(value.hex))?;
        let percent = (alpha * 100.0).round();
        Ok(TokenValue { hex, name: format!("{}-alpha-{percent}", value.name) })
    }
}

fn status_rules(kind: StatusKind, dynamic: bool) -> [Rule; 4] {
    let name = kind.name();
    let (light, dark) = if dynamic {
        let scale = |weight| Source { base: Base::Scale(Family::Status(kind), weight), alpha: None };
        let swatches = |dark| {
            (
                scale(kind.primary_weight()),
                scale(StatusKind::background_weight(dark)),
                scale(StatusKind::foreground_weight(dark)),
            )
        };
        (swatches(false), swatches(true))
    } else {
        let swatches = |dark| {
            let s = kind.swatches(dark);
            (Source::swatch(s.primary), Source::swatch(s.background), Source::swatch(s.foreground))
        };
        (swatches(false), swatches(true))
    };
    [
        Rule::new(format!("{name}-primary"), light.0, dark.0),
        Rule::new(format!("{name}-background"), light.1, dark.1),
        Rule::new(format!("{name}-foreground"), light.2, dark.2),
        Rule::new(
            format!("{name}-focus"),
            light.2.tinted(Theme::Light.focus_alpha()),
            dark.2.tinted(Theme::Dark.focus_alpha()),
        ),
    ]
}

fn rules(interactive: Weight, dynamic_status: bool) -> Vec<Rule> {
    let hover = hover_weight(interactive);
    let mut rules: Vec<Rule> = NEUTRAL_TOKENS
        .iter()
        .map(|&(name, light, dark)| Rule::new(name, light, dark))
        .collect();

    let p = Source::primary;
    rules.push(Rule::new("interactive-primary", p(interactive), p(interactive)));
    rules.push(Rule::new("interactive-primary-hover", p(hover), p(hover)));
    rules.push(Rule::new("interactive-primary-active", p(hover), p(hover)));
    rules.extend(
        SECONDARY_TOKENS
            .iter()
            .map(|&(suffix, light, dark)| Rule::new(format!("interactive-secondary{suffix}"), light, dark)),
    );
    rules.push(Rule::new(
        "interactive-focus",
        p(interactive).tinted(Theme::Light.focus_alpha()),
        p(interactive).tinted(Theme::Dark.focus_alpha()),
    ));

    for kind in StatusKind::ALL {
        rules.extend(status_rules(kind, dynamic_status));
    }
    rules
}

/// Derive the full token map.
///
/// Tokens whose sources cannot be resolved are left out and logged at
/// `warn`; the rest of the map is unaffected. When dynamic status chroma is
/// on and no status scales are supplied, they are derived from the primary
/// scale; if that fails the fixed status palette is used.
#[must_use]
pub fn derive(inputs: &TokenInputs<'_>, options: &GenerationOptions) -> TokenMap {
    let derived;
    let status = if options.dynamic_status_chroma {
        match inputs.status {
            Some(s) => Some(s),
            None => {
                derived = StatusScales::derive(inputs.primary);
                if derived.is_none() {
                    tracing::warn!("cannot derive status scales, using fixed status colors");
                }
                derived.as_ref()
            }
        }
    } else {
        None
    };

    let resolver = Resolver { inputs, status };
    let interactive = interactive_weight(inputs.primary, inputs.primary_hex, options);

    let tokens = rules(interactive, status.is_some())
        .into_iter()
        .filter_map(|rule| {
            let resolved = resolver
                .resolve(rule.light)
                .and_then(|light| Ok((light, resolver.resolve(rule.dark)?)));
            match resolved {
                Ok((light, dark)) => Some(SemanticToken { name: rule.name, light, dark }),
                Err(reason) => {
                    tracing::warn!(token = %rule.name, %reason, "token omitted");
                    None
                }
            }
        })
        .collect();
    TokenMap { tokens }
}
