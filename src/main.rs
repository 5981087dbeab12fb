// SPDX-License-Identifier: MIT
//
// tonal — perceptual color scales and semantic design tokens from two
// base colors.
//
// This is the command-line front end over the two library crates:
//
//   tonal-color   → OKLCH / CIELAB / HSL math, hex parsing, CSS formatting
//   tonal-palette → scales, contrast, tokens, presets, exports
//
// Configuration is layered, later layers winning:
//
//   built-in default or --preset
//       ↓
//   --config file.toml (only the keys it sets)
//       ↓
//   command-line flags (--neutral, --primary, --method, ...)
//
// The resolved SystemConfig is turned into one ColorSystem, and the
// subcommand decides what to print. Exports go to stdout (or --output);
// logs go to stderr so they never mix with generated code.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tonal_color::hex::with_hash;
use tonal_color::ColorFormat;
use tonal_palette::config::AUTO_NAME;
use tonal_palette::contrast::{self, AA, AAA};
use tonal_palette::export::{self, ExportFormat, ExportOptions, Sections};
use tonal_palette::presets;
use tonal_palette::{
    BaseColorSpec, ColorSpaceMethod, ColorSystem, InteractiveColorMode, ScaleFamily, SystemConfig,
};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tonal", about = "Perceptual color scales and semantic design tokens", version)]
struct Cli {
    #[command(flatten)]
    system: SystemArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the color system in an export format (the default).
    Export(ExportArgs),
    /// WCAG contrast report for one color against a generated scale.
    Contrast {
        /// Color to analyze (#rrggbb).
        hex: String,
        /// Scale to search for readable partners.
        #[arg(long, value_enum, default_value_t = FamilyArg::Primary)]
        family: FamilyArg,
    },
    /// Detect the family name of a color with every method.
    Detect {
        /// Color to name (#rrggbb).
        hex: String,
    },
    /// List the built-in presets.
    Presets,
    /// Print the resolved configuration as TOML.
    Config,
}

/// Where the base colors and generation options come from.
#[derive(Args, Debug, Default)]
struct SystemArgs {
    /// TOML configuration file layered over the preset.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Preset to start from (default, modern, natural, custom).
    #[arg(long, short)]
    preset: Option<String>,

    /// Neutral base color (#rrggbb).
    #[arg(long)]
    neutral: Option<String>,

    /// Neutral family name; "auto" detects it.
    #[arg(long)]
    neutral_name: Option<String>,

    /// Primary base color (#rrggbb).
    #[arg(long)]
    primary: Option<String>,

    /// Primary family name; "auto" detects it.
    #[arg(long)]
    primary_name: Option<String>,

    /// Scale color space: oklch, lab or hsl.
    #[arg(long)]
    method: Option<ColorSpaceMethod>,

    /// Ignore the base lightness and use the fixed lightness curve.
    #[arg(long)]
    fixed_curve: bool,

    /// Derive success/warning/error colors from the primary's chroma.
    #[arg(long)]
    dynamic_status: bool,

    /// Interactive color selection: optimized or exact.
    #[arg(long)]
    interactive: Option<InteractiveColorMode>,

    /// Weight for interactive colors in optimized mode (400-700).
    #[arg(long)]
    interactive_weight: Option<u16>,

    /// Detect family names for colors given without a name.
    #[arg(long)]
    auto_names: bool,
}

#[derive(Args, Debug, Default)]
struct ExportArgs {
    /// css, tailwind-config, tailwind-css, json or typescript.
    #[arg(long, short, default_value_t = ExportFormat::Css)]
    format: ExportFormat,

    /// Color notation: hex, rgb or hsl.
    #[arg(long, default_value_t = ColorFormat::Hex)]
    color_format: ColorFormat,

    /// Leave out the neutral and primary scales.
    #[arg(long)]
    no_scales: bool,

    /// Leave out the semantic tokens.
    #[arg(long)]
    no_tokens: bool,

    /// Leave out the dark theme values.
    #[arg(long)]
    no_dark: bool,

    /// CSS: use prefers-color-scheme media queries for the themes.
    #[arg(long)]
    media: bool,

    /// Write to a file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FamilyArg {
    Neutral,
    Primary,
}

impl From<FamilyArg> for ScaleFamily {
    fn from(family: FamilyArg) -> Self {
        match family {
            FamilyArg::Neutral => Self::Neutral,
            FamilyArg::Primary => Self::Primary,
        }
    }
}

// ─── Configuration layering ─────────────────────────────────────────────────

impl SystemArgs {
    /// Preset (or default), then the config file, then flags.
    fn resolve(&self) -> Result<SystemConfig> {
        let mut config = match &self.preset {
            Some(name) => presets::require(name)?,
            None => SystemConfig::default(),
        };
        if let Some(path) = &self.config {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            config = config
                .overlay_toml_str(&text)
                .with_context(|| format!("loading {}", path.display()))?;
        }
        self.apply(config)
    }

    /// Apply command-line overrides on top of `config`.
    fn apply(&self, mut config: SystemConfig) -> Result<SystemConfig> {
        let options = &mut config.options;
        if let Some(method) = self.method {
            options.color_space_method = method;
        }
        if let Some(mode) = self.interactive {
            options.interactive_color_mode = mode;
        }
        if let Some(weight) = self.interactive_weight {
            options.interactive_weight = weight;
        }
        options.use_fixed_contrast_curve |= self.fixed_curve;
        options.dynamic_status_chroma |= self.dynamic_status;
        options.auto_detect_names |= self.auto_names;

        let default_name = |generic: &'static str| if self.auto_names { AUTO_NAME } else { generic };
        override_base(
            &mut config.neutral,
            self.neutral.as_deref(),
            self.neutral_name.as_deref(),
            default_name("neutral"),
        )
        .context("--neutral")?;
        override_base(
            &mut config.primary,
            self.primary.as_deref(),
            self.primary_name.as_deref(),
            default_name("primary"),
        )
        .context("--primary")?;
        Ok(config)
    }
}

/// A new hex replaces the spec; its name is the given one or `fallback`.
/// A name alone renames the existing spec.
fn override_base(
    spec: &mut BaseColorSpec,
    hex: Option<&str>,
    name: Option<&str>,
    fallback: &str,
) -> Result<()> {
    match (hex, name) {
        (Some(hex), name) => *spec = BaseColorSpec::new(name.unwrap_or(fallback), hex)?,
        (None, Some(name)) => spec.name = name.to_string(),
        (None, None) => {}
    }
    Ok(())
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        let mut sections = Sections::default();
        sections.set(Sections::SCALES, !self.no_scales);
        sections.set(Sections::TOKENS, !self.no_tokens);
        sections.set(Sections::DARK, !self.no_dark);
        sections.set(Sections::MEDIA_QUERY, self.media);
        ExportOptions { color_format: self.color_format, sections }
    }
}

// ─── Reports ────────────────────────────────────────────────────────────────

fn mark(pass: bool) -> &'static str {
    if pass { "pass" } else { "fail" }
}

fn contrast_report(system: &ColorSystem, hex: &str, family: ScaleFamily) -> Result<String> {
    let hex = with_hash(hex)?;
    let scale = system.scale(family);
    let info = system
        .contrast_info(&hex, family)
        .with_context(|| format!("cannot analyze {hex}"))?;
    let family_name = match family {
        ScaleFamily::Neutral => &system.meta().neutral_name,
        ScaleFamily::Primary => &system.meta().primary_name,
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{hex} on white  {:>5.2}:1  AA {}  AAA {}",
        info.ratio_vs_white,
        mark(info.aa_on_white),
        mark(info.aaa_on_white)
    );
    let _ = writeln!(
        out,
        "{hex} on black  {:>5.2}:1  AA {}  AAA {}",
        info.ratio_vs_black,
        mark(info.aa_on_black),
        mark(info.aaa_on_black)
    );
    if info.best_family_matches.is_empty() {
        let _ = writeln!(out, "no {family_name} step reaches {AA}:1");
    }
    for m in info.best_family_matches.values() {
        let level = if m.passes_aaa { format!("AAA ({AAA}:1)") } else { format!("AA ({AA}:1)") };
        let _ = writeln!(out, "{family_name}-{:<4} {}  {:>5.2}:1  {level}", m.weight.value(), m.hex, m.ratio);
    }
    if let Some(best) = contrast::best_contrast(&hex, scale) {
        let _ = write!(out, "best partner: {} ({:.2}:1)", best.hex(), best.ratio());
    }
    Ok(out)
}

fn detect_report(hex: &str) -> Result<String> {
    let hex = with_hash(hex)?;
    let mut out = String::new();
    for method in ColorSpaceMethod::ALL {
        let _ = writeln!(out, "{:<6} {}", method.name(), method.detect_name(&hex));
    }
    out.truncate(out.trim_end().len());
    Ok(out)
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn generate(args: &SystemArgs) -> Result<ColorSystem> {
    let config = args.resolve()?;
    ColorSystem::generate(&config).context("generating color system")
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_else(|| Command::Export(ExportArgs::default())) {
        Command::Export(args) => {
            let system = generate(&cli.system)?;
            let text = export::export(&system, args.format, &args.options())?;
            match &args.output {
                Some(path) => {
                    fs::write(path, format!("{text}\n")).with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), format = %args.format, "export written");
                }
                None => println!("{text}"),
            }
        }
        Command::Contrast { hex, family } => {
            let system = generate(&cli.system)?;
            println!("{}", contrast_report(&system, &hex, family.into())?);
        }
        Command::Detect { hex } => println!("{}", detect_report(&hex)?),
        Command::Presets => {
            for name in presets::preset_names() {
                println!("{name}");
            }
        }
        Command::Config => print!("{}", cli.system.resolve()?.to_toml_string()?),
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("tonal: {e:#}");
        std::process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tonal").chain(args.iter().copied())).unwrap()
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    #[test]
    fn bare_invocation_exports_css() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(cli.system.preset.is_none());
    }

    #[test]
    fn export_flags() {
        let cli = parse(&["export", "--format", "json", "--color-format", "rgb", "--no-dark"]);
        let Some(Command::Export(args)) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.format, ExportFormat::Json);
        let options = args.options();
        assert_eq!(options.color_format, ColorFormat::Rgb);
        assert!(options.sections.contains(Sections::SCALES | Sections::TOKENS));
        assert!(!options.sections.contains(Sections::DARK));
    }

    #[test]
    fn default_export_options_match_library() {
        assert_eq!(ExportArgs::default().options(), ExportOptions::default());
    }

    #[test]
    fn rejects_unknown_method() {
        let result = Cli::try_parse_from(["tonal", "--method", "cmyk"]);
        assert!(result.is_err());
    }

    // ── Layering ──────────────────────────────────────────────────────────

    #[test]
    fn no_flags_is_the_default_config() {
        assert_eq!(SystemArgs::default().resolve().unwrap(), SystemConfig::default());
    }

    #[test]
    fn preset_then_flags() {
        let cli = parse(&["--preset", "modern", "--primary", "ef4444", "--method", "lab", "--dynamic-status"]);
        let config = cli.system.resolve().unwrap();
        assert_eq!(config.neutral.name, "slate");
        assert_eq!(config.primary, BaseColorSpec { name: "primary".into(), hex: "#ef4444".into() });
        assert_eq!(config.options.color_space_method, ColorSpaceMethod::Lab);
        assert!(config.options.dynamic_status_chroma);
    }

    #[test]
    fn auto_names_for_bare_colors() {
        let cli = parse(&["--neutral", "#78716c", "--primary", "#10b981", "--primary-name", "brand", "--auto-names"]);
        let config = cli.system.resolve().unwrap();
        assert_eq!(config.neutral.name, AUTO_NAME);
        assert_eq!(config.primary.name, "brand");
        assert!(config.options.auto_detect_names);
    }

    #[test]
    fn name_alone_renames() {
        let cli = parse(&["--primary-name", "brand"]);
        let config = cli.system.resolve().unwrap();
        assert_eq!(config.primary, BaseColorSpec { name: "brand".into(), hex: "#3b82f6".into() });
    }

    #[test]
    fn file_sits_between_preset_and_flags() {
        let path = std::env::temp_dir().join(format!("tonal-layering-{}.toml", std::process::id()));
        fs::write(&path, "[primary]\nname = \"rose\"\nhex = \"#f43f5e\"\n\n[options]\ninteractive_weight = 500\n").unwrap();

        let cli = Cli::try_parse_from([
            "tonal",
            "--preset",
            "natural",
            "--config",
            path.to_str().unwrap(),
            "--interactive-weight",
            "700",
        ])
        .unwrap();
        let config = cli.system.resolve().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.neutral.name, "stone");
        assert_eq!(config.primary.name, "rose");
        assert_eq!(config.options.interactive_weight, 700);
    }

    #[test]
    fn bad_inputs_are_errors() {
        assert!(parse(&["--preset", "retro"]).system.resolve().is_err());
        assert!(parse(&["--neutral", "#12345"]).system.resolve().is_err());
        let missing = parse(&["--config", "/nonexistent/tonal.toml"]).system.resolve().unwrap_err();
        assert!(format!("{missing:#}").contains("reading /nonexistent/tonal.toml"));
    }

    // ── Reports ───────────────────────────────────────────────────────────

    #[test]
    fn detect_lists_every_method() {
        let report = detect_report("3b82f6").unwrap();
        assert_eq!(report, "hsl    blue\nlab    purple\noklch  blue");
        assert!(detect_report("blue").is_err());
    }

    #[test]
    fn contrast_report_lines() {
        let system = ColorSystem::generate(&SystemConfig::default()).unwrap();
        let report = contrast_report(&system, "#3b82f6", ScaleFamily::Neutral).unwrap();
        assert!(report.starts_with("#3b82f6 on white   3.68:1  AA fail  AAA fail\n"), "{report}");
        assert!(report.contains("#3b82f6 on black   5.71:1  AA pass  AAA fail\n"));
        assert!(report.contains("best partner: "));
    }
}
