//! Command line interface for glyphpath
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs.

use std::path::PathBuf;

use clap::Parser;

use crate::core::config_file::{ConfigFile, DEFAULT_SIZE};
use crate::face::{Color, Decoration, FontVariant, FontWeight};
use crate::typography::TypographicOptions;

/// Largest accepted text size in points
pub const MAX_SIZE: f64 = 10_000.0;

/// glyphpath CLI arguments
///
/// Examples:
///   glyphpath -f DejaVuSans.ttf "Hello..."              # Outline text to stdout as SVG
///   glyphpath -f Font.ttf -s 24 -o out.svg "Title"      # 24pt, written to a file
///   glyphpath -f Font.ttf --weight bold --italic "x"    # Faux bold italic
///   glyphpath -f Font.ttf --variant superscript "2"     # Superscript
///   glyphpath -f Font.ttf -d underline -d sine "wavy"   # Decorations
///   glyphpath --new-config                              # Write ~/.config/glyphpath
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glyphpath",
    version,
    about = "Convert text into vector outlines",
    long_about = "glyphpath outlines text with a TrueType font and writes the result as an SVG path. It applies typographic substitutions (smart quotes, dashes, ellipses, fractions, ligatures), faux bold and italic styles, sub- and superscripts and text decorations."
)]
pub struct CliArgs {
    /// Text to outline
    pub text: Option<String>,

    /// Path to a TrueType font (.ttf, or .ttc with --font-index)
    #[clap(
        long = "font",
        short = 'f',
        help = "TrueType font file",
        long_help = "Path to a TrueType font file. Fonts with CFF outlines (.otf) can be measured but not outlined."
    )]
    pub font: Option<PathBuf>,

    /// Face index inside a font collection
    #[clap(long = "font-index", default_value_t = 0)]
    pub font_index: u32,

    /// Text size in points
    #[clap(
        long = "size",
        short = 's',
        help = "Text size in points",
        long_help = "Text size in points. Defaults to the config file's default_size, then 12."
    )]
    pub size: Option<f64>,

    /// Requested weight; faked when the font doesn't have it
    #[clap(
        long = "weight",
        short = 'w',
        help = "Font weight (extralight, light, book, regular, medium, semibold, bold, black, extrablack)"
    )]
    pub weight: Option<FontWeight>,

    #[clap(long = "italic", short = 'i', help = "Italic (faux shear)")]
    pub italic: bool,

    #[clap(
        long = "variant",
        help = "Font variant (normal, subscript, superscript, smallcaps)"
    )]
    pub variant: Option<FontVariant>,

    /// Decorations, drawn in the given order
    #[clap(
        long = "decoration",
        short = 'd',
        help = "Decoration (underline, overline, strikethrough, double, dotted, dashed, sine, sawtooth); repeatable"
    )]
    pub decorations: Vec<Decoration>,

    #[clap(long = "color", help = "Fill colour as #rgb, #rrggbb or #rrggbbaa")]
    pub color: Option<Color>,

    #[clap(
        long = "no-typography",
        help = "Keep straight quotes, hyphens and dots as typed"
    )]
    pub no_typography: bool,

    #[clap(long = "ligatures", help = "Use ff, fi, fl, ffi and ffl ligatures")]
    pub ligatures: bool,

    #[clap(long = "historical-ligatures", help = "Use long-s t and st ligatures")]
    pub historical_ligatures: bool,

    /// Shape with harfrust instead of mapping characters one by one
    ///
    /// Shaping applies the font's own OpenType features but no faux styles,
    /// variants or kerning fallbacks.
    #[clap(long = "shape", help = "Shape with harfrust (OpenType features, no faux styles)")]
    pub shape: bool,

    #[clap(long = "output", short = 'o', help = "SVG output file (stdout when omitted)")]
    pub output: Option<PathBuf>,

    #[clap(long = "verbose", short = 'v', help = "Log debug output")]
    pub verbose: bool,

    #[clap(
        long = "log-to-file",
        help = "Also write logs to ~/.config/glyphpath/logs/"
    )]
    pub log_to_file: bool,

    /// Initialize user configuration directory with default settings
    ///
    /// This creates the ~/.config/glyphpath directory with settings.json and
    /// a logs/ directory.
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings"
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and values are in range before
    /// anything is loaded, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        if self.text.is_none() {
            return Err("No text given.\nPass the text to outline as the last argument.".to_string());
        }

        match &self.font {
            None => return Err("No font given.\nUse --font <path> to choose a TrueType font.".to_string()),
            Some(path) if !path.is_file() => {
                return Err(format!(
                    "Font file does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
            Some(_) => {}
        }

        if let Some(size) = self.size {
            if !(size.is_finite() && size > 0.0 && size <= MAX_SIZE) {
                return Err(format!(
                    "Invalid size: {size}\nThe size must be a positive number of points, at most {MAX_SIZE}."
                ));
            }
        }

        Ok(())
    }

    /// Text size from CLI args, config file, or default
    ///
    /// Priority order:
    /// 1. CLI argument (--size)
    /// 2. Config file setting (~/.config/glyphpath/settings.json)
    /// 3. Built-in default (12pt)
    pub fn size(&self, config: &ConfigFile) -> f64 {
        self.size.or(config.default_size).unwrap_or(DEFAULT_SIZE)
    }

    /// Typographic options with the same priority order as [`CliArgs::size`]
    ///
    /// Flags can only switch an option away from its default, so a flag
    /// that isn't given defers to the config file.
    pub fn typographic_options(&self, config: &ConfigFile) -> TypographicOptions {
        let mut options = config.typographic_options();
        if self.no_typography {
            options.typography = false;
        }
        if self.ligatures {
            options.common_ligatures = true;
        }
        if self.historical_ligatures {
            options.historical_ligatures = true;
        }
        options
    }

    /// File logging from `--log-to-file`, else the config file, else off
    pub fn log_to_file(&self, config: &ConfigFile) -> bool {
        self.log_to_file || config.log_to_file.unwrap_or(false)
    }
}
