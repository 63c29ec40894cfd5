//! Application runner logic
//!
//! Loads the font, builds the face and writes the SVG document.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use kurbo::{Affine, BezPath, Point, Rect, Shape};
use tracing::{debug, info};

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::face::{Face, FontBuilder, FontStyle, FontVariant, FontWeight, MM_PER_PT};
use crate::font_source::SfntFont;
use crate::layout;
use crate::logging;
use crate::shaping::{HarfrustShaper, Shaper};
use crate::typography::QuoteState;

/// Margin around the outlines in the SVG view box, in millimetres
const SVG_MARGIN: f64 = 1.0;

/// Run the CLI with the given arguments.
/// Handles special CLI flags and delegates to the renderer.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    let config = ConfigFile::load().unwrap_or_default();
    let _guard = logging::init(cli_args.verbose, cli_args.log_to_file(&config))?;
    cli_args.validate().map_err(anyhow::Error::msg)?;

    let svg = render(&cli_args, &config)?;
    match &cli_args.output {
        Some(path) => {
            fs::write(path, svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn font_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_string())
}

/// Outline the CLI's text and return it as an SVG document
pub fn render(cli_args: &CliArgs, config: &ConfigFile) -> Result<String> {
    let path = cli_args.font.as_deref().context("No font given")?;
    let text = cli_args.text.as_deref().unwrap_or_default();

    let data = fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
    let sfnt = SfntFont::from_index(data, cli_args.font_index)
        .with_context(|| format!("Failed to parse font {}", path.display()))?;
    let shaper = if cli_args.shape {
        Some(HarfrustShaper::for_font(&sfnt)?)
    } else {
        None
    };

    let font = FontBuilder::new(font_name(path), sfnt)
        .options(cli_args.typographic_options(config))
        .build();
    let style = FontStyle::new(cli_args.weight.unwrap_or(FontWeight::Regular), cli_args.italic);
    let size = cli_args.size(config) * MM_PER_PT;
    let face = Face::new(
        Arc::new(font),
        size,
        style,
        cli_args.variant.unwrap_or(FontVariant::Normal),
    )
    .with_color(cli_args.color.unwrap_or_default())
    .with_decorations(cli_args.decorations.iter().copied());

    let (outline, advance) = outline_text(&face, text, shaper.as_ref().map(|s| s as &dyn Shaper))
        .with_context(|| format!("Failed to outline {text:?}"))?;
    let decorations = face.decorate(advance);
    debug!(
        "Outlined {} characters, advance {:.3}mm, {} path elements",
        text.chars().count(),
        advance,
        outline.elements().len()
    );

    Ok(svg_document(&[&outline, &decorations], &face))
}

/// Outline `text` with `face`, through `shaper` when given
///
/// Shaped text is positioned by the shaper alone: no faux styles, but the
/// variant's scale and baseline shift still apply.
pub fn outline_text(
    face: &Face,
    text: &str,
    shaper: Option<&dyn Shaper>,
) -> crate::error::Result<(BezPath, f64)> {
    let prepared = face.prepare_text(text, &mut QuoteState::new());
    match shaper {
        Some(shaper) => {
            let mut path = BezPath::new();
            let advance = layout::append_text(
                &mut path,
                face.font().source(),
                shaper,
                &prepared,
                face.size() * face.scale(),
                Point::new(0.0, face.voffset()),
            )?;
            Ok((path, advance.x))
        }
        None => face.to_path(&prepared),
    }
}

/// SVG with one `<path>` per non-empty outline, flipped to the y-down SVG frame
pub fn svg_document(paths: &[&BezPath], face: &Face) -> String {
    let flipped: Vec<BezPath> = paths
        .iter()
        .filter(|path| !path.elements().is_empty())
        .map(|path| {
            let mut path = (*path).clone();
            path.apply_affine(Affine::FLIP_Y);
            path
        })
        .collect();

    let bounds = flipped
        .iter()
        .map(|path| path.bounding_box())
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO)
        .inflate(SVG_MARGIN, SVG_MARGIN);

    let color = face.color();
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.3}mm\" height=\"{h:.3}mm\" viewBox=\"{x:.3} {y:.3} {w:.3} {h:.3}\">\n",
        x = bounds.x0,
        y = bounds.y0,
        w = bounds.width(),
        h = bounds.height(),
    );
    for path in &flipped {
        svg.push_str(&format!(
            "  <path fill=\"{}\" fill-opacity=\"{:.3}\" d=\"{}\"/>\n",
            color.to_hex(),
            color.opacity(),
            path.to_svg()
        ));
    }
    svg.push_str("</svg>\n");
    svg
}
