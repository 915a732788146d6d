use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::Parser;

use softbrush_engine::brush::{PaintBrush, SoftBrush, StrokeArgs};
use softbrush_engine::coords::{RectI, Vec2};
use softbrush_engine::logging::{init_logging, LoggingConfig};
use softbrush_engine::paint::Color;
use softbrush_engine::raster::{Context, RasterTarget, RgbaSurface};

/// Replays a scripted pointer drag through the soft brush and saves the preview.
#[derive(Debug, Parser)]
#[command(name = "softbrush-studio", version)]
struct Args {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 256)]
    height: u32,

    /// Brush diameter in pixels.
    #[arg(long, default_value_t = 24.0)]
    line_width: f32,

    /// Stroke color as #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "#1e64c8")]
    color: String,

    /// Pointer positions, space separated: "x,y x,y ...".
    #[arg(long, default_value = "32,32 128,64 224,200")]
    points: String,

    /// Extra stationary move events at the final point.
    #[arg(long, default_value_t = 0)]
    repeat: u32,

    /// Where to write the final preview.
    #[arg(long, short, default_value = "stroke.png")]
    output: PathBuf,

    /// Log filter (env_logger syntax). Falls back to RUST_LOG, then info.
    #[arg(long)]
    log: Option<String>,
}

fn parse_points(list: &str) -> Result<Vec<Vec2>> {
    let points = list
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("point {pair:?} is not of the form x,y"))?;
            let x: f32 = x.trim().parse().with_context(|| format!("bad x in {pair:?}"))?;
            let y: f32 = y.trim().parse().with_context(|| format!("bad y in {pair:?}"))?;
            Ok(Vec2::new(x, y))
        })
        .collect::<Result<Vec<_>>>()?;

    if points.is_empty() {
        bail!("at least one point is required");
    }
    Ok(points)
}

fn save_png(surface: &RgbaSurface, path: &Path) -> Result<()> {
    let straight: Vec<u8> = surface
        .pixels()
        .iter()
        .flat_map(|p| p.to_straight())
        .collect();

    let img = image::RgbaImage::from_raw(surface.width(), surface.height(), straight)
        .context("preview buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let color = Color::from_hex(&args.color)
        .with_context(|| format!("invalid --color {:?}", args.color))?;
    let points = parse_points(&args.points)?;

    let surface = RgbaSurface::new(args.width, args.height)
        .context("cannot allocate preview surface")?;
    let mut g = Context::new(surface);
    g.set_line_width(args.line_width);

    let mut brush = SoftBrush::new();
    log::info!(
        "{} brush, {}x{} canvas, line width {}",
        brush.name(),
        args.width,
        args.height,
        args.line_width
    );

    // A single point is a press without motion: one stationary event.
    let mut events: Vec<(Vec2, Vec2)> = if points.len() == 1 {
        vec![(points[0], points[0])]
    } else {
        points.windows(2).map(|w| (w[0], w[1])).collect()
    };
    let last = points[points.len() - 1];
    events.extend((0..args.repeat).map(|_| (last, last)));

    let mut dirty = RectI::EMPTY;
    for (i, (from, to)) in events.into_iter().enumerate() {
        dirty = brush.on_move(&mut g, &StrokeArgs::new(from, to, color));
        log::info!(
            "move {i}: ({:.1},{:.1}) -> ({:.1},{:.1}) dirty {:?}",
            from.x,
            from.y,
            to.x,
            to.y,
            dirty
        );
    }

    // The preview is what the host would commit; save it before the mask goes away.
    save_png(g.target(), &args.output)?;
    brush.on_release();

    log::info!("wrote {} (final dirty {:?})", args.output.display(), dirty);
    Ok(())
}
