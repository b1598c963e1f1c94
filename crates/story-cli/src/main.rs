// File: crates/story-cli/src/main.rs
// Summary: `threes` CLI; renders every story chart to SVG (and PNG) or lists a chart's selectable players.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use story_core::options::{comparison_options, position_options};
use story_core::{ChartId, RenderedChart, Story, StoryConfig};
use story_render_skia::{RenderOptions, SkiaRenderer};
use tracing::{error, info, warn};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Three-point story charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render all enabled charts.
    Render(RenderArgs),
    /// Print the players a chart's controls offer.
    Options(OptionsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Story config (TOML); defaults apply when omitted.
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Directory holding the JSON documents and the per-game CSV.
    #[arg(long, value_hint = ValueHint::DirPath)]
    data: Option<PathBuf>,
    /// Output directory.
    #[arg(long, value_hint = ValueHint::DirPath)]
    out: Option<PathBuf>,
    /// Also rasterize each chart to PNG.
    #[arg(long, action = ArgAction::SetTrue)]
    png: bool,
    /// PNG pixels per SVG unit.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    theme: Option<String>,
    /// Player added to the comparison chart (repeatable).
    #[arg(long = "compare", value_name = "NAME")]
    compare: Vec<String>,
    /// Player added to the position chart (repeatable).
    #[arg(long = "position", value_name = "NAME")]
    position: Vec<String>,
}

#[derive(Parser, Debug)]
struct OptionsArgs {
    /// `curry-comparison` or `position-share`.
    chart: ChartId,
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    #[arg(long, value_hint = ValueHint::DirPath)]
    data: Option<PathBuf>,
}

/// Initialize logging, appending to THREES_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let mut unusable = None;
    if let Ok(path) = std::env::var("THREES_LOG_PATH") {
        match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file)
                    .init();
                return;
            }
            Err(e) => unusable = Some((path, e)),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    if let Some((path, e)) = unusable {
        warn!(path = %path, error = %e, "cannot open log file; logging to stderr");
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<StoryConfig> {
    match path {
        Some(p) => StoryConfig::load(p).with_context(|| format!("failed to load config '{}'", p.display())),
        None => Ok(StoryConfig::default()),
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(d) = args.data {
        config.data_dir = d;
    }
    if let Some(o) = args.out {
        config.output_dir = o;
    }
    if let Some(w) = args.width {
        if w == 0 {
            bail!("--width must be positive");
        }
        config.width = w;
    }
    if let Some(t) = args.theme {
        config.theme = t;
    }
    config.comparison_players.extend(args.compare);
    config.position_players.extend(args.position);

    info!(data = %config.data_dir.display(), out = %config.output_dir.display(), "rendering story");
    let report = Story::new(config).render_all();

    let raster_failed = if args.png {
        rasterize(&report.rendered, RenderOptions { scale: args.scale, ..RenderOptions::default() })
    } else {
        Vec::new()
    };

    for chart in &report.rendered {
        println!("{:<18} {}", chart.id, chart.path.display());
    }
    for id in &report.skipped {
        println!("{id:<18} (disabled)");
    }
    for (id, err) in &report.failed {
        println!("{id:<18} FAILED: {err}");
    }
    for (id, err) in &raster_failed {
        println!("{id:<18} PNG FAILED: {err}");
    }
    if !report.is_success() {
        bail!("{} of {} charts failed", report.failed.len(), ChartId::ALL.len());
    }
    if !raster_failed.is_empty() {
        bail!("{} png renders failed", raster_failed.len());
    }
    Ok(())
}

/// Write a PNG next to each rendered SVG; returns the charts that failed.
fn rasterize(charts: &[RenderedChart], opts: RenderOptions) -> Vec<(ChartId, String)> {
    let renderer = SkiaRenderer::new(opts);
    let mut failed = Vec::new();
    for chart in charts {
        let png = chart.path.with_extension("png");
        match renderer.render_to_png(&chart.scene, &png) {
            Ok(()) => info!(chart = %chart.id, path = %png.display(), "wrote png"),
            Err(e) => {
                let msg = format!("{e:#}");
                error!(chart = %chart.id, path = %png.display(), error = %msg, "png failed");
                failed.push((chart.id, msg));
            }
        }
    }
    failed
}

fn options(args: OptionsArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(d) = args.data {
        config.data_dir = d;
    }
    let story = Story::new(config);
    match args.chart {
        ChartId::CurryComparison => {
            let series = story.comparison_series()?;
            let featured = story.config().featured_player.as_str();
            for item in comparison_options(&series, featured) {
                println!("{}", item.label);
            }
        }
        ChartId::PositionShare => {
            let shares = story.share_set()?;
            for group in position_options(&shares) {
                println!("{}", group.label);
                for item in group.items {
                    println!("  {}", item.label);
                }
            }
        }
        other => {
            warn!(chart = %other, "chart has no player controls");
            bail!("`{}` has no player controls; use curry-comparison or position-share", other.slug());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(args),
        Command::Options(args) => options(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_core::{Rgba, Scene};

    fn chart(id: ChartId, path: std::path::PathBuf) -> RenderedChart {
        RenderedChart { id, path, scene: Scene::new(40, 30, Rgba::rgb(255, 255, 255)) }
    }

    #[test]
    fn one_unwritable_png_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        // a regular file where a directory is needed
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"").expect("blocker");
        let charts = vec![
            chart(ChartId::LeagueTrend, blocker.join("league-trend.svg")),
            chart(ChartId::ShotProfile, dir.path().join("shot-profile.svg")),
        ];

        let failed = rasterize(&charts, RenderOptions::default());
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, ChartId::LeagueTrend);
        assert!(dir.path().join("shot-profile.png").exists());
    }

    #[test]
    fn cli_parses_render_flags() {
        let cli = Cli::try_parse_from(["threes", "render", "--png", "--compare", "A", "--compare", "B", "--width", "640"])
            .expect("parse");
        match cli.command {
            Command::Render(args) => {
                assert!(args.png);
                assert_eq!(args.compare, vec!["A", "B"]);
                assert_eq!(args.width, Some(640));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
