//! Windowed viewer for a 32x32 tile level.
//!
//! Usage: `tile-viewer --atlas tiles.png --scene level.json [--config render.json]`
//!
//! Keys: arrows move the chip (recording its trail), Backspace rewinds one move, B toggles
//! background peeking, H toggles the trail, N toggles creature numbers, Esc quits.

mod app;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tile_engine::{FullscreenPanel, RenderConfig, TileAtlas};

use app::ViewerState;
use scene::Scene;

#[derive(Debug, Default)]
struct Args {
    atlas: Option<PathBuf>,
    scene: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut out = Args::default();
    while let Some(flag) = args.next() {
        let slot = match flag.as_str() {
            "--atlas" => &mut out.atlas,
            "--scene" => &mut out.scene,
            "--config" => &mut out.config,
            other => bail!("unknown argument {other:?}"),
        };
        let value = args
            .next()
            .with_context(|| format!("{flag} needs a value"))?;
        *slot = Some(PathBuf::from(value));
    }
    Ok(out)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let atlas_path = args.atlas.context("missing --atlas <png>")?;
    let scene_path = args.scene.context("missing --scene <json>")?;

    let config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    }
    .with_env_overrides();
    config.validate().context("render config")?;

    let atlas = TileAtlas::open(&atlas_path, &config)
        .with_context(|| format!("loading tile atlas {}", atlas_path.display()))?;
    let scene = Scene::load(&scene_path)?;
    info!(
        atlas = %atlas_path.display(),
        scene = %scene_path.display(),
        "loaded"
    );

    let panel = FullscreenPanel::new(atlas, config, scene.transparency());
    app::run("Tile Viewer", ViewerState::new(panel, scene))
}
