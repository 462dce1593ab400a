mod entities;
mod game;
mod sprites;
mod start_screen;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bugdash_engine::assets::{FileLoader, Resources};
use bugdash_engine::config::EngineConfig;
use bugdash_engine::logging::init_logging;
use bugdash_engine::window::Runtime;

use game::BugDash;

/// Start screen time before play begins without input.
const ATTRACT_DELAY: Duration = Duration::from_secs(4);

fn main() -> anyhow::Result<()> {
    let config = EngineConfig::new("Bug Dash")
        .surface_size(808, 808)
        .max_frame_delta(Duration::from_millis(250));
    init_logging(config.logging.clone());

    let root = asset_root();
    anyhow::ensure!(root.is_dir(), "asset directory {} not found", root.display());
    log::info!("loading assets from {}", root.display());

    let assets = Arc::new(Resources::new(FileLoader::new(root)));
    let game = BugDash::new(start_screen::load_system_font(), Some(ATTRACT_DELAY));

    Runtime::run(config, assets, game).context("bugdash exited with an error")
}

/// `BUGDASH_ASSETS`, else the `assets/` directory next to this crate.
fn asset_root() -> PathBuf {
    std::env::var_os("BUGDASH_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")))
}
