mod app;
mod data;
mod playback;
mod ui;
mod utils;

use anyhow::{Context, Result};
use data::config::Config;
use data::database::Database;
use data::likes::LikeStore;
use playback::local_player::LocalPlayer;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load_or_default()?;
    if let Some(path) = Config::default_path() {
        if !path.exists() {
            if let Err(e) = config.save_to(&path) {
                log::warn!("could not write default config to {}: {e:#}", path.display());
            }
        }
    }
    let theme = ui::theme::Theme::load(&config.theme);

    let db_path = config.resolve_database_path();
    let db = Database::open(&db_path).with_context(|| format!("opening {}", db_path.display()))?;
    let likes = LikeStore::new(db);

    let mut player = match LocalPlayer::new() {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("playback disabled: {e}");
            None
        }
    };

    let folder = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.music_folder.clone());
    if let (Some(p), Some(folder)) = (player.as_mut(), folder.as_deref()) {
        let n = p
            .load_folder(folder)
            .with_context(|| format!("loading {}", folder.display()))?;
        log::info!("queued {n} tracks from {}", folder.display());
    }

    let mut app = app::state::AppState::new(config, theme);
    app::event_loop::run(&mut app, player, &likes)
}
