use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "MUSIC_CONTROLS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub ui_fps: u32,
    pub seek_step_ms: u64,
    pub transparent_background: bool,
    pub database_path: Option<PathBuf>,
    pub music_folder: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "mocha".to_string(),
            ui_fps: 60,
            seek_step_ms: 5_000,
            transparent_background: false,
            database_path: None,
            music_folder: None,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        match toml::from_str(&raw) {
            Ok(cfg) => Ok(cfg),
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {e}", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Where the like database lives unless `database_path` overrides it.
    pub fn resolve_database_path(&self) -> PathBuf {
        if let Some(p) = &self.database_path {
            return p.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join("library.db"),
            None => PathBuf::from("library.db"),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(p));
        }
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "cli-music-controls")
}
