//! Startup configuration for strongroom_app.
//!
//! Reads an optional `strongroom.ron` next to the executable's working
//! directory. Every field has a default, so a missing file is normal and a
//! broken one degrades to the defaults with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use client_logging::{client_info, client_warn};
use serde::Deserialize;
use strongroom_client::DEFAULT_BASE_URL;

const CONFIG_FILENAME: &str = "strongroom.ron";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub download_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            download_dir: PathBuf::from("downloads"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    download_dir: Option<PathBuf>,
}

pub(crate) fn load(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            client_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    let parsed: ConfigFile = match ron::from_str(&content) {
        Ok(parsed) => parsed,
        Err(err) => {
            client_warn!("Failed to parse config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    let defaults = AppConfig::default();
    let config = AppConfig {
        base_url: parsed.base_url.unwrap_or(defaults.base_url),
        download_dir: parsed.download_dir.unwrap_or(defaults.download_dir),
    };
    client_info!("Loaded config from {:?}", path);
    config
}
