use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::{FileBackend, StorageError};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "INNERHUE_DATA_DIR";

/// Name of the optional config file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct AppConfig {
    /// Where the JSON slots are stored
    pub data_dir: PathBuf,
    /// Entries shown by recent-history views
    pub recent_limit: usize,
    /// Moods shown in the distribution view
    pub distribution_limit: usize,
    /// Keep everything in memory; nothing survives the process
    pub in_memory: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("innerhue-data"),
            recent_limit: 15,
            distribution_limit: 10,
            in_memory: false,
        }
    }
}

impl AppConfig {
    /// Resolve the data directory (env override, then platform default) and
    /// read `config.toml` from it if present
    pub fn load() -> Result<Self, StorageError> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => FileBackend::default_data_dir()?,
        };
        Ok(Self::load_from_dir(&data_dir))
    }

    /// Read `config.toml` from `data_dir`, falling back to defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE_NAME);

        let mut config = match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring invalid config {:?}: {}", path, e);
                    AppConfig::default()
                }
            },
            Err(_) => AppConfig::default(),
        };

        // The file lives inside the data dir, so it cannot move it elsewhere
        // unless it says so explicitly
        if config.data_dir == AppConfig::default().data_dir {
            config.data_dir = data_dir.to_path_buf();
        }
        config
    }
}
