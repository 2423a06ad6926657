//! Program configuration persisted between sessions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SettingsResult;
use crate::parameters::{read_json, write_json};

pub const APP_CONFIG_FILE: &str = "app_config.json";

/// Program configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ship file to reopen on start; empty when none.
    pub last_file_path: String,
}

impl AppConfig {
    /// Load config from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        read_json(path)
    }

    /// Load config from file, falling back to defaults.
    ///
    /// A missing file is expected on first start and only logged at info
    /// level; a file that exists but cannot be decoded is logged as an error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) if err.is_not_found() => {
                tracing::info!("No app config yet: {}", err);
                Self::default()
            }
            Err(err) => {
                tracing::error!("{}", err);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        write_json(path, self)
    }

    /// The last opened ship file, if any.
    pub fn last_file(&self) -> Option<PathBuf> {
        if self.last_file_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.last_file_path))
        }
    }

    /// Remember `path` as the last opened file.
    pub fn set_last_file(&mut self, path: &Path) {
        self.last_file_path = path.to_string_lossy().into_owned();
    }
}
