//! Persisted settings
//!
//! A single JSON file under the user config dir holding the overlay's last
//! on-screen position. Read once at startup, written once at shutdown. A
//! missing or unreadable file falls back to defaults and never blocks
//! startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Overlay position at last shutdown, in whole screen pixels
    #[serde(default)]
    pub last_position: Option<(i32, i32)>,
}

impl Settings {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    info!(path = %path.display(), "Loaded settings");
                    settings
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Settings file is corrupt, using defaults");
                    Settings::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "No settings file, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings file to {}", path.display()))?;
        Ok(())
    }

    /// Position to construct the overlay at: last persisted, or the fixed
    /// default when none was ever saved.
    pub fn restore_position(&self) -> (i32, i32) {
        self.last_position
            .unwrap_or(crate::constants::overlay::DEFAULT_POSITION)
    }

    pub fn remember_position(&mut self, x: i32, y: i32) {
        self.last_position = Some((x, y));
    }
}
