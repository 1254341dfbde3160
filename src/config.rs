//! Engine configuration persistence
//!
//! Stores user preferences in `~/.config/panel-layout/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::{FileStorage, LayoutOptions};
use crate::theme::ThemeDefaults;

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ambient theme id ("light" or "dark")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Renumber panel order right after a visibility toggle
    #[serde(default = "default_eager_renumber")]
    pub eager_renumber: bool,

    /// Directory for the layout record (defaults to the config dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_eager_renumber() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            eager_renumber: default_eager_renumber(),
            storage_dir: None,
        }
    }
}

impl EngineConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Resolved ambient theme; unknown ids fall back to the light theme
    pub fn theme_defaults(&self) -> ThemeDefaults {
        ThemeDefaults::by_id(&self.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using light", self.theme);
            ThemeDefaults::light()
        })
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            eager_renumber: self.eager_renumber,
        }
    }

    /// File storage for the layout record
    pub fn storage(&self) -> Option<FileStorage> {
        match &self.storage_dir {
            Some(dir) => Some(FileStorage::new(dir)),
            None => FileStorage::in_config_dir(),
        }
    }
}
