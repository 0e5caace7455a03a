//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/richpad/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Shown while the document is empty
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Choices offered by the font family picker
    #[serde(default = "default_font_families")]
    pub font_families: Vec<String>,
    /// Choices offered by the font size picker
    #[serde(default = "default_font_sizes")]
    pub font_sizes: Vec<String>,
    #[serde(default = "default_video_width")]
    pub video_width: u32,
    #[serde(default = "default_video_height")]
    pub video_height: u32,
    /// Upper bound accepted by the table prompt
    #[serde(default = "default_table_max")]
    pub table_max_rows: usize,
    #[serde(default = "default_table_max")]
    pub table_max_cols: usize,
    /// Undo depth; 0 disables history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Reading speed for the reading-time estimate
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: usize,
}

fn default_placeholder() -> String {
    "Start writing...".to_string()
}

fn default_font_families() -> Vec<String> {
    ["Arial", "Georgia", "Helvetica", "Times New Roman", "Courier New", "Verdana"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_font_sizes() -> Vec<String> {
    ["12px", "14px", "16px", "18px", "24px", "32px"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_video_width() -> u32 {
    crate::model::Embed::DEFAULT_WIDTH
}

fn default_video_height() -> u32 {
    crate::model::Embed::DEFAULT_HEIGHT
}

fn default_table_max() -> usize {
    20
}

fn default_history_limit() -> usize {
    100
}

fn default_words_per_minute() -> usize {
    200
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            font_families: default_font_families(),
            font_sizes: default_font_sizes(),
            video_width: default_video_width(),
            video_height: default_video_height(),
            table_max_rows: default_table_max(),
            table_max_cols: default_table_max(),
            history_limit: default_history_limit(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl EditorConfig {
    /// Load config from the user config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or broken files yield defaults
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

    /// Save config to the user config dir
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            crate::config_paths::ensure_dir(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
