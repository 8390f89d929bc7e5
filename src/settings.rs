//! User settings.
//!
//! A small JSON file under the platform config directory. Every field has a
//! default so partial or stale files still parse; unknown fields from newer
//! builds are ignored.

use crate::api::models::{ImageSize, TEXT_TO_IMAGE};
use crate::api::{DEFAULT_BACKEND_URL, DEFAULT_IMAGE_API_URL};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn default_settings_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("promptboard").join("settings.json"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeMode::System => "System",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    pub const ALL: [ThemeMode; 3] = [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeMode,
    pub reduce_motion: bool,
    /// Model preselected in the chat panel.
    pub default_model: String,
    pub default_size: ImageSize,
    /// Edge snapping during drags. Holding the modifier key still suppresses
    /// it per drag.
    pub snap_to_edges: bool,
    pub image_api_url: String,
    pub backend_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            reduce_motion: false,
            default_model: TEXT_TO_IMAGE.to_string(),
            default_size: ImageSize::Square,
            snap_to_edges: true,
            image_api_url: DEFAULT_IMAGE_API_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl Settings {
    /// Load from the default path. Missing or unreadable files fall back to
    /// defaults so the app always starts.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory, using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(error) => {
                    warn!(path = %path.display(), %error, "Malformed settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = default_settings_path().context("no config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let tmp = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(tmp.path(), json)?;
        tmp.persist(path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
