//! Local key-value persistence.
//!
//! A single JSON file playing the role browser local storage played for the
//! web client: it holds the encrypted credential payload and the backend
//! session token, nothing else. Writes go through a temp file in the same
//! directory and an atomic rename.

use anyhow::{Context as _, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const STORE_FILE: &str = "storage.json";

/// String-keyed store backed by one JSON file.
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl LocalStore {
    /// Platform location of the store file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("promptboard").join(STORE_FILE))
    }

    /// Load from the default location. A missing file is an empty store;
    /// a corrupt file is logged and treated as empty rather than wedging
    /// startup.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => {
                warn!("No config directory available; local store will not persist");
                Self {
                    path: None,
                    values: BTreeMap::new(),
                }
            }
        }
    }

    /// Load from an explicit path (tests point this at a temp dir).
    pub fn load_from(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt store, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            path: Some(path),
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and persist immediately.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.into(), value.into());
        self.save()
    }

    /// Remove a value and persist. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_none() {
            return Ok(());
        }
        self.save()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn save(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        let parent = path
            .parent()
            .context("store path has no parent directory")?;
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;

        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(tmp.path(), json)?;
        tmp.persist(path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
