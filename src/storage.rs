use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_NAME, PREFS_FILE_NAME};

/// Persisted user preferences
///
/// The compact-view flag is the only thing this app ever writes to disk.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub compact_view: bool,
}

/// Loads and saves preferences in the user's config directory
pub struct PrefsStore {
    config_dir: PathBuf,
}

impl PrefsStore {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        PrefsStore { config_dir }
    }

    /// Store rooted at an explicit directory (used by tests)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        PrefsStore { config_dir }
    }

    fn prefs_path(&self) -> PathBuf {
        self.config_dir.join(PREFS_FILE_NAME)
    }

    /// Read preferences; missing or unparsable files fall back to defaults
    pub fn load(&self) -> Prefs {
        let path = self.prefs_path();
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(prefs) => prefs,
                Err(err) => {
                    tracing::warn!(?path, %err, "Unparsable prefs file, using defaults");
                    Prefs::default()
                }
            },
            Err(_) => Prefs::default(),
        }
    }

    /// Write preferences, creating the config dir on first save
    pub fn save(&self, prefs: &Prefs) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)?;
        }
        let content = serde_json::to_string_pretty(prefs)?;
        fs::write(self.prefs_path(), content)?;
        Ok(())
    }
}

impl Default for PrefsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::with_dir(dir.path().join("nope"));
        assert!(!store.load().compact_view);
    }

    #[test]
    fn test_load_defaults_when_unparsable() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::with_dir(dir.path().to_path_buf());
        fs::write(dir.path().join(PREFS_FILE_NAME), "not json{{").unwrap();
        assert!(!store.load().compact_view);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::with_dir(dir.path().join("cfg"));
        store
            .save(&Prefs { compact_view: true })
            .expect("save prefs");
        assert!(store.load().compact_view);
    }
}
