use crate::config::settings::Settings;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{OverlayError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// JSON-backed settings persistence
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform's per-user config location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// `<config dir>/ping-overlay/settings.json`
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| OverlayError::Config("could not find config directory".into()))?;
        path.push(CONFIG_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until settings have been saved at least once
    pub fn is_first_run(&self) -> bool {
        !self.path.exists()
    }

    /// Load persisted settings, merged over defaults.
    ///
    /// Never fails: a missing, unreadable, corrupt or invalid document yields
    /// the defaults so the overlay can always start.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => {
                info!(path = %self.path.display(), "Settings loaded");
                settings
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "No settings file, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!(error = %e, "Falling back to default settings");
                Settings::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.load_error(e))?;
        let settings: Settings = serde_json::from_str(&content).map_err(|e| self.load_error(e))?;
        let settings = settings.validate().map_err(|e| self.load_error(e))?;
        Ok(Some(settings))
    }

    fn load_error(&self, reason: impl ToString) -> OverlayError {
        OverlayError::ConfigLoad {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn save_error(&self, reason: impl ToString) -> OverlayError {
        OverlayError::ConfigSave {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    /// Write the full document.
    ///
    /// The document is written to a sibling temp file and renamed into place,
    /// so a crash mid-write leaves the previous file intact.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.save_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(settings).map_err(|e| self.save_error(e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| self.save_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.save_error(e)
        })?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Restore and persist the defaults
    pub fn reset(&self) -> Result<Settings> {
        let defaults = Settings::default();
        self.save(&defaults)?;
        info!(path = %self.path.display(), "Settings reset to defaults");
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Corner;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("nested").join("settings.json"))
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.is_first_run());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let settings = Settings {
            host: "1.1.1.1".to_string(),
            green_threshold: 20,
            yellow_threshold: 80,
            show_on_startup: false,
            click_through: true,
            position: Corner::BottomRight,
        };

        store.save(&settings)?;
        assert!(!store.is_first_run());
        assert_eq!(store.load(), settings);

        // Saving what was loaded produces the same document
        let first = fs::read_to_string(store.path())?;
        store.save(&store.load())?;
        let second = fs::read_to_string(store.path())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_corrupt_file_gives_defaults() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&Settings::default())?;
        fs::write(store.path(), "{ not json")?;
        assert_eq!(store.load(), Settings::default());
        Ok(())
    }

    #[test]
    fn test_invalid_thresholds_on_disk_give_defaults() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&Settings::default())?;
        fs::write(
            store.path(),
            r#"{"host": "example.org", "green_threshold": 300, "yellow_threshold": 100}"#,
        )?;
        assert_eq!(store.load(), Settings::default());
        Ok(())
    }

    #[test]
    fn test_missing_keys_merge_with_defaults() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&Settings::default())?;
        fs::write(store.path(), r#"{"host": "example.org", "green_threshold": 30}"#)?;

        let loaded = store.load();
        assert_eq!(loaded.host, "example.org");
        assert_eq!(loaded.green_threshold, 30);
        assert_eq!(loaded.yellow_threshold, 100);
        assert!(loaded.show_on_startup);
        assert_eq!(loaded.position, Corner::TopLeft);
        Ok(())
    }

    #[test]
    fn test_reset_persists_defaults() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&Settings {
            host: "example.org".to_string(),
            ..Settings::default()
        })?;

        let reset = store.reset()?;
        assert_eq!(reset, Settings::default());
        assert_eq!(store.load(), Settings::default());
        Ok(())
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("settings.json");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let store = ConfigStore::new(&path);

        let result = store.save(&Settings::default());
        assert!(matches!(result, Err(OverlayError::ConfigSave { .. })));
    }

    #[test]
    fn test_default_path_names_app() {
        if let Ok(path) = ConfigStore::default_path() {
            let path = path.to_string_lossy().to_string();
            assert!(path.contains("ping-overlay"));
            assert!(path.ends_with("settings.json"));
        }
    }
}
