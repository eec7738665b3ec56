//! Game settings and preferences
//!
//! Persisted as a small JSON document. The game reads them only at session
//! boundaries (start, restart, game over).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StoreError;
use crate::theme::Theme;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Colour theme
    #[serde(deserialize_with = "theme_or_default")]
    pub theme: Theme,
    /// Best score ever recorded
    pub high_score: u32,

    // === Visual Effects ===
    /// Screen shake on eat/crash
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Classic,
            high_score: 0,
            screen_shake: true,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }
}

/// Unknown theme names load as the default theme instead of failing the
/// whole document
fn theme_or_default<'de, D>(deserializer: D) -> Result<Theme, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(Theme::from_str(&name).unwrap_or_else(|| {
        log::warn!("Unknown theme {:?}, using {}", name, Theme::default().as_str());
        Theme::default()
    }))
}

/// Where preferences live. Implementations may fail; callers are expected to
/// fall back to defaults rather than abort.
pub trait SettingsStore {
    fn load(&self) -> Result<Settings, StoreError>;

    fn store(&mut self, settings: &Settings) -> Result<(), StoreError>;

    fn high_score(&self) -> Result<u32, StoreError> {
        Ok(self.load()?.high_score)
    }

    /// Persist `candidate` only if it beats the stored score.
    /// Returns whether it was written.
    fn save_high_score(&mut self, candidate: u32) -> Result<bool, StoreError> {
        let mut settings = self.load()?;
        if candidate <= settings.high_score {
            return Ok(false);
        }
        settings.high_score = candidate;
        self.store(&settings)?;
        Ok(true)
    }

    fn theme(&self) -> Result<Theme, StoreError> {
        Ok(self.load()?.theme)
    }

    fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        let mut settings = self.load()?;
        settings.theme = theme;
        self.store(&settings)
    }
}

/// In-process store, nothing touches disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub settings: Settings,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, StoreError> {
        Ok(self.settings.clone())
    }

    fn store(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.settings = settings.clone();
        Ok(())
    }
}

/// JSON file on disk. Writes go to a sibling temp file that is then renamed
/// over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Settings, StoreError> {
        if !self.path.exists() {
            log::info!("No settings at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }
        let json = fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    fn store(&mut self, settings: &Settings) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "snake-arcade-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_save_high_score_only_when_beaten() {
        let mut store = MemoryStore::default();
        assert!(store.save_high_score(50).unwrap());
        assert!(!store.save_high_score(50).unwrap());
        assert!(!store.save_high_score(20).unwrap());
        assert_eq!(store.high_score().unwrap(), 50);
        assert!(store.save_high_score(60).unwrap());
        assert_eq!(store.high_score().unwrap(), 60);
    }

    #[test]
    fn test_theme_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.theme().unwrap(), Theme::Classic);
        store.set_theme(Theme::Desert).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Desert);
    }

    #[test]
    fn test_effective_screen_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_partial_and_unknown_fields() {
        let settings: Settings =
            serde_json::from_str(r#"{"theme":"sparkle","high_score":120}"#).unwrap();
        assert_eq!(settings.theme, Theme::Classic);
        assert_eq!(settings.high_score, 120);
        assert!(settings.particles);

        let settings: Settings = serde_json::from_str(r#"{"theme":"neon"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Neon);
        assert_eq!(settings.high_score, 0);
    }

    #[test]
    fn test_json_file_store() {
        let path = scratch_path("store");
        let _ = fs::remove_file(&path);
        let mut store = JsonFileStore::new(&path);

        // Missing file reads as defaults
        assert_eq!(store.load().unwrap(), Settings::default());

        store.set_theme(Theme::Neon).unwrap();
        assert!(store.save_high_score(230).unwrap());

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.theme().unwrap(), Theme::Neon);
        assert_eq!(reopened.high_score().unwrap(), 230);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_json_file_store_corrupt() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
        let _ = fs::remove_file(&path);
    }
}
