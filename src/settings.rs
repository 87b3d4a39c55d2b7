//! Player preferences and their key/value persistence.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_TARGET_SCORE, KEY_CATEGORY, KEY_SOUND_ENABLED, KEY_TARGET_SCORE, MIN_TARGET_SCORE,
};
use crate::error::{ConfigError, GameResult};
use crate::symbol::Category;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub target_score: u32,
    pub category: Category,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            category: Category::Letters,
            sound_enabled: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_score < MIN_TARGET_SCORE {
            return Err(ConfigError::TargetScoreTooLow(self.target_score.into()));
        }
        Ok(())
    }

    /// Clamps out-of-range values so the session never sees a zero goal.
    pub fn sanitized(mut self) -> Self {
        if let Err(err) = self.validate() {
            tracing::warn!(%err, "clamping target score to {MIN_TARGET_SCORE}");
            self.target_score = MIN_TARGET_SCORE;
        }
        self
    }

    /// Builds settings from raw form input. Non-numeric goals are rejected; numeric goals
    /// below the minimum are clamped.
    pub fn from_form(target: &str, category: &str, sound_enabled: bool) -> Result<Self, ConfigError> {
        let raw: i64 = target
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTargetScore(target.to_string()))?;
        let target_score = raw.clamp(MIN_TARGET_SCORE.into(), u32::MAX.into()) as u32;
        Ok(Self {
            target_score,
            category: category.parse()?,
            sound_enabled,
        })
    }
}

/// Flat string key/value persistence (browser `localStorage`, or memory).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> GameResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> GameResult<()>;
}

/// In-memory store for headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> GameResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes [`Settings`] as three independent keys, each JSON-encoded.
pub struct SettingsStore {
    backend: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Loads each key independently; missing or unreadable keys keep their default.
    pub fn load(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            target_score: self.read(KEY_TARGET_SCORE).unwrap_or(defaults.target_score),
            category: self.read(KEY_CATEGORY).unwrap_or(defaults.category),
            sound_enabled: self.read(KEY_SOUND_ENABLED).unwrap_or(defaults.sound_enabled),
        }
        .sanitized()
    }

    /// Persists the sanitized settings and returns what was written.
    pub fn save(&mut self, settings: &Settings) -> GameResult<Settings> {
        let settings = settings.sanitized();
        self.write(KEY_TARGET_SCORE, &settings.target_score)?;
        self.write(KEY_CATEGORY, &settings.category)?;
        self.write(KEY_SOUND_ENABLED, &settings.sound_enabled)?;
        tracing::debug!(?settings, "settings saved");
        Ok(settings)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(key, %err, "could not read setting");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, raw = %raw, %err, "ignoring corrupt setting");
                None
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> GameResult<()> {
        let encoded = serde_json::to_string(value)?;
        self.backend.set(key, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_defaults() {
        let store = SettingsStore::in_memory();
        assert_eq!(
            store.load(),
            Settings {
                target_score: 10,
                category: Category::Letters,
                sound_enabled: true
            }
        );
    }

    #[test]
    fn save_clamps_zero_target_before_persisting() {
        let mut store = SettingsStore::in_memory();
        let written = store
            .save(&Settings {
                target_score: 0,
                category: Category::Numbers,
                sound_enabled: false,
            })
            .unwrap();
        assert_eq!(written.target_score, 1);
        let loaded = store.load();
        assert_eq!(loaded.target_score, 1);
        assert_eq!(loaded.category, Category::Numbers);
        assert!(!loaded.sound_enabled);
    }

    #[test]
    fn keys_are_stored_as_flat_scalars() {
        let mut backend = MemoryStore::new();
        backend.set(KEY_TARGET_SCORE, "7").unwrap();
        backend.set(KEY_CATEGORY, "\"numbers\"").unwrap();
        let store = SettingsStore::new(backend);
        let loaded = store.load();
        assert_eq!(loaded.target_score, 7);
        assert_eq!(loaded.category, Category::Numbers);
        assert!(loaded.sound_enabled);
    }

    #[test]
    fn corrupt_key_falls_back_to_its_default_only() {
        let mut backend = MemoryStore::new();
        backend.set(KEY_TARGET_SCORE, "lots").unwrap();
        backend.set(KEY_SOUND_ENABLED, "false").unwrap();
        let loaded = SettingsStore::new(backend).load();
        assert_eq!(loaded.target_score, DEFAULT_TARGET_SCORE);
        assert!(!loaded.sound_enabled);
    }

    #[test]
    fn persisted_zero_is_clamped_on_load() {
        let mut backend = MemoryStore::new();
        backend.set(KEY_TARGET_SCORE, "0").unwrap();
        assert_eq!(SettingsStore::new(backend).load().target_score, 1);
    }

    #[test]
    fn form_input_clamps_low_goals_and_rejects_garbage() {
        let s = Settings::from_form("0", "letters", true).unwrap();
        assert_eq!(s.target_score, 1);
        let s = Settings::from_form("-4", "numbers", false).unwrap();
        assert_eq!(s.target_score, 1);
        assert_eq!(s.category, Category::Numbers);
        assert_eq!(
            Settings::from_form("ten", "letters", true),
            Err(ConfigError::InvalidTargetScore("ten".into()))
        );
        assert!(matches!(
            Settings::from_form("5", "symbols", true),
            Err(ConfigError::UnknownCategory(_))
        ));
    }

    #[test]
    fn validate_flags_zero_target() {
        let s = Settings {
            target_score: 0,
            ..Settings::default()
        };
        assert_eq!(s.validate(), Err(ConfigError::TargetScoreTooLow(0)));
        assert_eq!(s.sanitized().target_score, 1);
    }
}
