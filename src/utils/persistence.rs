//! JSON persistence for settings and the leaderboard.
//!
//! The session talks to storage only through the [`Store`] trait. The binary
//! uses [`JsonStore`] (two pretty-printed files under the data directory);
//! tests use [`MemoryStore`].

use crate::core::constants::{DATA_DIR_ENV, DATA_DIR_NAME, LEADERBOARD_FILE, SETTINGS_FILE};
use crate::core::error::StoreError;
use crate::leaderboard::LeaderboardEntry;
use crate::settings::Settings;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Storage port for the two persisted records.
///
/// A missing record loads as its default. A malformed record is an error; the
/// `*_or_default` helpers turn that into a logged fallback.
pub trait Store {
    fn load_settings(&self) -> Result<Settings, StoreError>;
    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError>;
    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError>;
}

impl<T: Store + ?Sized> Store for Box<T> {
    fn load_settings(&self) -> Result<Settings, StoreError> {
        (**self).load_settings()
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        (**self).save_settings(settings)
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        (**self).load_leaderboard()
    }

    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        (**self).save_leaderboard(entries)
    }
}

/// Load settings, falling back to defaults if storage is unusable.
pub fn load_settings_or_default(store: &dyn Store) -> Settings {
    store.load_settings().unwrap_or_else(|err| {
        warn!("settings unavailable, using defaults: {err}");
        Settings::default()
    })
}

/// Load the leaderboard, falling back to an empty one if storage is unusable.
pub fn load_leaderboard_or_default(store: &dyn Store) -> Vec<LeaderboardEntry> {
    store.load_leaderboard().unwrap_or_else(|err| {
        warn!("leaderboard unavailable, starting empty: {err}");
        Vec::new()
    })
}

/// Resolve the data directory: `$SNAKE_ARCADE_HOME`, else `~/.snake-arcade/`.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = dirs::home_dir().ok_or(StoreError::NoDataDir)?;
    Ok(home_dir.join(DATA_DIR_NAME))
}

/// Read a JSON file, returning `None` if it does not exist.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// File-backed store: `settings.json` and `leaderboard.json` in one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open the store in the default data directory, creating it if needed.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(data_dir()?)
    }

    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    fn leaderboard_path(&self) -> PathBuf {
        self.dir.join(LEADERBOARD_FILE)
    }
}

impl Store for JsonStore {
    fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(load_json(&self.settings_path())?.unwrap_or_default())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        save_json(&self.settings_path(), settings)
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(load_json(&self.leaderboard_path())?.unwrap_or_default())
    }

    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        save_json(&self.leaderboard_path(), entries)
    }
}

/// In-memory store with write counters, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub settings: Option<Settings>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub settings_writes: usize,
    pub leaderboard_writes: usize,
    /// When set, every save fails with an I/O error.
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Some(settings),
            ..Self::default()
        }
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only").into());
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.settings.unwrap_or_default())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.check_writable()?;
        self.settings = Some(*settings);
        self.settings_writes += 1;
        Ok(())
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.leaderboard.clone())
    }

    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.leaderboard = entries.to_vec();
        self.leaderboard_writes += 1;
        Ok(())
    }
}
