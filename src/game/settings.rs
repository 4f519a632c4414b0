use log::warn;
use serde::{Deserialize, Serialize};
use std::io;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use super::storage::{load_record, save_record, KeyValueStore, RecordKey};
use crate::error::{BingleError, Result};
use crate::model::seed::DAILY_SEED;

pub const SUPPORTED_GRID_SIZES: RangeInclusive<usize> = 3..=5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    /// The requested seed: `"daily"` or a custom string, before date resolution.
    #[serde(default = "default_seed")]
    pub seed: String,
}

fn default_version() -> u32 {
    1
}
fn default_grid_size() -> usize {
    3
}
fn default_seed() -> String {
    DAILY_SEED.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            grid_size: default_grid_size(),
            seed: default_seed(),
        }
    }
}

pub fn validate_grid_size(grid_size: usize) -> Result<usize> {
    if SUPPORTED_GRID_SIZES.contains(&grid_size) {
        Ok(grid_size)
    } else {
        Err(BingleError::UnsupportedGridSize(grid_size))
    }
}

impl Settings {
    pub fn new(grid_size: usize, seed: &str) -> Self {
        Self {
            grid_size,
            seed: seed.to_string(),
            ..Default::default()
        }
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_record::<Settings, _>(store, RecordKey::Settings) {
            Some(mut settings) => {
                settings.migrate();
                settings
            }
            None => Settings::default(),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> io::Result<()> {
        save_record(store, RecordKey::Settings, self)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    fn migrate(&mut self) {
        if self.version == 0 {
            self.version = 1;
        }
        if !SUPPORTED_GRID_SIZES.contains(&self.grid_size) {
            warn!(target: "settings", "Stored grid size {} unsupported, using default", self.grid_size);
            self.grid_size = default_grid_size();
        }
        if self.seed.trim().is_empty() {
            self.seed = default_seed();
        }
    }

    /// Apply `SEED` and `GRID_SIZE` from the environment.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(seed) = Self::seed_from_env() {
            self.seed = seed;
        }
        if let Some(grid_size) = Self::grid_size_from_env()? {
            self.grid_size = grid_size;
        }
        Ok(self)
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<String> {
        std::env::var("SEED")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn grid_size_from_env() -> Result<Option<usize>> {
        let Ok(raw) = std::env::var("GRID_SIZE") else {
            return Ok(None);
        };
        match raw.trim().parse::<usize>() {
            Ok(grid_size) => validate_grid_size(grid_size).map(Some),
            Err(_) => {
                warn!(target: "settings", "Ignoring non-numeric GRID_SIZE {:?}", raw);
                Ok(None)
            }
        }
    }

    pub fn data_dir_from_env() -> Option<PathBuf> {
        std::env::var_os("BINGLE_DATA_DIR").map(PathBuf::from)
    }

    pub fn catalog_path_from_env() -> Option<PathBuf> {
        std::env::var_os("BINGLE_CATALOG").map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::storage::MemoryStore;
    use serial_test::serial;

    fn clear_env() {
        for var in ["SEED", "GRID_SIZE", "DEBUG", "BINGLE_DATA_DIR", "BINGLE_CATALOG"] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        let settings = Settings::load(&store);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.grid_size, 3);
        assert_eq!(settings.seed, "daily");
    }

    #[test]
    fn test_round_trip_and_partial_records() {
        let mut store = MemoryStore::new();
        let settings = Settings::new(5, "party");
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);

        store.set("settings:global", "{\"gridSize\":4}").unwrap();
        let loaded = Settings::load(&store);
        assert_eq!(loaded.grid_size, 4);
        assert_eq!(loaded.seed, "daily");
        assert_eq!(loaded.version(), 1);
    }

    #[test]
    fn test_migrate_repairs_bad_values() {
        let mut store = MemoryStore::new();
        store
            .set("settings:global", "{\"version\":0,\"gridSize\":9,\"seed\":\"  \"}")
            .unwrap();
        let loaded = Settings::load(&store);
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_new_keeps_current_version() {
        let settings = Settings::new(4, "party");
        assert_eq!(settings.grid_size, 4);
        assert_eq!(settings.seed, "party");
        assert_eq!(settings.version(), Settings::default().version());
    }

    #[test]
    fn test_validate_grid_size() {
        assert_eq!(validate_grid_size(4).unwrap(), 4);
        assert!(matches!(validate_grid_size(2), Err(BingleError::UnsupportedGridSize(2))));
        assert!(validate_grid_size(6).is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("SEED", " party ");
        std::env::set_var("GRID_SIZE", "4");
        let settings = Settings::default().with_env_overrides().unwrap();
        assert_eq!(settings.seed, "party");
        assert_eq!(settings.grid_size, 4);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_grid_size_out_of_range_is_an_error() {
        clear_env();
        std::env::set_var("GRID_SIZE", "7");
        assert!(matches!(
            Settings::default().with_env_overrides(),
            Err(BingleError::UnsupportedGridSize(7))
        ));
        std::env::set_var("GRID_SIZE", "big");
        assert_eq!(Settings::grid_size_from_env().unwrap(), None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_debug_and_paths_from_env() {
        clear_env();
        assert!(!Settings::is_debug_mode());
        assert_eq!(Settings::data_dir_from_env(), None);
        std::env::set_var("DEBUG", "1");
        std::env::set_var("BINGLE_DATA_DIR", "/tmp/bingle-test");
        std::env::set_var("BINGLE_CATALOG", "/tmp/games.json");
        assert!(Settings::is_debug_mode());
        assert_eq!(Settings::data_dir_from_env(), Some(PathBuf::from("/tmp/bingle-test")));
        assert_eq!(Settings::catalog_path_from_env(), Some(PathBuf::from("/tmp/games.json")));
        clear_env();
    }
}
