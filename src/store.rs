//! Persistent key-value store backing the in-memory state.
//!
//! This module provides the `Store` adapter that mirrors application state
//! to JSON files on disk, one file per logical key. It is a mirror, never
//! the authority: `get` falls back to a caller-supplied default when the
//! key is absent or unreadable, and `set` is best-effort - a failed write
//! is logged and dropped, never surfaced.

use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// Key for the cached character collection.
pub const CHARACTERS_KEY: &str = "characters";

/// Key for the persisted name filter.
pub const FILTER_BY_NAME_KEY: &str = "filterbyName";

/// Key for the persisted species filter.
pub const FILTER_BY_SPECIES_KEY: &str = "filterbySpecies";

pub struct Store {
    store_dir: PathBuf,
}

impl Store {
    pub fn new(store_dir: PathBuf) -> Self {
        if let Err(e) = std::fs::create_dir_all(&store_dir) {
            debug!(dir = %store_dir.display(), error = %e, "Failed to create store directory");
        }
        Self { store_dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.store_dir.join(format!("{}.json", key))
    }

    /// Read the value stored under `key`, or `default` when the key is
    /// missing or its contents fail to deserialize. Never errors.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.key_path(key);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(key, error = %e, "Store miss, using default");
                return default;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "Store entry unreadable, using default");
                default
            }
        }
    }

    /// Persist `value` under `key`. Best-effort: serialization or write
    /// failures are logged and dropped.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let contents = match serde_json::to_string_pretty(value) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(key, error = %e, "Failed to serialize store entry");
                return;
            }
        };

        if let Err(e) = std::fs::write(self.key_path(key), contents) {
            debug!(key, error = %e, "Failed to write store entry");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Character;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Store::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_round_trip_string() {
        let (_dir, store) = temp_store();
        store.set(FILTER_BY_NAME_KEY, &"rick".to_string());
        assert_eq!(store.get(FILTER_BY_NAME_KEY, String::new()), "rick");
    }

    #[test]
    fn test_round_trip_characters() {
        let (_dir, store) = temp_store();
        let characters = vec![
            Character {
                id: 1,
                name: "Rick".to_string(),
                species: "Human".to_string(),
                ..Default::default()
            },
            Character {
                id: 2,
                name: "Morty".to_string(),
                species: "Human".to_string(),
                ..Default::default()
            },
        ];
        store.set(CHARACTERS_KEY, &characters);
        let loaded: Vec<Character> = store.get(CHARACTERS_KEY, Vec::new());
        assert_eq!(loaded, characters);
    }

    #[test]
    fn test_get_missing_key_returns_default() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("nonexistent", "fallback".to_string()), "fallback");
        let empty: Vec<Character> = store.get(CHARACTERS_KEY, Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_get_corrupt_entry_returns_default() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("characters.json"), "not json{{{")
            .expect("Failed to write corrupt file");
        let loaded: Vec<Character> = store.get(CHARACTERS_KEY, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let (_dir, store) = temp_store();
        store.set(FILTER_BY_SPECIES_KEY, &"Human".to_string());
        store.set(FILTER_BY_SPECIES_KEY, &"Alien".to_string());
        assert_eq!(store.get(FILTER_BY_SPECIES_KEY, String::new()), "Alien");
    }
}
