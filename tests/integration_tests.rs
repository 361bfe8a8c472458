//! Integration tests for keystash
//!
//! End-to-end flows combining the store, naming overrides, enumeration,
//! backup, and selective persistence.

use std::collections::HashSet;

use keystash::persist_fields;
use keystash::projection::AutoSave;
use keystash::{RecordStore, StoreConfig};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

// =============================================================================
// Fixture Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
struct Profile {
    name: String,
    theme: String,
}

#[derive(Debug, Default, PartialEq)]
struct GameState {
    checkpoint: u32,
    unlocked: Vec<String>,
    frame_counter: u64, // transient, never saved
}

persist_fields!(GameState { checkpoint, unlocked });

// =============================================================================
// End-to-End Flows
// =============================================================================

#[test]
fn test_full_store_lifecycle() {
    let temp = TempDir::new().unwrap();
    let store = RecordStore::open(StoreConfig::builder().base_dir(temp.path()).build()).unwrap();

    // Save under two keys, one with a custom name
    let profile = Profile {
        name: "alice".to_string(),
        theme: "dark".to_string(),
    };
    store.save(&profile, "profile").unwrap();
    store.set_file_name("session", "session.dat").unwrap();
    store.save(&vec![1u32, 2, 3], "session").unwrap();

    // Enumeration yields keys, not file names
    let keys = store.list_keys().unwrap();
    let expected: HashSet<String> = ["profile", "session"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(keys, expected);

    // Backup mirrors the directory
    let backup = temp.path().join("backup");
    assert_eq!(store.backup_to(&backup).unwrap(), 2);
    assert!(backup.join("profile.json").exists());
    assert!(backup.join("session.dat").exists());

    // Delete one key; the backup keeps its copy
    store.delete("session").unwrap();
    assert!(!store.exists("session"));
    assert!(backup.join("session.dat").exists());

    // The surviving record still round-trips
    let loaded: Profile = store.load("profile").unwrap().unwrap();
    assert_eq!(loaded, profile);
}

#[test]
fn test_selective_persistence_survives_process_restart() {
    let temp = TempDir::new().unwrap();

    // First "process": play, save
    {
        let auto = AutoSave::open(temp.path()).unwrap();
        let state = GameState {
            checkpoint: 7,
            unlocked: vec!["double_jump".to_string()],
            frame_counter: 123_456,
        };
        auto.save(&state).unwrap();
    }

    // Second "process": fresh handle, same directory
    {
        let auto = AutoSave::open(temp.path()).unwrap();
        let state: GameState = auto.load().unwrap();

        assert_eq!(state.checkpoint, 7);
        assert_eq!(state.unlocked, vec!["double_jump".to_string()]);
        // Transient state starts over
        assert_eq!(state.frame_counter, 0);
    }
}

#[test]
fn test_overrides_are_not_persisted_across_handles() {
    let temp = TempDir::new().unwrap();

    {
        let store = RecordStore::open_path(temp.path()).unwrap();
        store.set_file_name("save", "slot1.dat").unwrap();
        store.save(&42u32, "save").unwrap();
    }

    // A new store has an empty override table: the old record is invisible
    // under its key until the caller re-registers the mapping
    let store = RecordStore::open_path(temp.path()).unwrap();
    assert!(!store.exists("save"));

    store.set_file_name("save", "slot1.dat").unwrap();
    assert!(store.exists("save"));
    assert_eq!(store.load::<u32>("save").unwrap(), Some(42));
}

#[tokio::test]
async fn test_mixed_sync_async_access() {
    let temp = TempDir::new().unwrap();
    let store = RecordStore::open_path(temp.path()).unwrap();

    // A record written synchronously reads back through the async path,
    // and vice versa — both variants share resolution and encoding
    store.save(&"sync write".to_string(), "note").unwrap();
    let via_async: String = store.load_async("note").await.unwrap().unwrap();
    assert_eq!(via_async, "sync write");

    store
        .save_async(&"async write".to_string(), "note")
        .await
        .unwrap();
    let via_sync: String = store.load("note").unwrap().unwrap();
    assert_eq!(via_sync, "async write");
}
