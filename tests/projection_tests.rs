//! Projection Tests
//!
//! Tests verify:
//! - Marked fields project into a flat record, unmarked fields are excluded
//! - Overlay restores marked fields and leaves the rest at defaults
//! - Partial records overlay cleanly (missing entries keep defaults)
//! - Type-mismatched entries fail the overlay (strict policy)
//! - AutoSave persistence keyed by type, sync and async

use keystash::persist_fields;
use keystash::projection::{overlay, project, AutoSave, Record};
use keystash::StoreError;
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Fixture Types
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct PlayerData {
    name: String,
    level: u32,
    inventory: Vec<String>,
    temp_health: u32, // not persisted
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            level: 1,
            inventory: Vec::new(),
            temp_health: 100,
        }
    }
}

persist_fields!(PlayerData { name, level, inventory });

fn sample_player() -> PlayerData {
    PlayerData {
        name: "Grok".to_string(),
        level: 50,
        inventory: vec!["sword".to_string(), "potion".to_string()],
        temp_health: 999,
    }
}

// =============================================================================
// Projection Tests
// =============================================================================

#[test]
fn test_project_includes_marked_fields() {
    let record = project(&sample_player()).unwrap();

    assert_eq!(record.get("name"), Some(&json!("Grok")));
    assert_eq!(record.get("level"), Some(&json!(50)));
    assert_eq!(record.get("inventory"), Some(&json!(["sword", "potion"])));
}

#[test]
fn test_project_excludes_unmarked_fields() {
    let record = project(&sample_player()).unwrap();

    assert!(!record.contains_key("temp_health"));
    assert_eq!(record.len(), 3);
}

// =============================================================================
// Overlay Tests
// =============================================================================

#[test]
fn test_overlay_round_trip_fidelity() {
    let player = sample_player();
    let record = project(&player).unwrap();

    let restored = overlay(PlayerData::default(), &record).unwrap();

    // Marked fields restored exactly
    assert_eq!(restored.name, player.name);
    assert_eq!(restored.level, player.level);
    assert_eq!(restored.inventory, player.inventory);

    // Unmarked field keeps the default, not the saved instance's value
    assert_eq!(restored.temp_health, 100);
}

#[test]
fn test_overlay_partial_record_keeps_defaults() {
    let mut record = Record::new();
    record.insert("level".to_string(), json!(12));

    let restored = overlay(PlayerData::default(), &record).unwrap();

    assert_eq!(restored.level, 12);
    assert_eq!(restored.name, "Hero");
    assert!(restored.inventory.is_empty());
}

#[test]
fn test_overlay_ignores_unknown_entries() {
    let mut record = Record::new();
    record.insert("level".to_string(), json!(3));
    record.insert("not_a_field".to_string(), json!("ignored"));

    let restored = overlay(PlayerData::default(), &record).unwrap();
    assert_eq!(restored.level, 3);
}

#[test]
fn test_overlay_type_mismatch_is_error() {
    let mut record = Record::new();
    record.insert("level".to_string(), json!("not a number"));

    let result = overlay(PlayerData::default(), &record);
    assert!(matches!(result, Err(StoreError::Decode(_))));
}

#[test]
fn test_binding_set_identical_between_project_and_overlay() {
    use keystash::Persist;

    let names: Vec<&str> = PlayerData::bindings().iter().map(|b| b.name).collect();
    assert_eq!(names, vec!["name", "level", "inventory"]);

    // project emits exactly the binding set
    let record = project(&PlayerData::default()).unwrap();
    let mut keys: Vec<&str> = record.keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();
    let mut sorted_names = names.clone();
    sorted_names.sort_unstable();
    assert_eq!(keys, sorted_names);
}

// =============================================================================
// AutoSave Tests
// =============================================================================

#[test]
fn test_autosave_round_trip() {
    let temp = TempDir::new().unwrap();
    let auto = AutoSave::open(temp.path()).unwrap();

    auto.save(&sample_player()).unwrap();
    let restored: PlayerData = auto.load().unwrap();

    assert_eq!(restored.name, "Grok");
    assert_eq!(restored.level, 50);
    assert_eq!(restored.temp_health, 100);
}

#[test]
fn test_autosave_load_without_record_yields_default() {
    let temp = TempDir::new().unwrap();
    let auto = AutoSave::open(temp.path()).unwrap();

    let player: PlayerData = auto.load().unwrap();
    assert_eq!(player, PlayerData::default());
}

#[test]
fn test_autosave_custom_file_name() {
    let temp = TempDir::new().unwrap();
    let auto = AutoSave::open(temp.path()).unwrap();

    auto.set_file_name::<PlayerData>("player.dat").unwrap();
    auto.save(&sample_player()).unwrap();

    assert!(temp.path().join("player.dat").exists());

    let restored: PlayerData = auto.load().unwrap();
    assert_eq!(restored.level, 50);
}

#[test]
fn test_autosave_record_is_flat_json_object() {
    let temp = TempDir::new().unwrap();
    let auto = AutoSave::open(temp.path()).unwrap();
    auto.set_file_name::<PlayerData>("player.json").unwrap();

    auto.save(&sample_player()).unwrap();

    let text = std::fs::read_to_string(temp.path().join("player.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.is_object());
    assert_eq!(value["level"], json!(50));
    assert!(value.get("temp_health").is_none());
}

#[tokio::test]
async fn test_autosave_async_round_trip() {
    let temp = TempDir::new().unwrap();
    let auto = AutoSave::open(temp.path()).unwrap();

    auto.save_async(&sample_player()).await.unwrap();
    let restored: PlayerData = auto.load_async().await.unwrap();

    assert_eq!(restored.name, "Grok");
    assert_eq!(restored.inventory.len(), 2);
    assert_eq!(restored.temp_health, 100);
}
