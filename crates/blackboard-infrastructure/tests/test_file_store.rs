use blackboard_core::config::StorageConfig;
use blackboard_core::storage::KeyValueStore;
use blackboard_core::sync::OfflineTransport;
use blackboard_core::{BlackboardStore, StackAction};
use blackboard_infrastructure::FileKeyValueStore;
use std::sync::Arc;
use tempfile::TempDir;

fn open_store(path: &std::path::Path) -> BlackboardStore {
    BlackboardStore::new(
        StorageConfig::default(),
        Arc::new(FileKeyValueStore::new(path)),
        Arc::new(OfflineTransport),
    )
}

#[test]
fn test_blackboards_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    {
        let mut store = open_store(&path);
        store.update_content("log", "first");
        assert_eq!(store.push("log").action, StackAction::New);
        store.update_content("log", "second");
        store.push("log");
        store.update_content("todo", "buy chalk");
        store.pull("log");
    }

    let store = open_store(&path);
    assert_eq!(store.stack_status("log"), "1/2");
    assert_eq!(store.display_content("log"), "second");
    assert_eq!(store.state("log").history, vec!["second", "first"]);
    assert_eq!(store.display_content("todo"), "buy chalk");
}

#[test]
fn test_two_handles_share_one_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    let mut a = open_store(&path);
    let mut b = open_store(&path);
    a.update_content("log", "from a");
    b.update_content("todo", "from b");

    // Each write rewrites only its own key, so both survive.
    let reopened = open_store(&path);
    assert_eq!(reopened.display_content("log"), "from a");
    assert_eq!(reopened.display_content("todo"), "from b");
}

#[test]
fn test_legacy_entry_is_migrated_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");
    let kv = FileKeyValueStore::new(&path);
    kv.set(
        "wpp_blackboard_data",
        r#"{"current_draft":"legacy","history":["old"],"view_index":0}"#,
    )
    .unwrap();

    let store = open_store(&path);
    assert_eq!(store.display_content("log"), "legacy");

    let kv = FileKeyValueStore::new(&path);
    assert!(kv.get("wpp_blackboard_data").unwrap().is_none());
    assert!(kv.get("wpp_blackboard_log").unwrap().is_some());
}

#[test]
fn test_clear_all_persists() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    let mut store = open_store(&path);
    store.update_content("log", "a");
    store.push("log");
    store.update_content("todo", "b");
    assert!(store.clear_all());

    let store = open_store(&path);
    assert_eq!(store.stack_status("log"), "0");
    assert_eq!(store.display_content("todo"), "");
}
