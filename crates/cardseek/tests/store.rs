//! Card store seeding tests against temporary directories.

use std::fs;
use std::path::Path;

use cardseek::{CardStore, StoreConfig, StoreError};
use tempfile::TempDir;

const OP_CARDS: &str = r#"[
    {
        "Id": "5",
        "Game": "OP",
        "SetName": "OP10",
        "Rarity": "Common",
        "Faces": [{ "Layout": "Normal", "Parts": [{ "Name": "NameC", "Power": "5000" }] }]
    },
    {
        "Id": "6",
        "Game": "OP",
        "SetName": "OP10",
        "Rarity": "Common",
        "Faces": [{ "Layout": "Normal", "Parts": [{ "Name": "NameD", "Type": "Creature" }] }]
    }
]"#;

const FAB_CARDS: &str = r#"[
    {
        "Id": "1",
        "Game": "FAB",
        "SetName": "HNT",
        "Number": "104",
        "Faces": [{ "Parts": [{ "Name": "Part1" }] }]
    }
]"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn seeded_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "cards-op.json", OP_CARDS);
    write(dir.path(), "cards-fab.json", FAB_CARDS);
    write(dir.path(), "readme.txt", "not cards");
    write(dir.path(), "prices.json", "{}");
    fs::create_dir(dir.path().join("cards-archive.json")).unwrap();
    dir
}

#[test]
fn seed_loads_matching_files_in_name_order() {
    let dir = seeded_dir();
    let mut store = CardStore::new();

    let added = store.seed(&StoreConfig::new(dir.path())).unwrap();
    assert_eq!(added, 3);
    assert_eq!(store.len(), 3);

    let ids: Vec<&str> = store.cards().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "5", "6"]);
}

#[test]
fn seeded_store_is_searchable() {
    let dir = seeded_dir();
    let mut store = CardStore::new();
    store.seed(&StoreConfig::new(dir.path())).unwrap();

    assert_eq!(store.search("g:OP").unwrap().len(), 2);
    assert_eq!(store.search("t:creature").unwrap()[0].id, "6");
    assert_eq!(store.search("number:104").unwrap()[0].id, "1");
    assert!(store.search("zz:foo").is_err());
}

#[test]
fn seed_respects_prefix() {
    let dir = seeded_dir();
    write(dir.path(), "op-extra.json", OP_CARDS);

    let mut store = CardStore::new();
    let config = StoreConfig::new(dir.path()).with_file_prefix("op-");
    assert_eq!(store.seed(&config).unwrap(), 2);
}

#[test]
fn seed_appends() {
    let dir = seeded_dir();
    let mut store = CardStore::new();
    let config = StoreConfig::new(dir.path());
    store.seed(&config).unwrap();
    store.seed(&config).unwrap();
    assert_eq!(store.len(), 6);
}

#[test]
fn seed_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CardStore::new();
    assert_eq!(store.seed(&StoreConfig::new(dir.path())).unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = CardStore::new()
        .seed(&StoreConfig::new(&missing))
        .unwrap_err();
    match err {
        StoreError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "cards.json", "[{\"Id\": 5");

    let err = CardStore::new()
        .seed(&StoreConfig::new(dir.path()))
        .unwrap_err();
    assert!(matches!(err, StoreError::Json { ref path, .. } if path.ends_with("cards.json")));
    assert!(err.to_string().contains("cards.json"));
}

#[test]
fn load_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anything.json");
    fs::write(&path, OP_CARDS).unwrap();

    let mut store = CardStore::new();
    assert_eq!(store.load_file(&path).unwrap(), 2);
    let found = store.search("name:namec").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].faces[0].parts[0].extra.get("Power"),
        Some(&serde_json::json!("5000"))
    );
}

#[test]
fn query_error_converts_to_store_error() {
    let store = CardStore::new();
    let err: StoreError = store.search("(").unwrap_err().into();
    assert!(matches!(err, StoreError::Query(_)));
}
