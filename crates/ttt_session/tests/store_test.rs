//! Tests for score and theme persistence.

use tempfile::NamedTempFile;

use ttt_session::{
    EngineConfig, KeyValueStore, MemoryStore, SCORES_KEY, Scores, SqliteStore, THEME_KEY, Theme,
};

/// Creates a temporary database file and opens a store on it. The file
/// handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_sqlite_missing_key() {
    let (_db, store) = setup_test_db();
    assert_eq!(store.get(SCORES_KEY).expect("Query failed"), None);
}

#[test]
fn test_sqlite_set_overwrites() {
    let (_db, store) = setup_test_db();
    store.set(THEME_KEY, "dark").expect("Write failed");
    store.set(THEME_KEY, "light").expect("Write failed");
    assert_eq!(
        store.get(THEME_KEY).expect("Query failed").as_deref(),
        Some("light")
    );
}

#[test]
fn test_sqlite_reopen_keeps_scores() {
    let (db, store) = setup_test_db();
    Scores::new(2, 5, 1).save(&store).expect("Save failed");

    let reopened = SqliteStore::open(db.path().to_str().expect("Invalid path"))
        .expect("Failed to reopen store");
    assert_eq!(Scores::load(&reopened), Scores::new(2, 5, 1));
}

#[test]
fn test_config_opens_sqlite_store() {
    let (db, _) = setup_test_db();
    let toml = format!("database_path = {:?}", db.path().to_str().expect("Invalid path"));
    let config = EngineConfig::from_toml_str(&toml).expect("Valid config");

    let store = config.open_store().expect("Failed to open store");
    store.set(SCORES_KEY, r#"{"X":1,"O":0,"T":0}"#).expect("Write failed");
    assert_eq!(Scores::load(store.as_ref()), Scores::new(1, 0, 0));
}

#[test]
fn test_malformed_scores_load_as_zero() {
    let store = MemoryStore::new();
    store.set(SCORES_KEY, "not json").expect("Write failed");
    assert_eq!(Scores::load(&store), Scores::default());
}

#[test]
fn test_theme_falls_back_to_system_and_persists() {
    let store = MemoryStore::new();
    assert_eq!(Theme::load(&store, Theme::from_system(false)), Theme::Light);
    assert_eq!(
        store.get(THEME_KEY).expect("Read failed").as_deref(),
        Some("light")
    );

    // The stored value now wins over the system preference.
    assert_eq!(Theme::load(&store, Theme::Dark), Theme::Light);
}

#[test]
fn test_unknown_theme_replaced_by_system() {
    let store = MemoryStore::new();
    store.set(THEME_KEY, "sepia").expect("Write failed");
    assert_eq!(Theme::load(&store, Theme::Dark), Theme::Dark);
    assert_eq!(
        store.get(THEME_KEY).expect("Read failed").as_deref(),
        Some("dark")
    );
}

#[test]
fn test_theme_toggle_round_trips_store() {
    let (_db, store) = setup_test_db();
    let theme = Theme::load(&store, Theme::Dark).toggle();
    theme.save(&store).expect("Save failed");
    assert_eq!(Theme::load(&store, Theme::Dark), Theme::Light);
}
