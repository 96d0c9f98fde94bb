//! File-backed persistence behavior

use tempfile::TempDir;
use typegen::options::{JavaVariant, Language, TypeVariant};
use typegen::settings::SETTINGS_STORAGE_KEY;
use typegen::{FileStorage, GeneratorSettings, SettingsStore, TypeConfigUpdate};

fn settings_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join(format!("{SETTINGS_STORAGE_KEY}.json"))
}

#[test]
fn test_settings_survive_a_new_store_instance() {
    let temp_dir = TempDir::new().unwrap();
    let variant = TypeVariant::Java(JavaVariant::Record);

    {
        let storage = FileStorage::new(temp_dir.path());
        let mut store = SettingsStore::load(Box::new(storage));
        store.select_type(variant);
        store.update_type_config(
            variant,
            TypeConfigUpdate {
                suffix: Some("Row".to_string()),
                ..Default::default()
            },
        );
    }

    assert!(settings_path(&temp_dir).exists());

    let store = SettingsStore::load(Box::new(FileStorage::new(temp_dir.path())));
    assert_eq!(store.selected_type(Language::Java), variant);
    assert_eq!(store.type_config(variant).suffix, "Row");
}

#[test]
fn test_corrupted_settings_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(settings_path(&temp_dir), "{ definitely not settings").unwrap();

    let store = SettingsStore::load(Box::new(FileStorage::new(temp_dir.path())));
    assert_eq!(store.settings(), &GeneratorSettings::default());
}

#[test]
fn test_foreign_shaped_json_falls_back_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(settings_path(&temp_dir), r#"{"java": 17, "other": []}"#).unwrap();

    let store = SettingsStore::load(Box::new(FileStorage::new(temp_dir.path())));
    assert_eq!(store.settings(), &GeneratorSettings::default());
}

#[test]
fn test_reset_all_removes_the_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path());

    let mut store = SettingsStore::load(Box::new(storage));
    store.select_type(TypeVariant::Java(JavaVariant::Record));
    assert!(settings_path(&temp_dir).exists());

    store.reset_all();
    assert!(!settings_path(&temp_dir).exists());
}

#[test]
fn test_missing_storage_directory_is_created_on_first_write() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("deeper").join("typegen");

    let mut store = SettingsStore::load(Box::new(FileStorage::new(&root)));
    store.select_type(TypeVariant::Java(JavaVariant::Record));

    assert!(root.join(format!("{SETTINGS_STORAGE_KEY}.json")).exists());
}
