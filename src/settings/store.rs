//! Settings store: owns the aggregate and keeps it persisted
//!
//! Every mutation writes the full aggregate back to storage before
//! returning. Storage failures are logged and swallowed: the in-memory
//! aggregate stays authoritative for the rest of the session.

use tracing::{debug, warn};

use super::{GeneratorSettings, StoredSettings, TypeConfig, TypeConfigUpdate};
use crate::options::{Language, TypeVariant};
use crate::storage::SettingsStorage;

/// Storage key for the persisted aggregate
pub const SETTINGS_STORAGE_KEY: &str = "generator-settings-v2";

/// Owns the mutable settings aggregate for one session
pub struct SettingsStore {
    storage: Box<dyn SettingsStorage>,
    settings: GeneratorSettings,
}

impl SettingsStore {
    /// Load settings from storage, reconciling against defaults
    ///
    /// Absent or unreadable records fall back to the embedded defaults;
    /// this never fails.
    pub fn load(storage: Box<dyn SettingsStorage>) -> Self {
        let settings = match storage.read_raw(SETTINGS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<StoredSettings>(&raw) {
                Ok(stored) => GeneratorSettings::reconcile(&stored),
                Err(e) => {
                    warn!("Failed to parse stored generator settings, using defaults: {}", e);
                    GeneratorSettings::default()
                }
            },
            Ok(None) => {
                debug!("No stored generator settings, using defaults");
                GeneratorSettings::default()
            }
            Err(e) => {
                warn!("Failed to read generator settings, using defaults: {}", e);
                GeneratorSettings::default()
            }
        };

        Self { storage, settings }
    }

    /// The full current aggregate
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// The selected variant for a language
    pub fn selected_type(&self, language: Language) -> TypeVariant {
        self.settings.selected_type(language)
    }

    /// The current configuration for a (language, variant) pair
    pub fn type_config(&self, variant: TypeVariant) -> TypeConfig {
        self.settings.type_config(variant)
    }

    /// Select the active variant for the variant's language
    pub fn select_type(&mut self, variant: TypeVariant) {
        self.settings.select_type(variant);
        self.persist();
    }

    /// Merge a partial update into one (language, variant) configuration
    pub fn update_type_config(&mut self, variant: TypeVariant, update: TypeConfigUpdate) {
        self.settings.update_type_config(variant, update);
        self.persist();
    }

    /// Restore the whole aggregate to the embedded defaults and erase the
    /// persisted record
    pub fn reset_all(&mut self) {
        self.settings = GeneratorSettings::default();
        if let Err(e) = self.storage.delete_raw(SETTINGS_STORAGE_KEY) {
            warn!("Failed to erase persisted generator settings: {}", e);
        }
    }

    /// Restore one language to its embedded defaults
    pub fn reset_language(&mut self, language: Language) {
        self.settings.reset_language(language);
        self.persist();
    }

    /// Restore one (language, variant) configuration to its defaults
    pub fn reset_type(&mut self, variant: TypeVariant) {
        self.settings.reset_type(variant);
        self.persist();
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.settings) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize generator settings: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.write_raw(SETTINGS_STORAGE_KEY, &raw) {
            warn!("Failed to persist generator settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{JavaVariant, TsVariant};
    use crate::storage::{MemoryStorage, StorageError};

    /// Storage stub whose writes and deletes always fail
    struct BrokenStorage;

    impl SettingsStorage for BrokenStorage {
        fn read_raw(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("read refused".to_string()))
        }

        fn write_raw(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("write refused".to_string()))
        }

        fn delete_raw(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("delete refused".to_string()))
        }
    }

    #[test]
    fn test_load_without_stored_record_uses_defaults() {
        let store = SettingsStore::load(Box::new(MemoryStorage::new()));
        assert_eq!(store.settings(), &GeneratorSettings::default());
    }

    #[test]
    fn test_load_with_corrupted_record_uses_defaults() {
        let storage = MemoryStorage::new();
        storage
            .write_raw(SETTINGS_STORAGE_KEY, "not json at all {")
            .unwrap();

        let store = SettingsStore::load(Box::new(storage));
        assert_eq!(store.settings(), &GeneratorSettings::default());
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let storage = MemoryStorage::new();
        let mut store = SettingsStore::load(Box::new(storage.clone()));

        store.select_type(TypeVariant::TypeScript(TsVariant::Zod));

        let raw = storage.read_raw(SETTINGS_STORAGE_KEY).unwrap().unwrap();
        let reloaded = SettingsStore::load(Box::new(storage.clone()));
        assert!(raw.contains("zod"));
        assert_eq!(
            reloaded.selected_type(Language::TypeScript),
            TypeVariant::TypeScript(TsVariant::Zod)
        );
    }

    #[test]
    fn test_reset_all_erases_persisted_record() {
        let storage = MemoryStorage::new();
        let mut store = SettingsStore::load(Box::new(storage.clone()));

        store.select_type(TypeVariant::Java(JavaVariant::Record));
        assert!(storage.read_raw(SETTINGS_STORAGE_KEY).unwrap().is_some());

        store.reset_all();
        assert!(storage.read_raw(SETTINGS_STORAGE_KEY).unwrap().is_none());
        assert_eq!(store.settings(), &GeneratorSettings::default());
    }

    #[test]
    fn test_storage_failures_never_break_mutations() {
        let mut store = SettingsStore::load(Box::new(BrokenStorage));

        let variant = TypeVariant::Java(JavaVariant::Record);
        store.select_type(variant);
        store.update_type_config(
            variant,
            TypeConfigUpdate {
                prefix: Some("Api".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(store.selected_type(Language::Java), variant);
        assert_eq!(store.type_config(variant).prefix, "Api");
    }
}
