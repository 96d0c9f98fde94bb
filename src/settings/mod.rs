//! Generator settings: the persisted per-language configuration aggregate
//!
//! The aggregate is strongly typed in memory. Persisted JSON is read back
//! through a permissive raw shape and reconciled field-by-field against
//! the canonical defaults, so settings written by an older tool version
//! load cleanly: unknown variants and option keys are dropped, missing
//! option keys are filled from the defaults.

pub mod store;

pub use store::{SettingsStore, SETTINGS_STORAGE_KEY};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::options::{
    default_options, CsVariant, JavaVariant, Language, OptionSet, TsVariant, TypeVariant,
    VariantSet,
};

/// Configuration for one (language, variant) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Boolean generation toggles, keyed by option key
    #[serde(default)]
    pub options: OptionSet,

    /// Prefix prepended to generated type names
    #[serde(default)]
    pub prefix: String,

    /// Suffix appended to generated type names
    #[serde(default)]
    pub suffix: String,
}

impl TypeConfig {
    /// The canonical default configuration for a (language, variant) pair
    pub fn default_for(variant: TypeVariant) -> Self {
        Self {
            options: default_options(variant),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Overlay stored fields onto this config
    ///
    /// Option values are taken per key: a stored value wins only for keys
    /// the canonical table defines, so foreign keys never survive a load
    /// and missing keys keep their defaults. Prefix and suffix are taken
    /// whole when present.
    fn overlay(&mut self, stored: &StoredTypeConfig) {
        if let Some(stored_options) = &stored.options {
            for (key, value) in self.options.iter_mut() {
                if let Some(stored_value) = stored_options.get(key) {
                    *value = *stored_value;
                }
            }
        }
        if let Some(prefix) = &stored.prefix {
            self.prefix = prefix.clone();
        }
        if let Some(suffix) = &stored.suffix {
            self.suffix = suffix.clone();
        }
    }
}

/// A partial update to one TypeConfig
///
/// Fields left as `None` keep their current values. A provided option set
/// replaces the previous one wholesale; callers merge beforehand.
#[derive(Debug, Clone, Default)]
pub struct TypeConfigUpdate {
    pub options: Option<OptionSet>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl TypeConfigUpdate {
    /// Apply this update to an existing config
    pub fn apply(self, config: &mut TypeConfig) {
        if let Some(options) = self.options {
            config.options = options;
        }
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
    }
}

/// Per-language settings: the selected variant plus one config per variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings<V: VariantSet> {
    /// The currently selected output variant
    pub selected_type: V,

    /// One configuration per variant, pre-seeded so switching the
    /// selection never finds a hole
    pub type_configs: BTreeMap<V, TypeConfig>,
}

impl<V: VariantSet> LanguageSettings<V> {
    fn default_settings() -> Self {
        let type_configs = V::ALL
            .iter()
            .map(|&variant| (variant, TypeConfig::default_for(variant.to_variant())))
            .collect();

        Self {
            selected_type: V::DEFAULT,
            type_configs,
        }
    }

    fn reconcile(stored: &StoredLanguageSettings) -> Self {
        let selected_type = stored
            .selected_type
            .as_deref()
            .and_then(V::from_key)
            .unwrap_or(V::DEFAULT);

        let mut type_configs = BTreeMap::new();
        for &variant in V::ALL {
            let mut config = TypeConfig::default_for(variant.to_variant());
            if let Some(stored_config) = stored.type_configs.get(variant.key()) {
                config.overlay(stored_config);
            }
            type_configs.insert(variant, config);
        }

        Self {
            selected_type,
            type_configs,
        }
    }

    fn config(&self, variant: V) -> TypeConfig {
        self.type_configs
            .get(&variant)
            .cloned()
            .unwrap_or_else(|| TypeConfig::default_for(variant.to_variant()))
    }

    fn update_config(&mut self, variant: V, update: TypeConfigUpdate) {
        let config = self
            .type_configs
            .entry(variant)
            .or_insert_with(|| TypeConfig::default_for(variant.to_variant()));
        update.apply(config);
    }

    fn reset_config(&mut self, variant: V) {
        self.type_configs
            .insert(variant, TypeConfig::default_for(variant.to_variant()));
    }
}

impl<V: VariantSet> Default for LanguageSettings<V> {
    fn default() -> Self {
        Self::default_settings()
    }
}

/// The root persisted aggregate: settings for every supported language
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratorSettings {
    pub java: LanguageSettings<JavaVariant>,
    pub typescript: LanguageSettings<TsVariant>,
    pub csharp: LanguageSettings<CsVariant>,
}

impl GeneratorSettings {
    /// Rebuild a typed aggregate from a stored raw shape
    ///
    /// Each language is reconciled independently against its defaults.
    pub fn reconcile(stored: &StoredSettings) -> Self {
        Self {
            java: LanguageSettings::reconcile(&stored.java),
            typescript: LanguageSettings::reconcile(&stored.typescript),
            csharp: LanguageSettings::reconcile(&stored.csharp),
        }
    }

    /// The selected variant for a language
    pub fn selected_type(&self, language: Language) -> TypeVariant {
        match language {
            Language::Java => TypeVariant::Java(self.java.selected_type),
            Language::TypeScript => TypeVariant::TypeScript(self.typescript.selected_type),
            Language::CSharp => TypeVariant::CSharp(self.csharp.selected_type),
        }
    }

    /// Select the active variant for the variant's language
    pub fn select_type(&mut self, variant: TypeVariant) {
        match variant {
            TypeVariant::Java(v) => self.java.selected_type = v,
            TypeVariant::TypeScript(v) => self.typescript.selected_type = v,
            TypeVariant::CSharp(v) => self.csharp.selected_type = v,
        }
    }

    /// The current configuration for a (language, variant) pair
    ///
    /// Never absent: a pair with no stored entry yields the canonical
    /// default configuration.
    pub fn type_config(&self, variant: TypeVariant) -> TypeConfig {
        match variant {
            TypeVariant::Java(v) => self.java.config(v),
            TypeVariant::TypeScript(v) => self.typescript.config(v),
            TypeVariant::CSharp(v) => self.csharp.config(v),
        }
    }

    /// Merge a partial update into one (language, variant) configuration
    pub fn update_type_config(&mut self, variant: TypeVariant, update: TypeConfigUpdate) {
        match variant {
            TypeVariant::Java(v) => self.java.update_config(v, update),
            TypeVariant::TypeScript(v) => self.typescript.update_config(v, update),
            TypeVariant::CSharp(v) => self.csharp.update_config(v, update),
        }
    }

    /// Restore one language to its embedded defaults
    pub fn reset_language(&mut self, language: Language) {
        match language {
            Language::Java => self.java = LanguageSettings::default_settings(),
            Language::TypeScript => self.typescript = LanguageSettings::default_settings(),
            Language::CSharp => self.csharp = LanguageSettings::default_settings(),
        }
    }

    /// Restore one (language, variant) configuration to its defaults
    pub fn reset_type(&mut self, variant: TypeVariant) {
        match variant {
            TypeVariant::Java(v) => self.java.reset_config(v),
            TypeVariant::TypeScript(v) => self.typescript.reset_config(v),
            TypeVariant::CSharp(v) => self.csharp.reset_config(v),
        }
    }
}

/// Permissive mirror of the persisted aggregate
///
/// Every field is optional and variant keys stay strings, so any JSON
/// object parses; reconciliation decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredSettings {
    #[serde(default)]
    pub java: StoredLanguageSettings,

    #[serde(default)]
    pub typescript: StoredLanguageSettings,

    #[serde(default)]
    pub csharp: StoredLanguageSettings,
}

/// Permissive mirror of one language's stored settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredLanguageSettings {
    #[serde(default)]
    pub selected_type: Option<String>,

    #[serde(default)]
    pub type_configs: BTreeMap<String, StoredTypeConfig>,
}

/// Permissive mirror of one stored TypeConfig
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredTypeConfig {
    #[serde(default)]
    pub options: Option<OptionSet>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub suffix: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::option_labels;

    fn stored_from(settings: &GeneratorSettings) -> StoredSettings {
        let raw = serde_json::to_string(settings).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_defaults_seed_every_variant() {
        let settings = GeneratorSettings::default();

        for language in Language::ALL {
            for variant in language.variants() {
                let config = settings.type_config(variant);
                assert_eq!(config.options, default_options(variant));
                assert!(config.prefix.is_empty());
                assert!(config.suffix.is_empty());
            }
        }
    }

    #[test]
    fn test_reconcile_round_trip_is_identity() {
        let mut settings = GeneratorSettings::default();
        settings.select_type(TypeVariant::TypeScript(TsVariant::Zod));
        settings.update_type_config(
            TypeVariant::Java(JavaVariant::Record),
            TypeConfigUpdate {
                prefix: Some("Api".to_string()),
                ..Default::default()
            },
        );

        let reconciled = GeneratorSettings::reconcile(&stored_from(&settings));
        assert_eq!(reconciled, settings);
    }

    #[test]
    fn test_reconcile_drops_foreign_option_keys() {
        let raw = r#"{
            "java": {
                "selected_type": "record",
                "type_configs": {
                    "record": {
                        "options": {"builder": true, "lombok_magic": true}
                    }
                }
            }
        }"#;
        let stored: StoredSettings = serde_json::from_str(raw).unwrap();
        let settings = GeneratorSettings::reconcile(&stored);

        let config = settings.type_config(TypeVariant::Java(JavaVariant::Record));
        assert!(config.options["builder"]);
        assert!(!config.options.contains_key("lombok_magic"));
        assert_eq!(
            config.options.len(),
            option_labels(TypeVariant::Java(JavaVariant::Record)).len()
        );
    }

    #[test]
    fn test_reconcile_fills_missing_option_keys() {
        let raw = r#"{
            "typescript": {
                "type_configs": {
                    "interface": {
                        "options": {"comments": true}
                    }
                }
            }
        }"#;
        let stored: StoredSettings = serde_json::from_str(raw).unwrap();
        let settings = GeneratorSettings::reconcile(&stored);

        let config = settings.type_config(TypeVariant::TypeScript(TsVariant::Interface));
        assert!(config.options["comments"]);
        // Untouched keys come from the default table.
        assert!(config.options["readonly_properties"]);
        assert!(config.options["strict_null_checks"]);
        assert_eq!(
            config.options.len(),
            default_options(TypeVariant::TypeScript(TsVariant::Interface)).len()
        );
    }

    #[test]
    fn test_reconcile_drops_unknown_variants() {
        let raw = r#"{
            "java": {
                "type_configs": {
                    "pojo": {"prefix": "Old"},
                    "dto": {"prefix": "Kept"}
                }
            }
        }"#;
        let stored: StoredSettings = serde_json::from_str(raw).unwrap();
        let settings = GeneratorSettings::reconcile(&stored);

        assert_eq!(settings.java.type_configs.len(), JavaVariant::ALL.len());
        assert_eq!(
            settings.type_config(TypeVariant::Java(JavaVariant::Dto)).prefix,
            "Kept"
        );
    }

    #[test]
    fn test_reconcile_rejects_foreign_selected_type() {
        let raw = r#"{"csharp": {"selected_type": "interface"}}"#;
        let stored: StoredSettings = serde_json::from_str(raw).unwrap();
        let settings = GeneratorSettings::reconcile(&stored);

        assert_eq!(
            settings.selected_type(Language::CSharp),
            TypeVariant::CSharp(CsVariant::Class)
        );
    }

    #[test]
    fn test_update_replaces_option_set_wholesale() {
        let mut settings = GeneratorSettings::default();
        let variant = TypeVariant::CSharp(CsVariant::Record);

        let mut premerged = settings.type_config(variant).options;
        premerged.insert("with_expression".to_string(), true);
        settings.update_type_config(
            variant,
            TypeConfigUpdate {
                options: Some(premerged.clone()),
                ..Default::default()
            },
        );

        assert_eq!(settings.type_config(variant).options, premerged);
    }

    #[test]
    fn test_selection_does_not_touch_configs() {
        let mut settings = GeneratorSettings::default();
        let variant = TypeVariant::TypeScript(TsVariant::Interface);
        settings.update_type_config(
            variant,
            TypeConfigUpdate {
                prefix: Some("I".to_string()),
                ..Default::default()
            },
        );

        settings.select_type(TypeVariant::TypeScript(TsVariant::Zod));

        assert_eq!(settings.type_config(variant).prefix, "I");
        assert_eq!(
            settings.selected_type(Language::TypeScript),
            TypeVariant::TypeScript(TsVariant::Zod)
        );
    }

    #[test]
    fn test_reset_type_restores_defaults() {
        let mut settings = GeneratorSettings::default();
        let variant = TypeVariant::Java(JavaVariant::Dto);
        settings.update_type_config(
            variant,
            TypeConfigUpdate {
                suffix: Some("Entity".to_string()),
                ..Default::default()
            },
        );

        settings.reset_type(variant);
        assert_eq!(settings.type_config(variant), TypeConfig::default_for(variant));
    }
}
