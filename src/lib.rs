//! Typegen library
//!
//! Client-side tooling for a model and persistence-mapper generation
//! backend: per-language generation settings with persistent storage,
//! option resolution, and a thin HTTP client for the generation API.

pub mod cli;
pub mod client;
pub mod config;
pub mod options;
pub mod settings;
pub mod storage;

pub use client::{ApiClient, ApiError, DatabaseConnection, MapperRequest, TypeRequest};
pub use config::{BackendConfig, Config};
pub use options::{Language, MapperLanguage, OptionSet, OptionSpec, TypeVariant};
pub use settings::{GeneratorSettings, SettingsStore, TypeConfig, TypeConfigUpdate};
pub use storage::{FileStorage, MemoryStorage, SettingsStorage, StorageError};

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

use client::MapperOptions;

/// Main application context that coordinates all components
pub struct Typegen {
    config: Config,
    store: SettingsStore,
    client: ApiClient,
}

impl Typegen {
    /// Create a new Typegen instance with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let storage: Box<dyn SettingsStorage> = match &config.settings_dir {
            Some(dir) => Box::new(FileStorage::new(dir.clone())),
            None => match FileStorage::default_root() {
                Ok(root) => {
                    debug!("Using settings storage root {:?}", root);
                    Box::new(FileStorage::new(root))
                }
                Err(e) => {
                    // Settings just won't survive this session.
                    warn!("Settings storage unavailable, running ephemeral: {}", e);
                    Box::new(MemoryStorage::new())
                }
            },
        };

        let store = SettingsStore::load(storage);
        let client = ApiClient::new(
            &config.backend.base_url,
            Duration::from_secs(config.backend.timeout_secs),
        )?;

        Ok(Self {
            config,
            store,
            client,
        })
    }

    /// The loaded tool configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The settings store, read-only
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// The settings store, for mutations
    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    /// The backend API client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Build a type-generation request from the current settings
    ///
    /// Uses the language's selected variant unless `variant` overrides it.
    /// Empty prefix/suffix are omitted from the request.
    pub fn build_type_request(
        &self,
        language: Language,
        variant: Option<TypeVariant>,
        connection_id: i64,
        table_names: Option<Vec<String>>,
    ) -> Result<TypeRequest> {
        let variant = variant.unwrap_or_else(|| self.store.selected_type(language));
        let config = self.store.type_config(variant);

        let options = serde_json::to_value(&config.options)?;
        let prefix = (!config.prefix.is_empty()).then(|| config.prefix.clone());
        let suffix = (!config.suffix.is_empty()).then(|| config.suffix.clone());

        Ok(TypeRequest {
            connection_id,
            options,
            prefix,
            suffix,
            style: Some(variant.key().to_string()),
            language,
            table_names,
        })
    }

    /// Submit a type-generation request and return the generated source
    pub async fn generate_type(&self, request: &TypeRequest) -> Result<String> {
        info!(
            "Requesting {} model generation for connection {}",
            request.language, request.connection_id
        );
        let source = self.client.generate_type(request).await?;
        info!("Received {} bytes of generated source", source.len());
        Ok(source)
    }

    /// Submit a mapper-generation request and return the generated source
    pub async fn generate_mapper(
        &self,
        connection_id: i64,
        target: MapperLanguage,
        options: MapperOptions,
        table_name: Option<String>,
    ) -> Result<String> {
        let request = MapperRequest {
            connection_id,
            options,
            target_type: target,
            table_name,
        };
        info!("Requesting mapper generation for connection {}", connection_id);
        let source = self.client.generate_mapper(&request).await?;
        info!("Received {} bytes of generated source", source.len());
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{JavaVariant, TsVariant, VariantSet};

    fn test_context() -> Typegen {
        let config = Config::default();
        let store = SettingsStore::load(Box::new(MemoryStorage::new()));
        let client = ApiClient::new(
            &config.backend.base_url,
            Duration::from_secs(config.backend.timeout_secs),
        )
        .unwrap();
        Typegen {
            config,
            store,
            client,
        }
    }

    #[test]
    fn test_build_type_request_uses_selected_variant() {
        let mut app = test_context();
        app.store_mut()
            .select_type(TypeVariant::TypeScript(TsVariant::Zod));

        let request = app
            .build_type_request(Language::TypeScript, None, 5, None)
            .unwrap();

        assert_eq!(request.style.as_deref(), Some("zod"));
        assert_eq!(request.language, Language::TypeScript);
        assert!(request.prefix.is_none());
        let options = request.options.as_object().unwrap();
        assert_eq!(options["trim_strings"], true);
    }

    #[test]
    fn test_build_type_request_with_override_and_naming() {
        let mut app = test_context();
        let variant = TypeVariant::Java(JavaVariant::Record);
        app.store_mut().update_type_config(
            variant,
            TypeConfigUpdate {
                prefix: Some("Api".to_string()),
                ..Default::default()
            },
        );

        let request = app
            .build_type_request(Language::Java, Some(variant), 9, Some(vec!["users".into()]))
            .unwrap();

        assert_eq!(request.style.as_deref(), Some(JavaVariant::Record.key()));
        assert_eq!(request.prefix.as_deref(), Some("Api"));
        assert!(request.suffix.is_none());
        assert_eq!(request.table_names.as_deref(), Some(&["users".to_string()][..]));
    }
}
