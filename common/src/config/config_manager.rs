use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a config. A missing config yields
/// `TConfig::default()` without caching it, so a file created later is
/// still picked up.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.as_ref()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfigProvider;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct PacingConfig {
        delay_ms: u64,
    }

    impl Validate for PacingConfig {
        fn validate(&self) -> Result<(), String> {
            if self.delay_ms > 1_000 {
                return Err(format!("delay_ms must be at most 1000, got {}", self.delay_ms));
            }
            Ok(())
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<InMemoryConfigProvider, PacingConfig> {
        ConfigManager::new(
            InMemoryConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_config_returns_default() {
        assert_eq!(manager(None).get_config(), Ok(PacingConfig::default()));
    }

    #[test]
    fn test_stored_config_is_loaded() {
        assert_eq!(
            manager(Some("delay_ms: 250")).get_config(),
            Ok(PacingConfig { delay_ms: 250 })
        );
    }

    #[test]
    fn test_invalid_config_is_rejected_on_load_and_save() {
        let manager = manager(Some("delay_ms: 5000"));

        assert!(manager.get_config().is_err());
        assert!(manager.set_config(&PacingConfig { delay_ms: 5000 }).is_err());
    }

    #[test]
    fn test_set_config_updates_cache() {
        let manager = manager(Some("delay_ms: 1"));
        assert_eq!(manager.get_config(), Ok(PacingConfig { delay_ms: 1 }));

        manager.set_config(&PacingConfig { delay_ms: 2 }).unwrap();

        assert_eq!(manager.get_config(), Ok(PacingConfig { delay_ms: 2 }));
    }

    #[test]
    fn test_malformed_yaml_reports_error() {
        let result = manager(Some("delay_ms: [not a number")).get_config();

        assert!(result.unwrap_err().starts_with("Failed to deserialize config"));
    }
}
