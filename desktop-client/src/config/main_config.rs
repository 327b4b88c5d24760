use serde::{Deserialize, Serialize};
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};

use super::TicTacToeConfig;

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ClientConfigManager {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub tictactoe: TicTacToeConfig,
    #[serde(default)]
    pub debug_log: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.tictactoe.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::config::{ConfigContentProvider, ConfigSerializer};
    use tictactoe_common::games::tictactoe::{Difficulty, Symbol};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_config_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();

        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();

        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_through_file() {
        let file_path = get_temp_file_path();
        let config = Config {
            tictactoe: TicTacToeConfig {
                difficulty: Difficulty::Hard,
                user_symbol: Symbol::O,
                ai_delay_ms: 250,
                seed: Some(17),
            },
            debug_log: true,
        };

        let manager: ClientConfigManager = ConfigManager::from_yaml_file(&file_path);
        manager.set_config(&config).unwrap();

        let content = FileContentConfigProvider::new(&file_path)
            .get_config_content()
            .unwrap()
            .unwrap();
        assert!(content.contains("difficulty: hard"));

        let reloaded: ClientConfigManager = ConfigManager::from_yaml_file(&file_path);
        assert_eq!(reloaded.get_config().unwrap(), config);

        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager: ClientConfigManager =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");

        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_empty_document_sections_use_defaults() {
        let serializer = YamlConfigSerializer::new();

        let config: Config = serializer.deserialize("debug_log: true").unwrap();

        assert!(config.debug_log);
        assert_eq!(config.tictactoe, TicTacToeConfig::default());
    }
}
