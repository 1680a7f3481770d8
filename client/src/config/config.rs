use serde::{Deserialize, Serialize};
use tictactoe_common::config::{ConfigFile, Validate};
use tictactoe_common::tictactoe::SessionSettings;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

pub fn config_file() -> ConfigFile<Config> {
    ConfigFile::next_to_executable(CONFIG_FILE_NAME)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub game: SessionSettings,
    #[serde(default)]
    pub use_log_prefix: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()
    }
}
