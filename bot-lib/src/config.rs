use crate::survey::engine::DEFAULT_QUESTION_TIMEOUT;
use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::{path::Path, sync::Arc, time::Duration};

#[serde_as]
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct Config {
    /// The id of the guild the bot is in.
    pub guild_id: u64,
    /// The help text for the bot. `/help`
    pub help_text: Option<Arc<String>>,
    /// How long a user gets to answer each question before the session is
    /// cut off.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_question_timeout")]
    pub question_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            guild_id: 0,
            help_text: None,
            question_timeout: default_question_timeout(),
        }
    }
}

impl Config {
    /// Fetches the config from the config file in the root directory.
    pub fn create_from_file(config_path: impl AsRef<Path>) -> Result<Config> {
        let file = std::fs::read_to_string(config_path).wrap_err("Could not read config file")?;

        toml::from_str(&file).wrap_err("Could not parse config file")
    }

    /// Reloads the config file and updates the configuration.
    pub fn reload(&mut self, config_path: impl AsRef<Path>) {
        if let Ok(config) = Config::create_from_file(config_path) {
            *self = config;
        }
    }

    pub fn save(&self, config_path: impl AsRef<Path>) -> Result<()> {
        let toml = toml::to_string(&self).wrap_err("Could not serialize config")?;

        std::fs::write(config_path, toml).wrap_err("Could not save config")
    }
}

fn default_question_timeout() -> Duration {
    DEFAULT_QUESTION_TIMEOUT
}
