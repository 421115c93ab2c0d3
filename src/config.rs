use crate::pokebase::session::pokeapi;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    /// Keeps the backpack in the volatile caches directory.
    pub ui_testing: bool,
}

impl Config {
    pub async fn load() -> Result<Self, anywho::Error> {
        let path = config_path();

        let config = if fs::try_exists(&path).await? {
            Self::parse(&fs::read_to_string(&path).await?)?
        } else {
            Self::default()
        };

        Ok(config.with_overrides(|key| env::var(key).ok()))
    }

    pub fn parse(contents: &str) -> Result<Self, anywho::Error> {
        Ok(ron::from_str(contents)?)
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ui_testing) = var("POKEDEX_UI_TESTING") {
            self.ui_testing = matches!(ui_testing.trim(), "1" | "true");
        }

        if let Some(api_url) = var("POKEDEX_API_URL") {
            self.api_url = api_url;
        }

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: pokeapi::DEFAULT_URL.to_owned(),
            ui_testing: false,
        }
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = Config::parse("(ui_testing: true)").unwrap();

        assert!(config.ui_testing);
        assert_eq!(config.api_url, pokeapi::DEFAULT_URL);
    }

    #[test]
    fn environment_overrides_file() {
        let config = Config::default().with_overrides(|key| match key {
            "POKEDEX_UI_TESTING" => Some("1".to_owned()),
            "POKEDEX_API_URL" => Some("http://localhost:8080/api/v2".to_owned()),
            _ => None,
        });

        assert!(config.ui_testing);
        assert_eq!(config.api_url, "http://localhost:8080/api/v2");
    }

    #[test]
    fn ui_testing_can_be_switched_off() {
        let config = Config {
            ui_testing: true,
            ..Config::default()
        }
        .with_overrides(|key| (key == "POKEDEX_UI_TESTING").then(|| "false".to_owned()));

        assert!(!config.ui_testing);
    }
}
