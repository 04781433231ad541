use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::keybindings::KeybindingsConfig;
use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_timeoutlen")]
    pub timeoutlen: u64,

    /// Show a confirmation dialog after each successful capture.
    #[serde(default = "default_confirm_capture")]
    pub confirm_capture: bool,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_timeoutlen() -> u64 {
    1000
}

fn default_confirm_capture() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            timeoutlen: default_timeoutlen(),
            confirm_capture: default_confirm_capture(),
            keybindings: KeybindingsConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", config_path.display()))?;

        config.keybindings = config.keybindings.merge_with_defaults();

        Ok(config)
    }
}
