use crate::error::{Result, RinthError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_BASE_URL: &str = "https://api.modrinth.com/v2";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the personal access token attached as the
/// `Authorization` header. Takes precedence over the config file.
pub const TOKEN_ENV: &str = "RINTH_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    /// Load the configuration from `<dir>/config.toml`, falling back to
    /// defaults when the file is missing. The token environment variable
    /// overrides whatever the file contains.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let config: ClientConfig = toml::from_str(&contents).map_err(|e| {
                RinthError::ConfigFile(format!("Failed to parse config.toml: {e}"))
            })?;
            log::debug!("Loaded config from {config_path:?}");
            config
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Build a configuration from defaults plus environment overrides only.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| RinthError::ConfigFile(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(token) = env::var(TOKEN_ENV) {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }
    }
}
