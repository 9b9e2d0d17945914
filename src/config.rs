//! Client Configuration
//!
//! Base URL and state directory, resolved from the environment, then
//! `~/.config/worthit/config.json`, then built-in defaults. A missing or
//! malformed config file silently falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_PATH: &str = "~/.config/worthit/config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend origin, e.g. `http://127.0.0.1:5000`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Where the session cookie is persisted
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            state_dir: default_state_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = shellexpand::tilde(CONFIG_PATH).into_owned();
        let mut config: Config = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("ignoring malformed config at {}: {}", path, e);
                    None
                }
            })
            .unwrap_or_default();

        if let Ok(url) = std::env::var("WORTHIT_BASE_URL") {
            config.base_url = url;
        }
        config
    }

    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.state_dir).into_owned()).join("session")
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_state_dir() -> String {
    "~/.config/worthit".to_string()
}
