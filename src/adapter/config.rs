//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::application::dto::import_config::ImportConfig;

/// Environment variable consulted when the config file has no token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_burst_limit() -> u32 {
    20
}

fn default_cooldown_secs() -> u64 {
    30
}

fn default_comment_prefix() -> String {
    "#".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    pub owner: String,
    pub repo: String,

    // Authentication
    #[serde(default)]
    pub token: String,

    // Pacing
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_burst_limit")]
    pub burst_limit: u32,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    // Input
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded_path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        if config.token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
                config.token = token;
            }
        }

        Ok(config)
    }

    /// Base URL of the repository resources, e.g. `https://api.github.com/repos/joe/hello-world`
    pub fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    pub fn import_config(&self) -> ImportConfig {
        ImportConfig::new(
            Duration::from_millis(self.request_delay_ms),
            self.burst_limit,
            Duration::from_secs(self.cooldown_secs),
        )
    }
}
