use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `server.base_url`
pub const SERVER_URL_ENV: &str = "HOOKSYNC_SERVER_URL";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sync: SyncOptions,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyncOptions {
    /// Pause between successive API calls when acting on a whole group
    #[serde(default = "default_group_delay_ms")]
    pub group_delay_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_completed: bool,
    #[serde(default = "default_watch_interval_seconds")]
    pub watch_interval_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Force JSON logs on or off; unset means JSON when stdout is not a terminal
    #[serde(default)]
    pub json: Option<bool>,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_group_delay_ms() -> u64 {
    500
}

fn default_watch_interval_seconds() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            group_delay_ms: default_group_delay_ms(),
        }
    }
}

impl SyncOptions {
    pub fn group_delay(&self) -> Duration {
        Duration::from_millis(self.group_delay_ms)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_completed: default_true(),
            watch_interval_seconds: default_watch_interval_seconds(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or the defaults when it does not exist yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base URL of the backend, honouring the environment override
    pub fn server_url(&self) -> String {
        std::env::var(SERVER_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.server.base_url.clone())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.server_url();
        let url = url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("server.base_url is required and cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "server.base_url must start with http:// or https:// (got '{}')",
                url
            ));
        }
        if self.server.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("server.timeout_seconds must be greater than zero"));
        }
        if self.display.watch_interval_seconds == 0 {
            return Err(anyhow::anyhow!("display.watch_interval_seconds must be greater than zero"));
        }
        Ok(())
    }
}
