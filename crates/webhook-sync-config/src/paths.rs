use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("HOOKSYNC_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("hooksync");

        Ok(Self {
            config_dir: base_dir.clone(),
            log_dir: base_dir.join("logs"),
        })
    }

    pub fn from_docker_env() -> Self {
        let base = container_base_path();
        Self {
            config_dir: base.clone(),
            log_dir: base.join("logs"),
        }
    }

    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("hooksync.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container image creates the base directory, so its presence means we run in Docker
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}
