pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, DisplayConfig, LoggingConfig, ServerConfig, SyncOptions, SERVER_URL_ENV};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
