//! Building a [`WebhookClient`] from the on-disk configuration.

use crate::client::WebhookClient;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;
use webhook_sync_config::{Config, CredentialStore};

/// Create a client for the configured server, picking up the API key from the credential store
pub fn create_client(config: &Config, credentials: &CredentialStore) -> Result<WebhookClient> {
    create_client_for(config, credentials, None)
}

/// Like [`create_client`], but `server_override` replaces the configured base URL when given
pub fn create_client_for(
    config: &Config,
    credentials: &CredentialStore,
    server_override: Option<&str>,
) -> Result<WebhookClient> {
    config.validate()?;

    let base_url = server_override
        .map(str::to_string)
        .unwrap_or_else(|| config.server_url());
    let api_key = credentials.get_api_key().cloned();
    let timeout = Duration::from_secs(config.server.timeout_seconds);

    debug!(
        operation = "create_client",
        base_url = %base_url,
        has_api_key = api_key.is_some(),
        timeout_seconds = config.server.timeout_seconds,
        "Creating webhook API client"
    );

    WebhookClient::new(&base_url, api_key, timeout)
        .with_context(|| format!("Failed to create client for {}", base_url))
}
