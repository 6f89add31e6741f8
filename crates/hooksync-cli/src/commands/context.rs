use color_eyre::Result;
use webhook_sync_client::{create_client_for, WebhookClient};
use webhook_sync_config::{Config, CredentialStore, PathManager};
use webhook_sync_core::NotificationBoard;

/// Everything a command needs to talk to the backend
pub struct CommandContext {
    pub config: Config,
    pub credentials: CredentialStore,
    pub client: WebhookClient,
}

impl CommandContext {
    pub fn connect(config: Config, server: Option<&str>) -> Result<Self> {
        let path_manager = PathManager::default();
        let credentials_file = path_manager.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials.load().map_err(|e| {
            color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e)
        })?;

        let client = create_client_for(&config, &credentials, server)
            .map_err(|e| color_eyre::eyre::eyre!("Configuration validation failed: {:#}", e))?;

        tracing::debug!(
            operation = "connect",
            base_url = client.base_url(),
            has_api_key = client.has_api_key(),
            "Command context ready"
        );

        Ok(Self {
            config,
            credentials,
            client,
        })
    }

    /// Fetch a fresh snapshot and remember when it was taken
    pub async fn load_board(&mut self) -> Result<NotificationBoard> {
        let mut board = NotificationBoard::new();
        board
            .refresh(&self.client)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("{:#}", e))?;

        if let Some(fetched_at) = board.fetched_at() {
            self.credentials.set_last_fetch(fetched_at);
            if let Err(e) = self.credentials.save() {
                tracing::warn!(operation = "connect", error = %e, "Failed to record last fetch time");
            }
        }
        Ok(board)
    }
}
