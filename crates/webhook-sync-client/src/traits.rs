use async_trait::async_trait;
use webhook_sync_models::{AutoSyncSettings, Notification};

/// Operations the notification backend exposes under `/api/webhook`.
///
/// Group-level workflows in the core crate are written against this trait so
/// they can run against the HTTP client or an in-memory implementation.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static + std::fmt::Display;

    /// Server the API talks to, for log and error context
    fn endpoint_name(&self) -> &str;

    // Data retrieval
    async fn list_notifications(&self) -> Result<Vec<Notification>, Self::Error>;
    async fn get_notification(&self, notification_id: &str) -> Result<Notification, Self::Error>;
    async fn get_auto_sync_settings(&self) -> Result<AutoSyncSettings, Self::Error>;

    // Data modification
    async fn sync_notification(&self, notification_id: &str) -> Result<(), Self::Error>;
    async fn complete_notification(&self, notification_id: &str) -> Result<(), Self::Error>;
    async fn delete_notification(&self, notification_id: &str) -> Result<(), Self::Error>;
    async fn update_auto_sync_settings(
        &self,
        settings: &AutoSyncSettings,
    ) -> Result<AutoSyncSettings, Self::Error>;
}
