use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;
use webhook_sync_client::NotificationApi;
use webhook_sync_models::{AutoSyncSettings, Notification, NotificationStatus};

#[derive(Debug, Error)]
#[error("fake api error: {0}")]
pub struct FakeError(pub String);

/// In-memory backend that records every call it receives
#[derive(Default)]
pub struct FakeApi {
    notifications: Mutex<Vec<Notification>>,
    settings: Mutex<AutoSyncSettings>,
    calls: Mutex<Vec<String>>,
    failing_ids: Vec<String>,
    fail_list: bool,
}

impl FakeApi {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Mutex::new(notifications),
            ..Self::default()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Self::default()
        }
    }

    pub fn with_failing_ids(mut self, ids: &[&str]) -> Self {
        self.failing_ids = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_of(&self, id: &str) -> Option<NotificationStatus> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.notification_id == id)
            .map(|n| n.status)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutate(&self, action: &str, id: &str, status: Option<NotificationStatus>) -> Result<(), FakeError> {
        self.record(format!("{}:{}", action, id));
        if self.failing_ids.iter().any(|failing| failing == id) {
            return Err(FakeError(format!("{} failed for {}", action, id)));
        }
        let mut notifications = self.notifications.lock().unwrap();
        let position = notifications
            .iter()
            .position(|n| n.notification_id == id)
            .ok_or_else(|| FakeError(format!("{} not found", id)))?;
        match status {
            Some(status) => notifications[position].status = status,
            None => {
                notifications.remove(position);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationApi for FakeApi {
    type Error = FakeError;

    fn endpoint_name(&self) -> &str {
        "fake"
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, Self::Error> {
        self.record("list".to_string());
        if self.fail_list {
            return Err(FakeError("listing unavailable".to_string()));
        }
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn get_notification(&self, notification_id: &str) -> Result<Notification, Self::Error> {
        self.record(format!("get:{}", notification_id));
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.notification_id == notification_id)
            .cloned()
            .ok_or_else(|| FakeError(format!("{} not found", notification_id)))
    }

    async fn get_auto_sync_settings(&self) -> Result<AutoSyncSettings, Self::Error> {
        Ok(*self.settings.lock().unwrap())
    }

    async fn sync_notification(&self, notification_id: &str) -> Result<(), Self::Error> {
        self.mutate("sync", notification_id, Some(NotificationStatus::Syncing))
    }

    async fn complete_notification(&self, notification_id: &str) -> Result<(), Self::Error> {
        self.mutate("complete", notification_id, Some(NotificationStatus::Completed))
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<(), Self::Error> {
        self.mutate("delete", notification_id, None)
    }

    async fn update_auto_sync_settings(
        &self,
        settings: &AutoSyncSettings,
    ) -> Result<AutoSyncSettings, Self::Error> {
        *self.settings.lock().unwrap() = *settings;
        Ok(*settings)
    }
}
