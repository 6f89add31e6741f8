use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Lifecycle state of a webhook notification on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationStatus {
    /// Received, waiting for a manual sync
    #[default]
    Pending,
    /// Received, will be synced by the auto-sync scheduler
    WaitingAutoSync,
    /// Sync currently running
    Syncing,
    /// Synced (or manually marked completed)
    Completed,
    /// Last sync attempt failed
    Failed,
    /// Status string the backend sent that this client does not know
    Unknown,
}

impl NotificationStatus {
    /// Priority used when collapsing a group of statuses into one
    pub const AGGREGATE_PRIORITY: [NotificationStatus; 4] = [
        NotificationStatus::Syncing,
        NotificationStatus::Failed,
        NotificationStatus::WaitingAutoSync,
        NotificationStatus::Pending,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "pending" => NotificationStatus::Pending,
            "waiting_auto_sync" => NotificationStatus::WaitingAutoSync,
            "syncing" => NotificationStatus::Syncing,
            "completed" => NotificationStatus::Completed,
            "failed" => NotificationStatus::Failed,
            _ => NotificationStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::WaitingAutoSync => "waiting_auto_sync",
            NotificationStatus::Syncing => "syncing",
            NotificationStatus::Completed => "completed",
            NotificationStatus::Failed => "failed",
            NotificationStatus::Unknown => "unknown",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "Pending",
            NotificationStatus::WaitingAutoSync => "Waiting for auto-sync",
            NotificationStatus::Syncing => "Syncing",
            NotificationStatus::Completed => "Completed",
            NotificationStatus::Failed => "Failed",
            NotificationStatus::Unknown => "Unknown",
        }
    }

    /// Whether a manual sync may be triggered for a notification in this state
    pub fn is_syncable(&self) -> bool {
        matches!(
            self,
            NotificationStatus::Pending | NotificationStatus::WaitingAutoSync | NotificationStatus::Failed
        )
    }

    pub fn all() -> [NotificationStatus; 5] {
        [
            NotificationStatus::Pending,
            NotificationStatus::WaitingAutoSync,
            NotificationStatus::Syncing,
            NotificationStatus::Completed,
            NotificationStatus::Failed,
        ]
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match NotificationStatus::from_tag(s) {
            NotificationStatus::Unknown => Err(format!(
                "Invalid status: {}. Use 'pending', 'waiting_auto_sync', 'syncing', 'completed' or 'failed'",
                s
            )),
            status => Ok(status),
        }
    }
}

impl Serialize for NotificationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(tag)) => NotificationStatus::from_tag(&tag),
            None | Some(Value::Null) => NotificationStatus::Pending,
            Some(_) => NotificationStatus::Unknown,
        })
    }
}
