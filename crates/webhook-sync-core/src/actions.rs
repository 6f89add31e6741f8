//! Workflows that act on a whole group of notifications.
//!
//! Calls are issued one at a time with a fixed pause between them so a
//! season's worth of episodes does not hit the backend as a burst. A failure
//! on one member is recorded and the run moves on to the next member.

use crate::grouping::NotificationGroup;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use webhook_sync_client::NotificationApi;
use webhook_sync_models::{AutoSyncSettings, MediaType, Notification, NotificationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAction {
    Sync,
    Complete,
    Delete,
}

impl GroupAction {
    /// Whether this action applies to a member in its current state
    pub fn applies_to(&self, notification: &Notification) -> bool {
        match self {
            GroupAction::Sync => notification.status.is_syncable(),
            GroupAction::Complete => notification.status != NotificationStatus::Completed,
            GroupAction::Delete => true,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            GroupAction::Sync => "sync",
            GroupAction::Complete => "complete",
            GroupAction::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedMember {
    pub notification_id: String,
    pub error: String,
}

/// Outcome of running an action over a group
#[derive(Debug, Clone, Serialize)]
pub struct GroupActionReport {
    pub action: GroupAction,
    pub group_key: String,
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedMember>,
    /// Members the action did not apply to
    pub skipped: Vec<String>,
}

impl GroupActionReport {
    fn new(action: GroupAction, group_key: &str) -> Self {
        Self {
            action,
            group_key: group_key.to_string(),
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run `action` over every applicable member of `group`, in member order.
///
/// `progress` is called before each call with `(position, total, member)`,
/// positions starting at 1.
pub async fn run_group_action<A, F>(
    api: &A,
    group: &NotificationGroup,
    action: GroupAction,
    delay: Duration,
    mut progress: F,
) -> GroupActionReport
where
    A: NotificationApi + ?Sized,
    F: FnMut(usize, usize, &Notification),
{
    let mut report = GroupActionReport::new(action, &group.group_key);
    let (targets, skipped): (Vec<&Notification>, Vec<&Notification>) =
        group.notifications.iter().partition(|n| action.applies_to(n));
    report.skipped = skipped.iter().map(|n| n.notification_id.clone()).collect();

    info!(
        operation = "group_action",
        action = action.verb(),
        group_key = %group.group_key,
        targets = targets.len(),
        skipped = report.skipped.len(),
        "Starting group action"
    );

    let total = targets.len();
    for (index, notification) in targets.into_iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        progress(index + 1, total, notification);

        let id = notification.notification_id.as_str();
        let result = match action {
            GroupAction::Sync => api.sync_notification(id).await,
            GroupAction::Complete => api.complete_notification(id).await,
            GroupAction::Delete => api.delete_notification(id).await,
        };

        match result {
            Ok(()) => {
                debug!(operation = "group_action", action = action.verb(), notification_id = id, "Member done");
                report.succeeded.push(id.to_string());
            }
            Err(e) => {
                warn!(
                    operation = "group_action",
                    action = action.verb(),
                    notification_id = id,
                    error = %e,
                    "Member failed"
                );
                report.failed.push(FailedMember {
                    notification_id: id.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        operation = "group_action",
        action = action.verb(),
        group_key = %group.group_key,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "Group action finished"
    );
    report
}

pub async fn sync_group<A, F>(api: &A, group: &NotificationGroup, delay: Duration, progress: F) -> GroupActionReport
where
    A: NotificationApi + ?Sized,
    F: FnMut(usize, usize, &Notification),
{
    run_group_action(api, group, GroupAction::Sync, delay, progress).await
}

pub async fn complete_group<A, F>(api: &A, group: &NotificationGroup, delay: Duration, progress: F) -> GroupActionReport
where
    A: NotificationApi + ?Sized,
    F: FnMut(usize, usize, &Notification),
{
    run_group_action(api, group, GroupAction::Complete, delay, progress).await
}

pub async fn delete_group<A, F>(api: &A, group: &NotificationGroup, delay: Duration, progress: F) -> GroupActionReport
where
    A: NotificationApi + ?Sized,
    F: FnMut(usize, usize, &Notification),
{
    run_group_action(api, group, GroupAction::Delete, delay, progress).await
}

/// Flip auto-sync for one media type on the backend and return the stored settings
pub async fn toggle_auto_sync<A>(api: &A, media_type: MediaType) -> Result<AutoSyncSettings>
where
    A: NotificationApi + ?Sized,
{
    let mut settings = api
        .get_auto_sync_settings()
        .await
        .map_err(|e| anyhow!("Failed to load auto-sync settings: {}", e))?;
    let enabled = settings.toggle(media_type);
    info!(operation = "toggle_auto_sync", media_type = %media_type, enabled, "Toggling auto-sync");
    api.update_auto_sync_settings(&settings)
        .await
        .map_err(|e| anyhow!("Failed to update auto-sync settings: {}", e))
}
