use crate::filter::NotificationFilter;
use crate::grouping::{group_key, group_notifications, DisplayItem, NotificationGroup};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use webhook_sync_client::NotificationApi;
use webhook_sync_models::{MediaType, Notification, NotificationStatus};

/// Owner of the current notification snapshot.
///
/// Each fetch replaces the snapshot wholesale; display items are recomputed
/// from it on every call and never cached.
#[derive(Debug, Default)]
pub struct NotificationBoard {
    snapshot: Vec<Notification>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Counts over the current snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub total: usize,
    pub by_status: Vec<(NotificationStatus, usize)>,
    pub by_media_type: Vec<(MediaType, usize)>,
    pub total_release_size: u64,
}

impl BoardSummary {
    pub fn count(&self, status: NotificationStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the current list from the API and make it the snapshot
    pub async fn refresh<A>(&mut self, api: &A) -> Result<usize>
    where
        A: NotificationApi + ?Sized,
    {
        let notifications = api
            .list_notifications()
            .await
            .map_err(|e| anyhow!("Failed to fetch notifications from {}: {}", api.endpoint_name(), e))?;
        let count = notifications.len();
        self.replace(notifications);
        info!(operation = "refresh", count, "Notification snapshot replaced");
        Ok(count)
    }

    /// Discard the previous snapshot and keep this one
    pub fn replace(&mut self, snapshot: Vec<Notification>) {
        self.snapshot = snapshot;
        self.fetched_at = Some(Utc::now());
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.snapshot
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn display_items(&self) -> Vec<DisplayItem> {
        group_notifications(&self.snapshot)
    }

    pub fn filtered(&self, filter: &NotificationFilter) -> Vec<DisplayItem> {
        if filter.is_empty() {
            return self.display_items();
        }
        let selected: Vec<Notification> = self
            .snapshot
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        group_notifications(&selected)
            .into_iter()
            .filter(|item| filter.keeps(item))
            .collect()
    }

    pub fn find(&self, notification_id: &str) -> Option<&Notification> {
        self.snapshot.iter().find(|n| n.notification_id == notification_id)
    }

    /// The group with this key, built from the full snapshot
    pub fn group(&self, key: &str) -> Option<NotificationGroup> {
        let members: Vec<Notification> = self
            .snapshot
            .iter()
            .filter(|n| n.media_type.is_episodic() && group_key(n) == key)
            .cloned()
            .collect();
        if members.is_empty() {
            return None;
        }
        group_notifications(&members)
            .into_iter()
            .find_map(|item| match item {
                DisplayItem::Group(group) => Some(group),
                DisplayItem::Standalone { .. } => None,
            })
    }

    pub fn summary(&self) -> BoardSummary {
        let by_status = NotificationStatus::all()
            .into_iter()
            .chain(std::iter::once(NotificationStatus::Unknown))
            .map(|status| (status, self.snapshot.iter().filter(|n| n.status == status).count()))
            .filter(|(_, count)| *count > 0)
            .collect();
        let by_media_type = MediaType::all()
            .into_iter()
            .map(|media_type| {
                (
                    media_type,
                    self.snapshot.iter().filter(|n| n.media_type == media_type).count(),
                )
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        BoardSummary {
            total: self.snapshot.len(),
            by_status,
            by_media_type,
            total_release_size: self.snapshot.iter().map(Notification::size).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use webhook_sync_models::Timestamp;

    fn notification(id: &str, media_type: MediaType, status: NotificationStatus, slug: Option<&str>) -> Notification {
        Notification {
            notification_id: id.to_string(),
            media_type,
            status,
            series_title_slug: slug.map(str::to_string),
            season_number: slug.map(|_| 1),
            release_size: Some(100),
            created_at: Some(Timestamp::new(format!("2024-01-0{}", id.len()))),
            ..Notification::default()
        }
    }

    fn board() -> NotificationBoard {
        let mut board = NotificationBoard::new();
        board.replace(vec![
            notification("m", MediaType::Movie, NotificationStatus::Completed, None),
            notification("e1", MediaType::Series, NotificationStatus::Completed, Some("foo")),
            notification("e2", MediaType::Series, NotificationStatus::Failed, Some("foo")),
            notification("a1", MediaType::Anime, NotificationStatus::Completed, Some("bar")),
        ]);
        board
    }

    #[test]
    fn test_replace_discards_previous_snapshot() {
        let mut board = board();
        assert_eq!(board.notifications().len(), 4);
        board.replace(vec![notification("x", MediaType::Movie, NotificationStatus::Pending, None)]);
        assert_eq!(board.notifications().len(), 1);
        assert!(board.find("m").is_none());
        assert!(board.fetched_at().is_some());
    }

    #[test]
    fn test_display_items_are_grouped() {
        let items = board().display_items();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_group_lookup_uses_full_snapshot() {
        let group = board().group("foo_S1").unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.aggregate_status(), NotificationStatus::Failed);
        assert!(board().group("missing_S1").is_none());
    }

    #[test]
    fn test_filtered_by_status_selects_members() {
        let filter = NotificationFilter {
            statuses: vec![NotificationStatus::Failed],
            ..NotificationFilter::default()
        };
        let items = board().filtered(&filter);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].notifications().len(), 1);
        assert_eq!(items[0].notifications()[0].notification_id, "e2");
    }

    #[test]
    fn test_hide_completed_keeps_partially_completed_groups_whole() {
        let filter = NotificationFilter {
            hide_completed: true,
            ..NotificationFilter::default()
        };
        let items = board().filtered(&filter);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].notifications().len(), 2);
    }

    #[test]
    fn test_summary_counts() {
        let summary = board().summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(NotificationStatus::Completed), 3);
        assert_eq!(summary.count(NotificationStatus::Failed), 1);
        assert_eq!(summary.count(NotificationStatus::Pending), 0);
        assert_eq!(
            summary.by_media_type,
            vec![(MediaType::Movie, 1), (MediaType::Series, 2), (MediaType::Anime, 1)]
        );
        assert_eq!(summary.total_release_size, 400);
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot_from_api() {
        let api = FakeApi::new(vec![
            notification("m", MediaType::Movie, NotificationStatus::Pending, None),
            notification("e1", MediaType::Series, NotificationStatus::Pending, Some("foo")),
        ]);
        let mut board = board();
        let count = board.refresh(&api).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(board.notifications().len(), 2);
        assert!(board.find("a1").is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_snapshot() {
        let api = FakeApi::failing_list();
        let mut board = board();
        assert!(board.refresh(&api).await.is_err());
        assert_eq!(board.notifications().len(), 4);
    }
}
