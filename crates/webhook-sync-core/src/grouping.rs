//! Projection of a flat notification list into display items.
//!
//! Movies stay standalone. Series and anime episodes are bucketed by
//! `(series key, season)` so a season's worth of episode notifications is
//! shown and acted on as one unit. The projection is pure and rebuilt from
//! the full list on every call.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use webhook_sync_models::{MediaIds, MediaType, Notification, NotificationStatus, Timestamp};


/// Series key used when a notification has neither a slug nor a title
pub const UNKNOWN_SERIES_KEY: &str = "unknown";

/// Series identity: the slug when present, otherwise the title
pub fn series_key(notification: &Notification) -> &str {
    notification
        .series_title_slug
        .as_deref()
        .filter(|slug| !slug.is_empty())
        .or_else(|| notification.series_title.as_deref().filter(|title| !title.is_empty()))
        .unwrap_or(UNKNOWN_SERIES_KEY)
}

/// `<series key>_S<season>`, with an absent season counted as 0
pub fn group_key(notification: &Notification) -> String {
    format!("{}_S{}", series_key(notification), notification.season())
}

/// Episode notifications sharing a series and season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationGroup {
    pub group_key: String,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_title_slug: Option<String>,
    pub season_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    #[serde(flatten)]
    pub ids: MediaIds,
    /// Members in input order
    pub notifications: Vec<Notification>,
    /// Most recent member `created_at`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl NotificationGroup {
    /// Start a group; display metadata comes from the first member seen
    fn start(group_key: String, first: &Notification) -> Self {
        Self {
            group_key,
            media_type: first.media_type,
            series_title: first.series_title.clone().or_else(|| first.title.clone()),
            series_title_slug: first.series_title_slug.clone(),
            season_number: first.season(),
            poster_url: first.poster_url.clone(),
            year: first.year,
            requested_by: first.requested_by.clone(),
            ids: first.ids.clone(),
            notifications: Vec::new(),
            created_at: first.created_at.clone(),
        }
    }

    fn push(&mut self, notification: &Notification) {
        if let Some(candidate) = &notification.created_at {
            let newer = match &self.created_at {
                Some(current) => candidate > current,
                None => true,
            };
            if newer {
                self.created_at = Some(candidate.clone());
            }
        }
        self.notifications.push(notification.clone());
    }

    /// One status for the whole group: the first of syncing, failed,
    /// waiting_auto_sync or pending present among members, else completed
    pub fn aggregate_status(&self) -> NotificationStatus {
        NotificationStatus::AGGREGATE_PRIORITY
            .into_iter()
            .find(|status| self.notifications.iter().any(|n| n.status == *status))
            .unwrap_or(NotificationStatus::Completed)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Sum of member release sizes, absent sizes counted as 0
    pub fn total_release_size(&self) -> u64 {
        self.notifications.iter().map(Notification::size).sum()
    }

    /// Number of members per status, in the canonical status order
    pub fn status_counts(&self) -> Vec<(NotificationStatus, usize)> {
        let mut counts: Vec<(NotificationStatus, usize)> = Vec::new();
        for notification in &self.notifications {
            match counts.iter_mut().find(|(status, _)| *status == notification.status) {
                Some((_, count)) => *count += 1,
                None => counts.push((notification.status, 1)),
            }
        }
        counts.sort_by_key(|(status, _)| {
            NotificationStatus::all()
                .iter()
                .position(|s| s == status)
                .unwrap_or(usize::MAX)
        });
        counts
    }

    /// Members ordered by episode number; episodes without a number go last in input order
    pub fn episodes_sorted(&self) -> Vec<&Notification> {
        let mut episodes: Vec<&Notification> = self.notifications.iter().collect();
        episodes.sort_by_key(|n| (n.episode_number.is_none(), n.episode_number.unwrap_or(0)));
        episodes
    }

    /// Members a manual sync may be triggered for
    pub fn syncable(&self) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.status.is_syncable())
            .collect()
    }

    pub fn title(&self) -> &str {
        self.series_title.as_deref().unwrap_or(UNKNOWN_SERIES_KEY)
    }
}

/// One row of the notification list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayItem {
    Group(NotificationGroup),
    Standalone { notification: Notification },
}

impl DisplayItem {
    /// Timestamp the list is ordered by
    pub fn created_at(&self) -> Option<&Timestamp> {
        match self {
            DisplayItem::Group(group) => group.created_at.as_ref(),
            DisplayItem::Standalone { notification } => notification.created_at.as_ref(),
        }
    }

    pub fn status(&self) -> NotificationStatus {
        match self {
            DisplayItem::Group(group) => group.aggregate_status(),
            DisplayItem::Standalone { notification } => notification.status,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        match self {
            DisplayItem::Group(group) => &group.notifications,
            DisplayItem::Standalone { notification } => std::slice::from_ref(notification),
        }
    }

    pub fn as_group(&self) -> Option<&NotificationGroup> {
        match self {
            DisplayItem::Group(group) => Some(group),
            DisplayItem::Standalone { .. } => None,
        }
    }
}

/// Partition notifications into standalone movies and series/season groups,
/// most recent first.
///
/// Total over any input: every movie appears as exactly one standalone item
/// and every episode as a member of exactly one group.
pub fn group_notifications(notifications: &[Notification]) -> Vec<DisplayItem> {
    let mut groups: Vec<NotificationGroup> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut standalone: Vec<DisplayItem> = Vec::new();

    for notification in notifications {
        if !notification.media_type.is_episodic() {
            standalone.push(DisplayItem::Standalone {
                notification: notification.clone(),
            });
            continue;
        }

        let key = group_key(notification);
        let index = match index_by_key.get(&key) {
            Some(index) => *index,
            None => {
                groups.push(NotificationGroup::start(key.clone(), notification));
                index_by_key.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[index].push(notification);
    }

    debug!(
        operation = "group_notifications",
        input = notifications.len(),
        groups = groups.len(),
        standalone = standalone.len(),
        "Grouped notifications"
    );

    let mut items: Vec<DisplayItem> = groups.into_iter().map(DisplayItem::Group).collect();
    items.extend(standalone);
    // Stable: items with equal timestamps keep groups-then-standalone input order
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    items
}
