use crate::grouping::DisplayItem;
use webhook_sync_models::{MediaType, Notification, NotificationStatus};

/// Narrowing applied to the notification list before and after grouping.
///
/// Status and media type filters select individual notifications before they
/// are grouped; `hide_completed` drops whole rows whose (aggregate) status is
/// completed so partially completed seasons still show all their episodes.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    /// Empty means every status
    pub statuses: Vec<NotificationStatus>,
    /// Empty means every media type
    pub media_types: Vec<MediaType>,
    pub hide_completed: bool,
}

impl NotificationFilter {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.media_types.is_empty() && !self.hide_completed
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&notification.status))
            && (self.media_types.is_empty() || self.media_types.contains(&notification.media_type))
    }

    pub fn keeps(&self, item: &DisplayItem) -> bool {
        !(self.hide_completed && item.status() == NotificationStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(media_type: MediaType, status: NotificationStatus) -> Notification {
        Notification {
            media_type,
            status,
            ..Notification::default()
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = NotificationFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&notification(MediaType::Anime, NotificationStatus::Failed)));
    }

    #[test]
    fn test_status_and_media_type_filters_combine() {
        let filter = NotificationFilter {
            statuses: vec![NotificationStatus::Failed, NotificationStatus::Pending],
            media_types: vec![MediaType::Series],
            hide_completed: false,
        };
        assert!(filter.matches(&notification(MediaType::Series, NotificationStatus::Failed)));
        assert!(!filter.matches(&notification(MediaType::Movie, NotificationStatus::Failed)));
        assert!(!filter.matches(&notification(MediaType::Series, NotificationStatus::Completed)));
    }

    #[test]
    fn test_hide_completed_checks_row_status() {
        let filter = NotificationFilter {
            hide_completed: true,
            ..NotificationFilter::default()
        };
        let completed = DisplayItem::Standalone {
            notification: notification(MediaType::Movie, NotificationStatus::Completed),
        };
        let pending = DisplayItem::Standalone {
            notification: notification(MediaType::Movie, NotificationStatus::Pending),
        };
        assert!(!filter.keeps(&completed));
        assert!(filter.keeps(&pending));
    }
}
