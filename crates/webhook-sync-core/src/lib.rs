pub mod actions;
pub mod board;
pub mod filter;
pub mod format;
pub mod grouping;

#[cfg(test)]
mod testing;

pub use actions::{complete_group, delete_group, run_group_action, sync_group, toggle_auto_sync, GroupAction, GroupActionReport};
pub use board::{BoardSummary, NotificationBoard};
pub use filter::NotificationFilter;
pub use grouping::{group_key, group_notifications, series_key, DisplayItem, NotificationGroup};
