//! Terminal and JSON views of notifications, groups and settings.

use chrono::{DateTime, Utc};
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use serde_json::{json, Value};
use webhook_sync_core::format::{format_bytes, season_label, time_ago};
use webhook_sync_core::{BoardSummary, DisplayItem, GroupActionReport, NotificationGroup};
use webhook_sync_models::{AutoSyncSettings, MediaType, Notification, NotificationStatus, Timestamp};

const TITLE_WIDTH: usize = 48;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn status_color(status: NotificationStatus) -> Color {
    match status {
        NotificationStatus::Pending => Color::Yellow,
        NotificationStatus::WaitingAutoSync => Color::Cyan,
        NotificationStatus::Syncing => Color::Blue,
        NotificationStatus::Completed => Color::Green,
        NotificationStatus::Failed => Color::Red,
        NotificationStatus::Unknown => Color::Grey,
    }
}

pub fn status_cell(status: NotificationStatus) -> Cell {
    Cell::new(status.label()).fg(status_color(status))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn received(timestamp: Option<&Timestamp>, now: DateTime<Utc>) -> String {
    timestamp.map(|ts| time_ago(ts, now)).unwrap_or_else(|| "-".to_string())
}

fn size_text(bytes: u64) -> String {
    if bytes == 0 {
        "-".to_string()
    } else {
        format_bytes(bytes)
    }
}

fn media_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "Movie",
        MediaType::Series => "Series",
        MediaType::Anime => "Anime",
    }
}

/// One row per display item; groups are addressed by key, movies by notification id
pub fn items_table(items: &[DisplayItem], now: DateTime<Utc>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("ID / Group").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Items").add_attribute(Attribute::Bold),
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("Received").add_attribute(Attribute::Bold),
    ]);

    for item in items {
        match item {
            DisplayItem::Group(group) => {
                let title = format!("{} - {}", group.title(), season_label(group.season_number));
                table.add_row(vec![
                    Cell::new(&group.group_key),
                    Cell::new(media_label(group.media_type)),
                    Cell::new(truncate(&title, TITLE_WIDTH)),
                    status_cell(group.aggregate_status()),
                    Cell::new(group.len()),
                    Cell::new(size_text(group.total_release_size())),
                    Cell::new(received(group.created_at.as_ref(), now)),
                ]);
            }
            DisplayItem::Standalone { notification } => {
                table.add_row(vec![
                    Cell::new(&notification.notification_id),
                    Cell::new(media_label(notification.media_type)),
                    Cell::new(truncate(&notification.display_title(), TITLE_WIDTH)),
                    status_cell(notification.status),
                    Cell::new(1),
                    Cell::new(size_text(notification.size())),
                    Cell::new(received(notification.created_at.as_ref(), now)),
                ]);
            }
        }
    }
    table
}

fn detail_row(table: &mut Table, label: &str, value: Option<String>) {
    if let Some(value) = value {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
}

pub fn notification_table(notification: &Notification, now: DateTime<Utc>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(notification.display_title()).fg(Color::Cyan).add_attribute(Attribute::Bold),
        status_cell(notification.status),
    ]);

    let episodic = notification.media_type.is_episodic();
    detail_row(&mut table, "ID", Some(notification.notification_id.clone()));
    detail_row(&mut table, "Type", Some(media_label(notification.media_type).to_string()));
    detail_row(&mut table, "Series", notification.series_title.clone().filter(|_| episodic));
    detail_row(
        &mut table,
        "Group",
        episodic.then(|| webhook_sync_core::group_key(notification)),
    );
    detail_row(&mut table, "Season", episodic.then(|| season_label(notification.season())));
    detail_row(&mut table, "Episode", notification.episode_number.map(|e| e.to_string()));
    detail_row(&mut table, "Year", notification.year.map(|y| y.to_string()));
    detail_row(&mut table, "Requested by", notification.requested_by.clone());
    detail_row(&mut table, "Source", notification.webhook_source.clone());
    detail_row(&mut table, "Release", notification.release_title.clone());
    detail_row(&mut table, "Quality", notification.quality.as_ref().map(|q| q.label().to_string()));
    detail_row(&mut table, "Size", notification.release_size.map(format_bytes));
    detail_row(&mut table, "TMDB", notification.ids.tmdb_id.clone());
    detail_row(&mut table, "IMDB", notification.ids.imdb_id.clone());
    detail_row(&mut table, "TVDB", notification.ids.tvdb_id.clone());
    detail_row(&mut table, "Poster", notification.poster_url.clone());
    detail_row(
        &mut table,
        "Received",
        notification
            .created_at
            .as_ref()
            .map(|ts| format!("{} ({})", ts, time_ago(ts, now))),
    );
    detail_row(&mut table, "Synced", notification.synced_at.as_ref().map(|ts| ts.to_string()));
    detail_row(&mut table, "Error", notification.error_message.clone());
    table
}

pub fn group_table(group: &NotificationGroup, now: DateTime<Utc>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Episode").add_attribute(Attribute::Bold),
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Quality").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("Received").add_attribute(Attribute::Bold),
    ]);

    for episode in group.episodes_sorted() {
        table.add_row(vec![
            Cell::new(
                episode
                    .episode_number
                    .map(|n| format!("E{:02}", n))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(&episode.notification_id),
            Cell::new(truncate(episode.episode_title.as_deref().unwrap_or("-"), TITLE_WIDTH)),
            Cell::new(episode.quality.as_ref().map(|q| q.label()).unwrap_or("-")),
            status_cell(episode.status),
            Cell::new(size_text(episode.size())),
            Cell::new(received(episode.created_at.as_ref(), now)),
        ]);
    }
    table
}

pub fn group_heading(group: &NotificationGroup) -> String {
    let mut heading = format!("{} - {}", group.title(), season_label(group.season_number));
    if let Some(year) = group.year {
        heading.push_str(&format!(" ({})", year));
    }
    format!(
        "{} | {} | {} episode(s) | {}",
        heading,
        group.aggregate_status().label(),
        group.len(),
        format_bytes(group.total_release_size())
    )
}

pub fn settings_table(settings: &AutoSyncSettings) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Media type").add_attribute(Attribute::Bold),
        Cell::new("Auto-sync").add_attribute(Attribute::Bold),
    ]);
    for media_type in MediaType::all() {
        let enabled = settings.enabled_for(media_type);
        table.add_row(vec![
            Cell::new(media_label(media_type)),
            if enabled {
                Cell::new("enabled").fg(Color::Green)
            } else {
                Cell::new("disabled").fg(Color::Red)
            },
        ]);
    }
    table
}

/// Display item plus the values the list computes for it
pub fn item_json(item: &DisplayItem) -> Value {
    let mut value = serde_json::to_value(item).unwrap_or(Value::Null);
    if let (DisplayItem::Group(group), Value::Object(map)) = (item, &mut value) {
        map.insert("aggregate_status".to_string(), json!(group.aggregate_status()));
        map.insert("episode_count".to_string(), json!(group.len()));
        map.insert("total_release_size".to_string(), json!(group.total_release_size()));
    }
    value
}

pub fn items_json(items: &[DisplayItem], summary: &BoardSummary) -> Value {
    json!({
        "type": "notifications",
        "summary": summary_json(summary),
        "items": items.iter().map(item_json).collect::<Vec<_>>(),
    })
}

pub fn summary_json(summary: &BoardSummary) -> Value {
    let by_status: serde_json::Map<String, Value> = summary
        .by_status
        .iter()
        .map(|(status, count)| (status.as_str().to_string(), json!(count)))
        .collect();
    let by_media_type: serde_json::Map<String, Value> = summary
        .by_media_type
        .iter()
        .map(|(media_type, count)| (media_type.as_str().to_string(), json!(count)))
        .collect();
    json!({
        "total": summary.total,
        "by_status": by_status,
        "by_media_type": by_media_type,
        "total_release_size": summary.total_release_size,
    })
}

pub fn summary_line(summary: &BoardSummary) -> String {
    let statuses: Vec<String> = summary
        .by_status
        .iter()
        .map(|(status, count)| format!("{} {}", count, status.label().to_lowercase()))
        .collect();
    if statuses.is_empty() {
        return "No notifications".to_string();
    }
    format!(
        "{} notification(s): {} | {}",
        summary.total,
        statuses.join(", "),
        format_bytes(summary.total_release_size)
    )
}

pub fn report_json(report: &GroupActionReport) -> Value {
    let mut value = serde_json::to_value(report).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("type".to_string(), json!("group_action"));
    }
    value
}
