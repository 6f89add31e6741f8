use chrono::{DateTime, Utc};
use webhook_sync_models::Timestamp;

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable size in 1024-based units with at most two decimals
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, BYTE_UNITS[unit])
}

/// Relative age of a timestamp; unparseable timestamps are shown verbatim
pub fn time_ago(timestamp: &Timestamp, now: DateTime<Utc>) -> String {
    let Some(at) = timestamp.datetime() else {
        return timestamp.raw().to_string();
    };
    let seconds = (now - at).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = hours / 24;
    if days < 7 {
        return plural(days, "day");
    }
    at.format("%Y-%m-%d").to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

pub fn season_label(season: u32) -> String {
    if season == 0 {
        "Specials".to_string()
    } else {
        format!("Season {}", season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_500_000_000), "1.4 GB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024 * 1024 * 1024), "5120 TB");
    }

    #[test]
    fn test_time_ago() {
        let now = Utc::now();
        let at = |delta: Duration| Timestamp::from_datetime(now - delta);
        assert_eq!(time_ago(&at(Duration::seconds(10)), now), "just now");
        assert_eq!(time_ago(&at(Duration::seconds(-30)), now), "just now");
        assert_eq!(time_ago(&at(Duration::minutes(1)), now), "1 minute ago");
        assert_eq!(time_ago(&at(Duration::minutes(45)), now), "45 minutes ago");
        assert_eq!(time_ago(&at(Duration::hours(3)), now), "3 hours ago");
        assert_eq!(time_ago(&at(Duration::days(2)), now), "2 days ago");
        let old = now - Duration::days(30);
        assert_eq!(time_ago(&Timestamp::from_datetime(old), now), old.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_time_ago_unparsed() {
        assert_eq!(time_ago(&Timestamp::new("sometime"), Utc::now()), "sometime");
    }

    #[test]
    fn test_season_label() {
        assert_eq!(season_label(0), "Specials");
        assert_eq!(season_label(4), "Season 4");
    }
}
