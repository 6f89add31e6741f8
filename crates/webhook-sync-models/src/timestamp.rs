use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A timestamp as sent by the backend.
///
/// The raw text is kept verbatim for display and re-serialization. When it
/// parses as a date, ordering uses the parsed instant; unparseable values
/// still order among themselves by their text and are older than any
/// parseable value.
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_datetime(&raw);
        Self { raw, parsed }
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self {
            raw: datetime.to_rfc3339(),
            parsed: Some(datetime),
        }
    }

    /// Seconds since the Unix epoch, as some senders report them
    pub fn from_unix_seconds(seconds: i64) -> Self {
        Self {
            raw: seconds.to_string(),
            parsed: DateTime::from_timestamp(seconds, 0),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.parsed, other.parsed) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Timestamp::new(raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Timestamp::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_common_formats() {
        assert!(Timestamp::new("2024-06-01T12:30:00Z").is_parsed());
        assert!(Timestamp::new("2024-06-01T12:30:00.123456").is_parsed());
        assert!(Timestamp::new("2024-06-01 12:30:00").is_parsed());
        assert!(Timestamp::new("2024-06-01").is_parsed());
        assert!(!Timestamp::new("yesterday").is_parsed());
        assert!(!Timestamp::new("").is_parsed());
    }

    #[test]
    fn test_parsed_timestamps_order_by_instant() {
        let earlier = Timestamp::new("2024-06-01T12:00:00+02:00");
        let later = Timestamp::new("2024-06-01T11:00:00Z");
        assert!(later > earlier);
    }

    #[test]
    fn test_same_instant_different_text_is_equal() {
        assert_eq!(Timestamp::new("2024-01-01"), Timestamp::new("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_unparsed_is_older_than_parsed() {
        assert!(Timestamp::new("not a date") < Timestamp::new("1970-01-02"));
    }

    #[test]
    fn test_unparsed_orders_lexicographically() {
        assert!(Timestamp::new("t3") > Timestamp::new("t2"));
    }

    #[test]
    fn test_serializes_raw_text() {
        let ts = Timestamp::new("2024-06-01");
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-06-01\"");
    }
}
