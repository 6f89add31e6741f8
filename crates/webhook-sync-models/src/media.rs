use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Kind of media a webhook notification refers to.
///
/// Webhook senders disagree on naming: Sonarr-style senders report `tvshows`
/// where others report `series`, so both tags map to [`MediaType::Series`].
/// A missing or unrecognised tag is treated as a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    #[default]
    Movie,
    Series,
    Anime,
}

impl MediaType {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "series" | "tvshows" | "tvshow" | "tv" => MediaType::Series,
            "anime" => MediaType::Anime,
            _ => MediaType::Movie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Anime => "anime",
        }
    }

    /// Episode-based media is grouped by series and season; movies stay standalone.
    pub fn is_episodic(&self) -> bool {
        matches!(self, MediaType::Series | MediaType::Anime)
    }

    pub fn all() -> [MediaType; 3] {
        [MediaType::Movie, MediaType::Series, MediaType::Anime]
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "series" | "tvshows" | "tv" => Ok(MediaType::Series),
            "anime" => Ok(MediaType::Anime),
            other => Err(format!("Invalid media type: {}. Use 'movie', 'series' or 'anime'", other)),
        }
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(tag)) => MediaType::from_tag(&tag),
            _ => MediaType::Movie,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tvshows_is_series_synonym() {
        assert_eq!(MediaType::from_tag("tvshows"), MediaType::Series);
        assert_eq!(MediaType::from_tag("series"), MediaType::Series);
        assert_eq!(MediaType::from_tag("ANIME"), MediaType::Anime);
    }

    #[test]
    fn test_unknown_and_missing_default_to_movie() {
        let parsed: MediaType = serde_json::from_str("\"music\"").unwrap();
        assert_eq!(parsed, MediaType::Movie);
        let parsed: MediaType = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, MediaType::Movie);
        let parsed: MediaType = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, MediaType::Movie);
    }

    #[test]
    fn test_serializes_canonical_tag() {
        assert_eq!(serde_json::to_string(&MediaType::from_tag("tvshows")).unwrap(), "\"series\"");
    }
}
