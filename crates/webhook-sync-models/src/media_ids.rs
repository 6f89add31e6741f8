use serde::{Deserialize, Serialize};

/// External database identifiers attached to a notification.
///
/// Senders report these as numbers or strings; both are kept as strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct MediaIds {
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<String>,
}

impl MediaIds {
    /// Get the primary identifier (prefer imdb_id, fallback to others)
    pub fn primary_id(&self) -> Option<String> {
        self.imdb_id
            .clone()
            .or_else(|| self.tmdb_id.as_ref().map(|id| format!("tmdb:{}", id)))
            .or_else(|| self.tvdb_id.as_ref().map(|id| format!("tvdb:{}", id)))
    }

    pub fn is_empty(&self) -> bool {
        self.tmdb_id.is_none() && self.imdb_id.is_none() && self.tvdb_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids() {
        let ids: MediaIds = serde_json::from_value(json!({
            "tmdb_id": 1399,
            "imdb_id": "tt0944947",
            "tvdb_id": "121361"
        }))
        .unwrap();
        assert_eq!(ids.tmdb_id.as_deref(), Some("1399"));
        assert_eq!(ids.tvdb_id.as_deref(), Some("121361"));
        assert_eq!(ids.primary_id().as_deref(), Some("tt0944947"));
    }

    #[test]
    fn test_primary_id_fallback() {
        let ids = MediaIds {
            tmdb_id: Some("603".to_string()),
            ..MediaIds::default()
        };
        assert_eq!(ids.primary_id().as_deref(), Some("tmdb:603"));
        assert!(MediaIds::default().is_empty());
    }
}
