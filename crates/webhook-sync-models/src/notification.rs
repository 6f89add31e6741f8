use crate::media::MediaType;
use crate::media_ids::MediaIds;
use crate::quality::Quality;
use crate::status::NotificationStatus;
use crate::timestamp::Timestamp;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single webhook-originated sync record for one movie or one episode.
///
/// Decoding is lenient: every field other than the id falls back to its
/// default when missing or malformed, so one bad record never breaks a listing.
/// A bare `id` key stands in for `notification_id` only when the latter is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(remote = "Self")]
pub struct Notification {
    #[serde(default, deserialize_with = "crate::lenient::string")]
    pub notification_id: String,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub status: NotificationStatus,

    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    #[serde(flatten)]
    pub ids: MediaIds,

    // Episode fields, only meaningful for series and anime
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub series_title_slug: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(default, deserialize_with = "crate::lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub episode_title: Option<String>,

    // Release details
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub release_title: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub release_size: Option<u64>,
    #[serde(default, deserialize_with = "crate::lenient::quality", skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    /// Which *arr/request service sent the webhook
    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub webhook_source: Option<String>,

    #[serde(default, deserialize_with = "crate::lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "crate::lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "crate::lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<Timestamp>,
}

impl Serialize for Notification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Notification::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Notification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        if let Value::Object(record) = &mut value {
            let fallback = record.remove("id");
            let has_own_id = match record.get("notification_id") {
                None | Some(Value::Null) => false,
                Some(Value::String(id)) => !id.trim().is_empty(),
                Some(_) => true,
            };
            if let (false, Some(id)) = (has_own_id, fallback) {
                record.insert("notification_id".to_string(), id);
            }
        }
        Notification::deserialize(value).map_err(de::Error::custom)
    }
}

impl Notification {
    /// Season number, absent counts as season 0
    pub fn season(&self) -> u32 {
        self.season_number.unwrap_or(0)
    }

    /// Release size in bytes, absent counts as 0
    pub fn size(&self) -> u64 {
        self.release_size.unwrap_or(0)
    }

    /// Best title for display: episode title for episodes, otherwise the title
    pub fn display_title(&self) -> String {
        if self.media_type.is_episodic() {
            let series = self
                .series_title
                .as_deref()
                .or(self.title.as_deref())
                .unwrap_or("Unknown series");
            match (self.episode_number, self.episode_title.as_deref()) {
                (Some(episode), Some(title)) => {
                    format!("{} S{:02}E{:02} - {}", series, self.season(), episode, title)
                }
                (Some(episode), None) => format!("{} S{:02}E{:02}", series, self.season(), episode),
                (None, _) => format!("{} S{:02}", series, self.season()),
            }
        } else {
            let title = self.title.as_deref().unwrap_or("Unknown title");
            match self.year {
                Some(year) => format!("{} ({})", title, year),
                None => title.to_string(),
            }
        }
    }
}
