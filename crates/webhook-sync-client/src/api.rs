//! Response decoding for the `/api/webhook` endpoints.
//!
//! The backend answers either with the bare payload or with an envelope
//! such as `{"success": true, "notifications": [...]}`. Envelopes carrying
//! `success: false` are turned into [`ClientError::Api`].

use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use webhook_sync_models::{AutoSyncSettings, Notification};

pub const API_PREFIX: &str = "/api/webhook";

/// Parse a response body, treating an empty body as `null`
pub fn parse_body(operation: &'static str, body: &str) -> Result<Value, ClientError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|source| ClientError::Decode { operation, source })
}

/// Fail on `{"success": false, ...}` envelopes
pub fn check_success(operation: &'static str, value: &Value) -> Result<(), ClientError> {
    if let Some(Value::Bool(false)) = value.get("success") {
        let message = value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(ClientError::Api { operation, message });
    }
    Ok(())
}

/// Pull the payload out of an envelope, looking under `key`, then `data`,
/// then falling back to the value itself
pub fn unwrap_envelope(operation: &'static str, value: Value, key: &str) -> Result<Value, ClientError> {
    check_success(operation, &value)?;
    match value {
        Value::Object(mut map) => {
            if let Some(inner) = map.remove(key) {
                return Ok(inner);
            }
            if let Some(inner) = map.remove("data") {
                return Ok(inner);
            }
            Ok(Value::Object(map))
        }
        other => Ok(other),
    }
}

fn decode<T: DeserializeOwned>(operation: &'static str, value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|source| ClientError::Decode { operation, source })
}

/// Decode a notification listing.
///
/// Records are decoded one by one so a single record that is not even an
/// object is skipped with a warning instead of failing the listing.
pub fn decode_notification_list(body: &str) -> Result<Vec<Notification>, ClientError> {
    const OPERATION: &str = "list notifications";
    let value = unwrap_envelope(OPERATION, parse_body(OPERATION, body)?, "notifications")?;
    let records = match value {
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        other => {
            return Err(ClientError::Api {
                operation: OPERATION,
                message: format!("expected a list of notifications, got {}", json_kind(&other)),
            })
        }
    };

    let total = records.len();
    let notifications: Vec<Notification> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Notification>(record) {
            Ok(notification) => Some(notification),
            Err(e) => {
                warn!(operation = "list_notifications", index, error = %e, "Skipping undecodable notification");
                None
            }
        })
        .collect();

    if notifications.len() < total {
        warn!(
            operation = "list_notifications",
            skipped = total - notifications.len(),
            total,
            "Some notifications could not be decoded"
        );
    }
    Ok(notifications)
}

pub fn decode_notification(body: &str) -> Result<Notification, ClientError> {
    const OPERATION: &str = "get notification";
    let value = unwrap_envelope(OPERATION, parse_body(OPERATION, body)?, "notification")?;
    decode(OPERATION, value)
}

pub fn decode_settings(operation: &'static str, body: &str) -> Result<AutoSyncSettings, ClientError> {
    let value = unwrap_envelope(operation, parse_body(operation, body)?, "settings")?;
    decode(operation, value)
}

/// Validate the body of an action endpoint (sync, complete, delete)
pub fn decode_action(operation: &'static str, body: &str) -> Result<(), ClientError> {
    // Some endpoints answer with plain text; only JSON envelopes are inspected
    match serde_json::from_str::<Value>(body) {
        Ok(value) => check_success(operation, &value),
        Err(_) => Ok(()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webhook_sync_models::{MediaType, NotificationStatus};

    #[test]
    fn test_decode_bare_list() {
        let body = r#"[{"notification_id": "a", "media_type": "movie"}, {"notification_id": "b", "media_type": "anime"}]"#;
        let notifications = decode_notification_list(body).unwrap();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[1].media_type, MediaType::Anime);
    }

    #[test]
    fn test_decode_enveloped_list() {
        let body = r#"{"success": true, "notifications": [{"notification_id": "a", "status": "failed"}], "total": 1}"#;
        let notifications = decode_notification_list(body).unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].status, NotificationStatus::Failed);
    }

    #[test]
    fn test_list_skips_non_object_records() {
        let body = r#"[{"notification_id": "a"}, "garbage", 42]"#;
        let notifications = decode_notification_list(body).unwrap();
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn test_list_keeps_rows_with_database_id() {
        let body = r#"[{"id": 7, "notification_id": "abc", "media_type": "series", "series_title": "Foo"},
                       {"id": 8, "notification_id": "def", "media_type": "series", "series_title": "Foo"}]"#;
        let notifications = decode_notification_list(body).unwrap();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].notification_id, "abc");
        assert_eq!(notifications[1].notification_id, "def");
    }

    #[test]
    fn test_empty_body_is_empty_list() {
        assert!(decode_notification_list("").unwrap().is_empty());
    }

    #[test]
    fn test_unsuccessful_envelope_is_api_error() {
        let body = r#"{"success": false, "error": "database locked"}"#;
        match decode_notification_list(body) {
            Err(ClientError::Api { message, .. }) => assert_eq!(message, "database locked"),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_rejects_scalar_payload() {
        assert!(matches!(decode_notification_list("\"nope\""), Err(ClientError::Api { .. })));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        assert!(matches!(decode_notification_list("{not json"), Err(ClientError::Decode { .. })));
    }

    #[test]
    fn test_decode_enveloped_notification() {
        let body = r#"{"success": true, "notification": {"notification_id": "x", "media_type": "tvshows"}}"#;
        let notification = decode_notification(body).unwrap();
        assert_eq!(notification.notification_id, "x");
        assert_eq!(notification.media_type, MediaType::Series);
    }

    #[test]
    fn test_decode_settings_shapes() {
        let bare = decode_settings("get settings", r#"{"auto_sync_movies": true}"#).unwrap();
        assert!(bare.auto_sync_movies);
        let wrapped = decode_settings(
            "get settings",
            r#"{"success": true, "settings": {"auto_sync_anime": true}}"#,
        )
        .unwrap();
        assert!(wrapped.auto_sync_anime);
        assert!(!wrapped.auto_sync_movies);
    }

    #[test]
    fn test_action_body_checks() {
        assert!(decode_action("sync notification", "").is_ok());
        assert!(decode_action("sync notification", "OK").is_ok());
        assert!(decode_action("sync notification", r#"{"success": true}"#).is_ok());
        assert!(decode_action("sync notification", r#"{"success": false, "message": "busy"}"#).is_err());
    }
}
