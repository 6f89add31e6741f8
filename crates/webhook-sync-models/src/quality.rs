use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Release quality label.
///
/// Some senders report a plain string (`"WEBDL-1080p"`), others an object
/// (`{"name": "WEBDL-1080p", ...}` or `{"quality": {"name": ...}, "revision": ...}`).
/// The shape is resolved once when the notification is decoded, through
/// [`Quality::from_value`]; both shapes serialize as the bare label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quality {
    Plain(String),
    Structured { name: String },
}

impl Quality {
    pub fn label(&self) -> &str {
        match self {
            Quality::Plain(label) => label,
            Quality::Structured { name } => name,
        }
    }

    /// Resolve a raw JSON value into a quality label, `None` when it has no usable name
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(label) if !label.trim().is_empty() => Some(Quality::Plain(label.clone())),
            Value::Object(map) => match map.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => {
                    Some(Quality::Structured { name: name.clone() })
                }
                _ => map.get("quality").and_then(Quality::from_value).map(|inner| Quality::Structured {
                    name: inner.label().to_string(),
                }),
            },
            _ => None,
        }
    }
}

impl Serialize for Quality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_label() {
        let quality = Quality::from_value(&json!("HDTV-720p")).unwrap();
        assert_eq!(quality, Quality::Plain("HDTV-720p".to_string()));
        assert_eq!(quality.label(), "HDTV-720p");
    }

    #[test]
    fn test_structured_label() {
        let quality = Quality::from_value(&json!({"id": 7, "name": "Bluray-1080p"})).unwrap();
        assert_eq!(quality.label(), "Bluray-1080p");
    }

    #[test]
    fn test_nested_arr_style_label() {
        let value = json!({"quality": {"id": 3, "name": "WEBDL-1080p"}, "revision": {"version": 1}});
        let quality = Quality::from_value(&value).unwrap();
        assert_eq!(quality, Quality::Structured { name: "WEBDL-1080p".to_string() });
    }

    #[test]
    fn test_unusable_values() {
        assert!(Quality::from_value(&json!(1080)).is_none());
        assert!(Quality::from_value(&json!({"id": 3})).is_none());
        assert!(Quality::from_value(&json!("")).is_none());
    }

    #[test]
    fn test_serializes_as_label() {
        let structured = Quality::Structured { name: "Bluray-2160p".to_string() };
        assert_eq!(serde_json::to_value(&structured).unwrap(), json!("Bluray-2160p"));
        assert_eq!(serde_json::to_value(Quality::Plain("SDTV".to_string())).unwrap(), json!("SDTV"));
    }
}
