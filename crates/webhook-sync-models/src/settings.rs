use crate::media::MediaType;
use serde::{Deserialize, Serialize};

/// Per-media-type auto-sync switches as stored on the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AutoSyncSettings {
    #[serde(default)]
    pub auto_sync_movies: bool,
    #[serde(default)]
    pub auto_sync_series: bool,
    #[serde(default)]
    pub auto_sync_anime: bool,
}

impl AutoSyncSettings {
    pub fn enabled_for(&self, media_type: MediaType) -> bool {
        match media_type {
            MediaType::Movie => self.auto_sync_movies,
            MediaType::Series => self.auto_sync_series,
            MediaType::Anime => self.auto_sync_anime,
        }
    }

    pub fn set(&mut self, media_type: MediaType, enabled: bool) {
        match media_type {
            MediaType::Movie => self.auto_sync_movies = enabled,
            MediaType::Series => self.auto_sync_series = enabled,
            MediaType::Anime => self.auto_sync_anime = enabled,
        }
    }

    /// Flip the switch for one media type and return its new value
    pub fn toggle(&mut self, media_type: MediaType) -> bool {
        let enabled = !self.enabled_for(media_type);
        self.set(media_type, enabled);
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_only_touches_one_type() {
        let mut settings = AutoSyncSettings::default();
        assert!(settings.toggle(MediaType::Anime));
        assert!(settings.auto_sync_anime);
        assert!(!settings.auto_sync_movies);
        assert!(!settings.auto_sync_series);
        assert!(!settings.toggle(MediaType::Anime));
    }

    #[test]
    fn test_partial_settings_decode() {
        let settings: AutoSyncSettings = serde_json::from_str(r#"{"auto_sync_series": true}"#).unwrap();
        assert!(settings.enabled_for(MediaType::Series));
        assert!(!settings.enabled_for(MediaType::Movie));
    }
}
