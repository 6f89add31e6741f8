use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const API_KEY: &str = "api_key";
const LAST_FETCH: &str = "last_fetch";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Secrets and small bits of client state kept out of `config.toml`
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_api_key(&self) -> Option<&String> {
        self.get(API_KEY).filter(|key| !key.is_empty())
    }

    pub fn set_api_key(&mut self, key: String) {
        self.set(API_KEY.to_string(), key);
    }

    /// When the notification list was last fetched successfully
    pub fn get_last_fetch(&self) -> Option<DateTime<Utc>> {
        self.get(LAST_FETCH)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_last_fetch(&mut self, fetched_at: DateTime<Utc>) {
        self.set(LAST_FETCH.to_string(), fetched_at.to_rfc3339());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_api_key("test_key".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_api_key(), Some(&"test_key".to_string()));
    }

    #[test]
    fn test_credential_store_last_fetch() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        let fetched_at = Utc::now();
        store.set_last_fetch(fetched_at);
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        let loaded = loaded_store.get_last_fetch().unwrap();
        assert!((loaded - fetched_at).num_seconds().abs() < 2);
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/hooksync-test"));
        store.set_api_key(String::new());
        assert_eq!(store.get_api_key(), None);
        store.set_api_key("k".to_string());
        store.remove(API_KEY);
        assert_eq!(store.get_api_key(), None);
    }
}
