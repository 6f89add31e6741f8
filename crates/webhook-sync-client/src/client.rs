use crate::api::{self, API_PREFIX};
use crate::error::ClientError;
use crate::traits::NotificationApi;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use webhook_sync_models::{AutoSyncSettings, Notification};

const API_KEY_HEADER: &str = "X-Api-Key";

/// HTTP client for the webhook notification backend
#[derive(Clone)]
pub struct WebhookClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl WebhookClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(concat!("hooksync/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full URL for a path below the webhook API prefix
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, API_PREFIX, path.trim_start_matches('/'))
    }

    pub fn notification_endpoint(&self, notification_id: &str, action: Option<&str>) -> String {
        let encoded = urlencoding::encode(notification_id);
        match action {
            Some(action) => self.endpoint(&format!("notifications/{}/{}", encoded, action)),
            None => self.endpoint(&format!("notifications/{}", encoded)),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, operation: &'static str, builder: RequestBuilder) -> Result<String, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { operation, status, body });
        }

        let body = response.text().await?;
        debug!(operation, status = status.as_u16(), bytes = body.len(), "Webhook API response");
        Ok(body)
    }

    async fn notification_action(
        &self,
        operation: &'static str,
        method: Method,
        notification_id: &str,
        action: Option<&str>,
    ) -> Result<(), ClientError> {
        let url = self.notification_endpoint(notification_id, action);
        let body = self.send(operation, self.request(method, &url)).await?;
        api::decode_action(operation, &body)
    }
}

/// Trim whitespace and trailing slashes, and require an http(s) scheme
pub fn normalize_base_url(base_url: &str) -> Result<String, ClientError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: "URL is empty".to_string(),
        });
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: "URL must start with http:// or https://".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl NotificationApi for WebhookClient {
    type Error = ClientError;

    fn endpoint_name(&self) -> &str {
        &self.base_url
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, Self::Error> {
        let url = self.endpoint("notifications");
        let body = self.send("list notifications", self.request(Method::GET, &url)).await?;
        let notifications = api::decode_notification_list(&body)?;
        info!(operation = "list_notifications", count = notifications.len(), "Fetched notifications");
        Ok(notifications)
    }

    async fn get_notification(&self, notification_id: &str) -> Result<Notification, Self::Error> {
        let url = self.notification_endpoint(notification_id, None);
        let body = self.send("get notification", self.request(Method::GET, &url)).await?;
        api::decode_notification(&body)
    }

    async fn get_auto_sync_settings(&self) -> Result<AutoSyncSettings, Self::Error> {
        let url = self.endpoint("settings");
        let body = self.send("get auto-sync settings", self.request(Method::GET, &url)).await?;
        api::decode_settings("get auto-sync settings", &body)
    }

    async fn sync_notification(&self, notification_id: &str) -> Result<(), Self::Error> {
        self.notification_action("sync notification", Method::POST, notification_id, Some("sync"))
            .await?;
        info!(operation = "sync_notification", notification_id, "Sync triggered");
        Ok(())
    }

    async fn complete_notification(&self, notification_id: &str) -> Result<(), Self::Error> {
        self.notification_action("complete notification", Method::POST, notification_id, Some("complete"))
            .await?;
        info!(operation = "complete_notification", notification_id, "Notification marked completed");
        Ok(())
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<(), Self::Error> {
        self.notification_action("delete notification", Method::DELETE, notification_id, None)
            .await?;
        info!(operation = "delete_notification", notification_id, "Notification deleted");
        Ok(())
    }

    async fn update_auto_sync_settings(
        &self,
        settings: &AutoSyncSettings,
    ) -> Result<AutoSyncSettings, Self::Error> {
        const OPERATION: &str = "update auto-sync settings";
        let url = self.endpoint("settings");
        let body = self
            .send(OPERATION, self.request(Method::POST, &url).json(settings))
            .await?;

        // Servers that echo nothing back keep the settings we sent
        let value = api::parse_body(OPERATION, &body)?;
        api::check_success(OPERATION, &value)?;
        let echoed = api::unwrap_envelope(OPERATION, value, "settings")?;
        let has_settings = echoed
            .as_object()
            .map(|map| map.keys().any(|key| key.starts_with("auto_sync_")))
            .unwrap_or(false);
        let updated = if has_settings {
            serde_json::from_value(echoed).map_err(|source| ClientError::Decode {
                operation: OPERATION,
                source,
            })?
        } else {
            *settings
        };
        info!(
            operation = "update_auto_sync_settings",
            movies = updated.auto_sync_movies,
            series = updated.auto_sync_series,
            anime = updated.auto_sync_anime,
            "Auto-sync settings updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its base URL
    fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response);
                let _ = stream.flush();
            }
        });
        format!("http://{}", addr)
    }

    fn client() -> WebhookClient {
        WebhookClient::new("http://localhost:8000/", None, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_is_normalized() {
        assert_eq!(client().base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_invalid_base_urls() {
        assert!(matches!(normalize_base_url("  "), Err(ClientError::InvalidUrl { .. })));
        assert!(matches!(normalize_base_url("localhost:8000"), Err(ClientError::InvalidUrl { .. })));
        assert!(normalize_base_url("https://media.example.com//").is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let client = client();
        assert_eq!(client.endpoint("notifications"), "http://localhost:8000/api/webhook/notifications");
        assert_eq!(client.endpoint("/settings"), "http://localhost:8000/api/webhook/settings");
        assert_eq!(
            client.notification_endpoint("abc", Some("sync")),
            "http://localhost:8000/api/webhook/notifications/abc/sync"
        );
    }

    #[test]
    fn test_notification_id_is_url_encoded() {
        assert_eq!(
            client().notification_endpoint("a b/c", None),
            "http://localhost:8000/api/webhook/notifications/a%20b%2Fc"
        );
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let client = WebhookClient::new("http://localhost", Some("  ".to_string()), Duration::from_secs(1)).unwrap();
        assert!(!client.has_api_key());
    }

    #[tokio::test]
    async fn test_truncated_success_body_is_an_error() {
        let base_url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 5000\r\n\r\n[{\"notification_id\":\"a\"}",
        );
        let client = WebhookClient::new(&base_url, None, Duration::from_secs(5)).unwrap();
        let result = client.list_notifications().await;
        assert!(matches!(result, Err(ClientError::Http(_))), "got {:?}", result.map(|n| n.len()));
    }

    #[tokio::test]
    async fn test_complete_success_body_is_decoded() {
        let base_url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 25\r\nConnection: close\r\n\r\n[{\"notification_id\":\"a\"}]",
        );
        let client = WebhookClient::new(&base_url, None, Duration::from_secs(5)).unwrap();
        let notifications = client.list_notifications().await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].notification_id, "a");
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let base_url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 7\r\nConnection: close\r\n\r\nmissing",
        );
        let client = WebhookClient::new(&base_url, None, Duration::from_secs(5)).unwrap();
        let err = client.get_notification("n1").await.unwrap_err();
        assert!(err.is_not_found());
        match err {
            ClientError::Status { body, .. } => assert_eq!(body, "missing"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
