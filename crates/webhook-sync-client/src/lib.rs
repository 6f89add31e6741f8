pub mod api;
pub mod client;
pub mod error;
pub mod factory;
pub mod traits;

pub use client::WebhookClient;
pub use error::ClientError;
pub use factory::{create_client, create_client_for};
pub use traits::NotificationApi;
