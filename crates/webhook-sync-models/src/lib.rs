pub mod lenient;
pub mod media;
pub mod media_ids;
pub mod notification;
pub mod quality;
pub mod settings;
pub mod status;
pub mod timestamp;

pub use media::MediaType;
pub use media_ids::MediaIds;
pub use notification::Notification;
pub use quality::Quality;
pub use settings::AutoSyncSettings;
pub use status::NotificationStatus;
pub use timestamp::Timestamp;
