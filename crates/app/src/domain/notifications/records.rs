//! Notification Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notification Record
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub user_uuid: UserUuid,
    pub message: String,
    pub link_url: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
}
