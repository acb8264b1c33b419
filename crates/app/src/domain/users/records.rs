//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID, shared with the hosted auth service.
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// Profile projection shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub email: Option<String>,
}
