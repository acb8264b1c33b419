//! Profile Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use brankas_app::domain::users::records::Profile;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileResponse {
    pub full_name: String,
    pub email: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            full_name: profile.full_name,
            email: profile.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProfileRequest {
    pub full_name: String,
}
