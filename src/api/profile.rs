//! Current-user profile calls.

use crate::client::{ApiClient, ApiError};
use crate::session::Role;
use serde::{Deserialize, Serialize};

/// Profile returned by `users/me/`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Partial profile update; absent fields are left untouched server-side.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}

/// Fetch the signed-in user's profile.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn fetch(client: &ApiClient) -> Result<Profile, ApiError> {
    client.get_json("users/me/").await
}

/// Apply a partial update to the signed-in user's profile.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn update(client: &ApiClient, changes: &ProfileUpdate) -> Result<Profile, ApiError> {
    client.patch_json("users/me/", changes).await
}
