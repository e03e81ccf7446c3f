use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::{deserialize_opt_date, null_as_default};

/// Gym member as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    #[serde(
        default,
        deserialize_with = "deserialize_opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub join_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
}

impl Member {
    /// Join date rendered with the configured format, `N/A` when unknown
    pub fn join_date_label(&self, format: &str) -> String {
        self.join_date
            .map(|d| d.format(format).to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Body of `POST /api/members/login`
#[derive(Debug, Clone, Serialize)]
pub struct MemberCredentials {
    pub email: String,
    pub password: String,
}

/// Response of `POST /api/members/login`: the member plus an optional bearer token
#[derive(Debug, Clone, Deserialize)]
pub struct MemberLogin {
    #[serde(flatten)]
    pub member: Member,

    #[serde(default)]
    pub token: Option<String>,
}

/// Body of `POST /api/members`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub password: String,
    pub join_date: NaiveDate,
    pub profile_photo_url: String,
}

/// Response of `POST /api/members/{id}/upload-photo`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpload {
    pub photo_url: String,
}
