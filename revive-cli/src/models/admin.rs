use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/admin/login`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredentials {
    pub admin_id: String,
    pub password: String,
}

/// Response of `POST /api/admin/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLogin {
    pub admin_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Dashboard counters from `GET /api/admin/stats`.
///
/// Unknown counters are kept in `extra` so newer backends still render.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_members: u64,

    #[serde(default)]
    pub total_programs: u64,

    #[serde(default)]
    pub total_trainers: u64,

    #[serde(default)]
    pub total_challenges: u64,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
