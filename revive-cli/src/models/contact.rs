use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactReply {
    #[serde(default)]
    pub message: Option<String>,
}
