use serde::{Deserialize, Serialize};

use super::date::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,

    /// Ordered as the backend lists them
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerInput {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,

    #[serde(default)]
    pub achievements: Vec<String>,
}

impl From<&Trainer> for TrainerInput {
    fn from(trainer: &Trainer) -> Self {
        Self {
            name: trainer.name.clone(),
            title: trainer.title.clone(),
            bio: trainer.bio.clone(),
            img_url: trainer.img_url.clone(),
            achievements: trainer.achievements.clone(),
        }
    }
}
