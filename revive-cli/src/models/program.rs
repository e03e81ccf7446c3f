use serde::{Deserialize, Serialize};

use super::date::null_as_default;

pub const PRICE_FALLBACK: &str = "Contact for pricing";
pub const DURATION_FALLBACK: &str = "Flexible";

/// Training program.
///
/// The member-programs endpoint answers with a DTO spelling two fields `imgUrl` and `cost`
/// where the programs endpoint uses `imageUrl` and `benefits`. Both decode into this one
/// shape; `imageUrl`/`benefits` is what gets written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, alias = "imgUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, alias = "cost", skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<i64>,
}

impl Program {
    pub fn price_label(&self) -> &str {
        non_blank(&self.benefits).unwrap_or(PRICE_FALLBACK)
    }

    pub fn duration_label(&self) -> &str {
        non_blank(&self.duration).unwrap_or(DURATION_FALLBACK)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Body of program create/update calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInput {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<i64>,
}

impl From<&Program> for ProgramInput {
    fn from(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            description: program.description.clone(),
            duration: program.duration.clone(),
            benefits: program.benefits.clone(),
            image_url: program.image_url.clone(),
            trainer_id: program.trainer_id,
        }
    }
}
