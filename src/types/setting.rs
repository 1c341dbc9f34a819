use serde::{Deserialize, Serialize};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SettingGroup {
    General,
    Display,
    Seo,
    Social,
    Comments,
}

impl SettingGroup {
    pub fn as_str(&self) -> &str {
        match self {
            SettingGroup::General => "general",
            SettingGroup::Display => "display",
            SettingGroup::Seo => "seo",
            SettingGroup::Social => "social",
            SettingGroup::Comments => "comments",
        }
    }
}

/// Site setting. `key` is the identity; values are always stored as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub key: String,
    pub value: String,
    pub group: SettingGroup,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl Setting {
    pub fn new(key: &str, value: &str, group: SettingGroup, now: BsonDateTime) -> Self {
        Self {
            id: None,
            key: key.to_string(),
            value: value.to_string(),
            group,
            created_at: now,
            updated_at: now,
        }
    }
}
