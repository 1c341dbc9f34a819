use serde::{Deserialize, Serialize};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    Other,
}

impl MediaKind {
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
            MediaKind::Other => "other",
        }
    }
}

/// Uploaded file. No fixtures exist for media; the collection is only indexed and reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub mime_type: String,
    pub size: i64,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}
