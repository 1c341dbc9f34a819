use serde::{Deserialize, Serialize};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
            CommentStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub post_id: ObjectId,
    /// Null for guest comments.
    #[serde(default)]
    pub author_id: Option<ObjectId>,
    pub author_name: String,
    pub author_email: String,
    pub author_url: String,
    pub content: String,
    pub html_content: String,
    pub status: CommentStatus,
    /// Null for top-level comments.
    #[serde(default)]
    pub parent_id: Option<ObjectId>,
    pub ip_address: String,
    pub user_agent: String,
    pub like_count: i32,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl Comment {
    pub fn is_guest(&self) -> bool {
        self.author_id.is_none()
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}
