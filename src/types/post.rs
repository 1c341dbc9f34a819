use serde::{Deserialize, Serialize};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Post,
    Page,
}

impl PostType {
    pub fn as_str(&self) -> &str {
        match self {
            PostType::Post => "post",
            PostType::Page => "page",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Scheduled,
    Archived,
    Trash,
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Archived => "archived",
            PostStatus::Trash => "trash",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PostVisibility {
    Public,
    MembersOnly,
    Private,
}

impl PostVisibility {
    pub fn as_str(&self) -> &str {
        match self {
            PostVisibility::Public => "public",
            PostVisibility::MembersOnly => "members_only",
            PostVisibility::Private => "private",
        }
    }
}

/// Tag embedded in a post document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub markdown: String,
    pub html: String,
    pub featured_image: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub status: PostStatus,
    pub visibility: PostVisibility,
    pub author_id: ObjectId,
    pub tags: Vec<Tag>,
    pub meta_title: String,
    pub meta_description: String,
    pub canonical_url: String,
    pub reading_time: i32,
    pub word_count: i32,
    pub view_count: i64,
    /// Null until the post is published.
    #[serde(default)]
    pub published_at: Option<BsonDateTime>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, Bson};
    use rstest::rstest;

    #[rstest]
    #[case(PostVisibility::Public, "public")]
    #[case(PostVisibility::MembersOnly, "members_only")]
    #[case(PostVisibility::Private, "private")]
    fn visibility_matches_stored_value(#[case] visibility: PostVisibility, #[case] stored: &str) {
        assert_eq!(bson::to_bson(&visibility).unwrap(), Bson::String(stored.into()));
        assert_eq!(visibility.as_str(), stored);
    }

    #[rstest]
    #[case(PostStatus::Draft, "draft")]
    #[case(PostStatus::Published, "published")]
    #[case(PostStatus::Scheduled, "scheduled")]
    #[case(PostStatus::Archived, "archived")]
    #[case(PostStatus::Trash, "trash")]
    fn status_matches_stored_value(#[case] status: PostStatus, #[case] stored: &str) {
        assert_eq!(bson::to_bson(&status).unwrap(), Bson::String(stored.into()));
        assert_eq!(status.as_str(), stored);
    }

    #[test]
    fn unpublished_post_stores_null_published_at() {
        let now = BsonDateTime::now();
        let post = Post {
            id: None,
            title: "Draft".into(),
            slug: "draft".into(),
            excerpt: String::new(),
            markdown: "# Draft".into(),
            html: "<h1>Draft</h1>".into(),
            featured_image: String::new(),
            post_type: PostType::Post,
            status: PostStatus::Draft,
            visibility: PostVisibility::Public,
            author_id: ObjectId::new(),
            tags: vec![Tag::new("MongoDB", "mongodb")],
            meta_title: String::new(),
            meta_description: String::new(),
            canonical_url: String::new(),
            reading_time: 1,
            word_count: 2,
            view_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
        };

        let document = bson::to_document(&post).unwrap();
        assert_eq!(document.get("publishedAt"), Some(&Bson::Null));
        assert_eq!(document.get_str("type").unwrap(), "post");
        assert!(document.get_object_id("authorId").is_ok());
        let tags = document.get_array("tags").unwrap();
        assert_eq!(tags.len(), 1);
    }
}
