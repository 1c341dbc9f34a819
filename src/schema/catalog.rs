use super::{CollectionIndexes, IndexSpec};
use crate::db::CollectionName;

/// Relevance weights for post search: title matches count ten times a body match.
pub const POST_SEARCH_WEIGHTS: [(&str, i32); 3] = [("title", 10), ("excerpt", 5), ("markdown", 1)];

/// The full set of indexes each collection must carry.
pub fn catalog() -> Vec<CollectionIndexes> {
    vec![
        CollectionIndexes {
            collection: CollectionName::Users,
            indexes: vec![
                IndexSpec::named("idx_username_unique").asc("username").unique(),
                IndexSpec::named("idx_email_unique").asc("email").unique(),
                IndexSpec::named("idx_role_status").asc("role").asc("status"),
                // unlocking expired account locks
                IndexSpec::named("idx_locked_until").asc("lockedUntil"),
                IndexSpec::named("idx_last_login_at").desc("lastLoginAt"),
                IndexSpec::named("idx_users_created_at").desc("createdAt"),
            ],
        },
        CollectionIndexes {
            collection: CollectionName::LoginLogs,
            indexes: vec![
                IndexSpec::named("idx_user_login_logs").asc("userId").desc("createdAt"),
                IndexSpec::named("idx_ip_login_logs").asc("ipAddress").desc("createdAt"),
                IndexSpec::named("idx_success_login_logs").asc("success").desc("createdAt"),
                IndexSpec::named("idx_username_login_logs").asc("username"),
            ],
        },
        CollectionIndexes {
            collection: CollectionName::Posts,
            indexes: vec![
                IndexSpec::named("idx_slug_unique").asc("slug").unique(),
                IndexSpec::named("idx_status_published_at").asc("status").desc("publishedAt"),
                IndexSpec::named("idx_author_status").asc("authorId").asc("status"),
                IndexSpec::named("idx_tags_slug").asc("tags.slug"),
                // posts vs. pages
                IndexSpec::named("idx_type_status").asc("type").asc("status"),
                IndexSpec::named("idx_view_count").desc("viewCount"),
                IndexSpec::text("idx_full_text_search", &POST_SEARCH_WEIGHTS),
                IndexSpec::named("idx_posts_created_at").desc("createdAt"),
                IndexSpec::named("idx_posts_updated_at").desc("updatedAt"),
                IndexSpec::named("idx_visibility_status").asc("visibility").asc("status"),
            ],
        },
        CollectionIndexes {
            collection: CollectionName::Comments,
            indexes: vec![
                IndexSpec::named("idx_post_comments")
                    .asc("postId")
                    .asc("status")
                    .desc("createdAt"),
                // moderation queue
                IndexSpec::named("idx_comment_status").asc("status"),
                IndexSpec::named("idx_parent_comments").asc("parentId"),
                // spam checks
                IndexSpec::named("idx_comment_ip").asc("ipAddress"),
                IndexSpec::named("idx_comment_author").asc("authorId"),
                IndexSpec::named("idx_comments_created_at").desc("createdAt"),
                IndexSpec::named("idx_comment_likes").desc("likeCount"),
            ],
        },
        CollectionIndexes {
            collection: CollectionName::Settings,
            indexes: vec![
                IndexSpec::named("idx_setting_key_unique").asc("key").unique(),
                IndexSpec::named("idx_setting_group").asc("group"),
            ],
        },
        CollectionIndexes {
            collection: CollectionName::Media,
            indexes: vec![
                IndexSpec::named("idx_media_type").asc("type"),
                IndexSpec::named("idx_media_mime_type").asc("mimeType"),
                IndexSpec::named("idx_media_created_at").desc("createdAt"),
                IndexSpec::named("idx_media_size").desc("size"),
                IndexSpec::named("idx_media_url").asc("url"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{validate_catalog, IndexKeyKind};
    use mongodb::bson::doc;
    use rstest::rstest;

    #[test]
    fn catalog_is_valid() {
        validate_catalog(&catalog()).unwrap();
    }

    #[test]
    fn covers_every_collection_once() {
        let collections: Vec<CollectionName> = catalog().iter().map(|c| c.collection).collect();
        assert_eq!(collections, CollectionName::ALL.to_vec());
    }

    #[rstest]
    #[case(CollectionName::Users, 6)]
    #[case(CollectionName::LoginLogs, 4)]
    #[case(CollectionName::Posts, 10)]
    #[case(CollectionName::Comments, 7)]
    #[case(CollectionName::Settings, 2)]
    #[case(CollectionName::Media, 5)]
    fn declares_expected_index_count(#[case] collection: CollectionName, #[case] count: usize) {
        let entry = catalog()
            .into_iter()
            .find(|c| c.collection == collection)
            .unwrap();
        assert_eq!(entry.indexes.len(), count);
    }

    #[rstest]
    #[case(CollectionName::Users, "idx_username_unique")]
    #[case(CollectionName::Users, "idx_email_unique")]
    #[case(CollectionName::Posts, "idx_slug_unique")]
    #[case(CollectionName::Settings, "idx_setting_key_unique")]
    fn identity_indexes_are_unique(#[case] collection: CollectionName, #[case] name: &str) {
        let catalog = catalog();
        let entry = catalog.iter().find(|c| c.collection == collection).unwrap();
        assert!(entry.find(name).unwrap().unique);
    }

    #[test]
    fn only_identity_indexes_are_unique() {
        let unique: Vec<&str> = catalog()
            .iter()
            .flat_map(|c| c.indexes.iter())
            .filter(|spec| spec.unique)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            unique,
            ["idx_username_unique", "idx_email_unique", "idx_slug_unique", "idx_setting_key_unique"]
        );
    }

    #[test]
    fn post_search_index_is_weighted_without_language() {
        let catalog = catalog();
        let posts = catalog
            .iter()
            .find(|c| c.collection == CollectionName::Posts)
            .unwrap();
        let search = posts.find("idx_full_text_search").unwrap();

        assert!(search.keys.iter().all(|k| k.kind == IndexKeyKind::Text));
        assert_eq!(
            search.key_document(),
            doc! { "title": "text", "excerpt": "text", "markdown": "text" }
        );
        let text = search.text.as_ref().unwrap();
        assert_eq!(text.default_language, "none");
        assert_eq!(text.weights, vec![("title", 10), ("excerpt", 5), ("markdown", 1)]);
    }

    #[test]
    fn comment_listing_index_orders_newest_first() {
        let catalog = catalog();
        let comments = catalog
            .iter()
            .find(|c| c.collection == CollectionName::Comments)
            .unwrap();
        assert_eq!(
            comments.find("idx_post_comments").unwrap().key_document(),
            doc! { "postId": 1, "status": 1, "createdAt": -1 }
        );
    }
}
