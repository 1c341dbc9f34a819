use futures::stream::TryStreamExt;
use mongodb::bson::{self, doc, Document};

use crate::db::collections::CollectionName;
use crate::db::MongoDb;
use crate::errors::StoreError;
use crate::types::{Post, PostStatus};

/// A post returned from full-text search together with its relevance score.
#[derive(Debug, Clone)]
pub struct ScoredPost {
    pub post: Post,
    pub score: f64,
}

/// Get post by slug
pub async fn get_post_by_slug(db: &MongoDb, slug: &str) -> Result<Option<Post>, StoreError> {
    Ok(db.posts().find_one(doc! { "slug": slug }).await?)
}

/// Published posts, newest publication first. Served by `idx_status_published_at`.
pub async fn list_published_posts(db: &MongoDb, limit: i64) -> Result<Vec<Post>, StoreError> {
    let cursor = db
        .posts()
        .find(doc! { "status": PostStatus::Published.as_str() })
        .sort(doc! { "publishedAt": -1 })
        .limit(limit)
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Full-text search over title, excerpt and markdown, best match first.
///
/// Relies on `idx_full_text_search`; the index has no language analysis, so terms
/// match as plain tokens.
pub async fn search_posts(db: &MongoDb, term: &str, limit: i64) -> Result<Vec<ScoredPost>, StoreError> {
    let score = doc! { "score": { "$meta": "textScore" } };
    let mut cursor = db
        .raw(CollectionName::Posts)
        .find(doc! { "$text": { "$search": term } })
        .projection(score.clone())
        .sort(score)
        .limit(limit)
        .await?;

    let mut results = Vec::new();
    while let Some(mut document) = cursor.try_next().await? {
        let score = take_score(&mut document);
        let post: Post = bson::from_document(document)?;
        results.push(ScoredPost { post, score });
    }
    Ok(results)
}

fn take_score(document: &mut Document) -> f64 {
    document
        .remove("score")
        .and_then(|value| value.as_f64())
        .unwrap_or_default()
}

/// Helper function to create URL-friendly slugs
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether `slug` is already in canonical URL-safe form.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
