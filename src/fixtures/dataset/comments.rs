use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use super::timestamp;
use crate::errors::FixtureError;
use crate::fixtures::ids::{IdRegistry, RefKind};
use crate::types::{Comment, CommentStatus};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone)]
pub struct CommentFixture {
    /// Name other fixtures use to reply to this comment. Not stored.
    pub key: &'static str,
    /// Slug of the post commented on.
    pub post: &'static str,
    /// Username for registered commenters, `None` for guests.
    pub author: Option<&'static str>,
    pub author_name: &'static str,
    pub author_email: &'static str,
    pub author_url: &'static str,
    pub content: &'static str,
    pub html_content: &'static str,
    pub status: CommentStatus,
    /// Key of the comment replied to.
    pub parent: Option<&'static str>,
    pub ip_address: &'static str,
    pub user_agent: &'static str,
    pub like_count: i32,
    pub age: Duration,
}

pub(super) fn default_comments() -> Vec<CommentFixture> {
    vec![
        CommentFixture {
            key: "welcome-first-guest",
            post: "welcome-to-heimdall",
            author: None,
            author_name: "Zhang San",
            author_email: "zhangsan@example.com",
            author_url: "",
            content: "Great post! Heimdall looks powerful and I'm looking forward to more features.",
            html_content: "<p>Great post! Heimdall looks powerful and I'm looking forward to more features.</p>",
            status: CommentStatus::Approved,
            parent: None,
            ip_address: "192.168.1.100",
            user_agent: BROWSER_USER_AGENT,
            like_count: 5,
            age: Duration::days(14) - Duration::hours(1),
        },
        CommentFixture {
            key: "welcome-second-guest",
            post: "welcome-to-heimdall",
            author: None,
            author_name: "Li Si",
            author_email: "lisi@example.com",
            author_url: "https://lisi.blog",
            content: "The service split is clean. Will there be detailed deployment docs?",
            html_content: "<p>The service split is clean. Will there be detailed deployment docs?</p>",
            status: CommentStatus::Approved,
            parent: None,
            ip_address: "192.168.1.101",
            user_agent: BROWSER_USER_AGENT,
            like_count: 3,
            age: Duration::days(14) - Duration::hours(2),
        },
        CommentFixture {
            key: "guide-author-note",
            post: "go-zero-microservices-guide",
            author: Some("author"),
            author_name: "Sample Author",
            author_email: "author@heimdall.com",
            author_url: "",
            content: "Thanks for reading! Questions are welcome in the comments.",
            html_content: "<p>Thanks for reading! Questions are welcome in the comments.</p>",
            status: CommentStatus::Approved,
            parent: None,
            ip_address: "127.0.0.1",
            user_agent: BROWSER_USER_AGENT,
            like_count: 8,
            age: Duration::days(7) - Duration::hours(1),
        },
    ]
}

/// Group comments by reply depth: top-level comments first, then replies to
/// them, and so on. Each batch only refers to comments in earlier batches.
///
/// A parent key that does not appear earlier in the list is treated as
/// top-level here; validation reports it before anything is inserted.
pub fn comment_batches(fixtures: &[CommentFixture]) -> Vec<Vec<CommentFixture>> {
    let mut depths: HashMap<&str, usize> = HashMap::new();
    let mut batches: Vec<Vec<CommentFixture>> = Vec::new();

    for fixture in fixtures {
        let depth = fixture
            .parent
            .and_then(|parent| depths.get(parent))
            .map_or(0, |parent_depth| parent_depth + 1);
        depths.insert(fixture.key, depth);

        if batches.len() <= depth {
            batches.resize_with(depth + 1, Vec::new);
        }
        batches[depth].push(fixture.clone());
    }

    batches
}

pub fn build_comments(
    fixtures: &[CommentFixture],
    ids: &IdRegistry,
    now: DateTime<Utc>,
) -> Result<Vec<Comment>, FixtureError> {
    fixtures
        .iter()
        .map(|fixture| {
            let at = timestamp(now, fixture.age);
            Ok(Comment {
                id: None,
                post_id: ids.resolve(RefKind::Post, fixture.post)?,
                author_id: ids.resolve_optional(RefKind::User, fixture.author)?,
                author_name: fixture.author_name.to_string(),
                author_email: fixture.author_email.to_string(),
                author_url: fixture.author_url.to_string(),
                content: fixture.content.to_string(),
                html_content: fixture.html_content.to_string(),
                status: fixture.status,
                parent_id: ids.resolve_optional(RefKind::Comment, fixture.parent)?,
                ip_address: fixture.ip_address.to_string(),
                user_agent: fixture.user_agent.to_string(),
                like_count: fixture.like_count,
                created_at: at,
                updated_at: at,
            })
        })
        .collect()
}
