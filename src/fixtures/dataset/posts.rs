use chrono::{DateTime, Duration, Utc};

use super::timestamp;
use crate::errors::FixtureError;
use crate::fixtures::ids::{IdRegistry, RefKind};
use crate::types::{Post, PostStatus, PostType, PostVisibility, Tag};

#[derive(Debug, Clone)]
pub struct PostFixture {
    pub title: &'static str,
    pub slug: &'static str,
    pub excerpt: &'static str,
    pub markdown: &'static str,
    /// Pre-rendered; kept in step with `markdown` by hand.
    pub html: &'static str,
    pub post_type: PostType,
    pub status: PostStatus,
    pub visibility: PostVisibility,
    /// Username of the author.
    pub author: &'static str,
    pub tags: &'static [(&'static str, &'static str)],
    pub meta_title: &'static str,
    pub meta_description: &'static str,
    pub reading_time: i32,
    pub word_count: i32,
    pub view_count: i64,
    /// How long before the load the post was written (and published, if it is).
    pub age: Duration,
}

const WELCOME_MARKDOWN: &str = r#"# Welcome to Heimdall

## About Heimdall

Heimdall is a modern blog system built as a set of small services:

- **Fast**: compiled services with a lean request path
- **Service split**: admin-api + public-api + common
- **MongoDB + Redis**: document storage with a cache in front
- **Secure by default**: JWT auth, login throttling, audit logs
- **SEO friendly**: custom URLs, sitemap and RSS

## Getting started

1. Configure the database connection
2. Run the database setup tooling
3. Start the services
4. Start writing

Enjoy!"#;

const WELCOME_HTML: &str = r#"<h1>Welcome to Heimdall</h1>
<h2>About Heimdall</h2>
<p>Heimdall is a modern blog system built as a set of small services:</p>
<ul>
<li><strong>Fast</strong>: compiled services with a lean request path</li>
<li><strong>Service split</strong>: admin-api + public-api + common</li>
<li><strong>MongoDB + Redis</strong>: document storage with a cache in front</li>
<li><strong>Secure by default</strong>: JWT auth, login throttling, audit logs</li>
<li><strong>SEO friendly</strong>: custom URLs, sitemap and RSS</li>
</ul>
<h2>Getting started</h2>
<ol>
<li>Configure the database connection</li>
<li>Run the database setup tooling</li>
<li>Start the services</li>
<li>Start writing</li>
</ol>
<p>Enjoy!</p>"#;

const GUIDE_MARKDOWN: &str = r#"# Getting Started with the go-zero Microservice Framework

## What is go-zero

go-zero is a web and RPC framework that bundles many engineering practices. Its resilience features keep high-concurrency services stable under load.

## Core features

- **Simple**: concise API definitions, one command to generate code
- **Resilient**: circuit breaking, load shedding, rate limiting, adaptive balancing
- **Governed**: service discovery, tracing, monitoring and alerts
- **Fast**: minimal design, high throughput

## Architecture

This project follows the recommended layout:

```
├── admin-api    # admin backend
├── public-api   # public frontend
└── common       # shared code
```

Every service keeps a clear layered structure."#;

const GUIDE_HTML: &str = r#"<h1>Getting Started with the go-zero Microservice Framework</h1>
<h2>What is go-zero</h2>
<p>go-zero is a web and RPC framework that bundles many engineering practices. Its resilience features keep high-concurrency services stable under load.</p>"#;

const DRAFT_MARKDOWN: &str = r#"# MongoDB Best Practices

This is a draft, still being written...

## Data modelling

- Embed first, reference when needed
- Design indexes deliberately
- Avoid deep nesting

## Performance

To be continued..."#;

const DRAFT_HTML: &str = "<h1>MongoDB Best Practices</h1><p>This is a draft, still being written...</p>";

pub(super) fn default_posts() -> Vec<PostFixture> {
    vec![
        PostFixture {
            title: "Welcome to the Heimdall Blog",
            slug: "welcome-to-heimdall",
            excerpt: "Heimdall is a modern blog system that is fast, highly available and easy to extend.",
            markdown: WELCOME_MARKDOWN,
            html: WELCOME_HTML,
            post_type: PostType::Post,
            status: PostStatus::Published,
            visibility: PostVisibility::Public,
            author: "admin",
            tags: &[
                ("Blog System", "blog-system"),
                ("Go", "golang"),
                ("Microservices", "microservices"),
            ],
            meta_title: "Welcome to the Heimdall Blog",
            meta_description: "What Heimdall offers and how to get started",
            reading_time: 2,
            word_count: 186,
            view_count: 100,
            age: Duration::days(14),
        },
        PostFixture {
            title: "Getting Started with the go-zero Microservice Framework",
            slug: "go-zero-microservices-guide",
            excerpt: "go-zero bundles many engineering practices into one web and RPC framework. This guide shows how to build services with it.",
            markdown: GUIDE_MARKDOWN,
            html: GUIDE_HTML,
            post_type: PostType::Post,
            status: PostStatus::Published,
            visibility: PostVisibility::Public,
            author: "author",
            tags: &[
                ("Go", "golang"),
                ("Microservices", "microservices"),
                ("go-zero", "go-zero"),
            ],
            meta_title: "Getting Started with the go-zero Microservice Framework",
            meta_description: "A detailed tour of go-zero features and usage",
            reading_time: 5,
            word_count: 324,
            view_count: 256,
            age: Duration::days(7),
        },
        PostFixture {
            title: "MongoDB Best Practices",
            slug: "mongodb-best-practices",
            excerpt: "Lessons learned and practices collected while running MongoDB.",
            markdown: DRAFT_MARKDOWN,
            html: DRAFT_HTML,
            post_type: PostType::Post,
            status: PostStatus::Draft,
            visibility: PostVisibility::Public,
            author: "author",
            tags: &[("MongoDB", "mongodb"), ("Database", "database")],
            meta_title: "",
            meta_description: "",
            reading_time: 3,
            word_count: 45,
            view_count: 0,
            age: Duration::zero(),
        },
    ]
}

/// Posts in fixture order, authors resolved from the user phase.
///
/// `publishedAt` is set to the post's creation time for published posts and
/// left null otherwise.
pub fn build_posts(
    fixtures: &[PostFixture],
    ids: &IdRegistry,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, FixtureError> {
    fixtures
        .iter()
        .map(|fixture| {
            let at = timestamp(now, fixture.age);
            let published_at = if fixture.status == PostStatus::Published {
                Some(at)
            } else {
                None
            };

            Ok(Post {
                id: None,
                title: fixture.title.to_string(),
                slug: fixture.slug.to_string(),
                excerpt: fixture.excerpt.to_string(),
                markdown: fixture.markdown.to_string(),
                html: fixture.html.to_string(),
                featured_image: String::new(),
                post_type: fixture.post_type,
                status: fixture.status,
                visibility: fixture.visibility,
                author_id: ids.resolve(RefKind::User, fixture.author)?,
                tags: fixture
                    .tags
                    .iter()
                    .map(|(name, slug)| Tag::new(name, slug))
                    .collect(),
                meta_title: fixture.meta_title.to_string(),
                meta_description: fixture.meta_description.to_string(),
                canonical_url: String::new(),
                reading_time: fixture.reading_time,
                word_count: fixture.word_count,
                view_count: fixture.view_count,
                published_at,
                created_at: at,
                updated_at: at,
            })
        })
        .collect()
}
