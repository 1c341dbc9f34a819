//! Literal development dataset and the builders that turn it into documents.
//!
//! Fixtures refer to each other by name (username, slug, comment key). The
//! builders resolve those names through an [`IdRegistry`](super::IdRegistry)
//! filled in by earlier insert phases.

mod comments;
mod login_logs;
mod posts;
mod settings;
mod users;

pub use comments::{build_comments, comment_batches, CommentFixture};
pub use login_logs::{build_login_logs, LoginLogFixture};
pub use posts::{build_posts, PostFixture};
pub use settings::{build_settings, SettingFixture};
pub use users::{build_users, UserFixture};

use chrono::{DateTime, Duration, Utc};
use mongodb::bson::DateTime as BsonDateTime;

/// Everything the loader inserts, in dependency order.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub users: Vec<UserFixture>,
    pub settings: Vec<SettingFixture>,
    pub posts: Vec<PostFixture>,
    pub comments: Vec<CommentFixture>,
    pub login_logs: Vec<LoginLogFixture>,
}

impl FixtureSet {
    /// The standard Heimdall development dataset.
    pub fn heimdall() -> Self {
        Self {
            users: users::default_users(),
            settings: settings::default_settings(),
            posts: posts::default_posts(),
            comments: comments::default_comments(),
            login_logs: login_logs::default_login_logs(),
        }
    }
}

impl Default for FixtureSet {
    fn default() -> Self {
        Self::heimdall()
    }
}

/// `age` before `now`, as a BSON date.
pub(crate) fn timestamp(now: DateTime<Utc>, age: Duration) -> BsonDateTime {
    BsonDateTime::from_millis((now - age).timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_counts_back_from_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let two_weeks = timestamp(now, Duration::days(14));
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(two_weeks.timestamp_millis(), expected.timestamp_millis());
    }

    #[test]
    fn default_dataset_has_documented_sizes() {
        let set = FixtureSet::heimdall();
        assert_eq!(set.users.len(), 2);
        assert_eq!(set.settings.len(), 19);
        assert_eq!(set.posts.len(), 3);
        assert_eq!(set.comments.len(), 3);
        assert_eq!(set.login_logs.len(), 3);
    }
}
