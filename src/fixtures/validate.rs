use std::collections::{HashMap, HashSet};

use crate::db::posts::is_url_safe_slug;
use crate::errors::FixtureError;
use crate::fixtures::dataset::FixtureSet;
use crate::types::UserRole;

fn invalid(message: impl Into<String>) -> FixtureError {
    FixtureError::Invalid(message.into())
}

fn ensure_unique<'a>(
    what: &str,
    values: impl IntoIterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, FixtureError> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(invalid(format!("duplicate {} '{}'", what, value)));
        }
    }
    Ok(seen)
}

impl FixtureSet {
    /// Check the dataset before anything touches the store.
    ///
    /// Rejects sets the unique indexes would reject, references that no
    /// earlier phase can resolve, and login logs whose outcome fields disagree.
    pub fn validate(&self) -> Result<(), FixtureError> {
        let usernames = ensure_unique("username", self.users.iter().map(|u| u.username))?;
        ensure_unique("email", self.users.iter().map(|u| u.email))?;
        ensure_unique("setting key", self.settings.iter().map(|s| s.key))?;
        let slugs = ensure_unique("post slug", self.posts.iter().map(|p| p.slug))?;
        ensure_unique("comment key", self.comments.iter().map(|c| c.key))?;

        if !self.users.iter().any(|u| u.role == UserRole::Owner) {
            return Err(invalid("at least one user must have the Owner role"));
        }

        for post in &self.posts {
            if !is_url_safe_slug(post.slug) {
                return Err(invalid(format!("slug '{}' is not URL-safe", post.slug)));
            }
            if !usernames.contains(post.author) {
                return Err(invalid(format!(
                    "post '{}' names unknown author '{}'",
                    post.slug, post.author
                )));
            }
        }

        // key -> post slug, for comments seen so far
        let mut earlier: HashMap<&str, &str> = HashMap::new();
        for comment in &self.comments {
            if !slugs.contains(comment.post) {
                return Err(invalid(format!(
                    "comment '{}' is on unknown post '{}'",
                    comment.key, comment.post
                )));
            }
            if let Some(author) = comment.author {
                if !usernames.contains(author) {
                    return Err(invalid(format!(
                        "comment '{}' names unknown author '{}'",
                        comment.key, author
                    )));
                }
            }
            if let Some(parent) = comment.parent {
                match earlier.get(parent) {
                    None => {
                        return Err(invalid(format!(
                            "comment '{}' replies to '{}', which is not an earlier comment",
                            comment.key, parent
                        )))
                    }
                    Some(parent_post) if *parent_post != comment.post => {
                        return Err(invalid(format!(
                            "comment '{}' replies to '{}' on a different post",
                            comment.key, parent
                        )))
                    }
                    Some(_) => {}
                }
            }
            earlier.insert(comment.key, comment.post);
        }

        for log in &self.login_logs {
            if log.success == log.fail_reason.is_some() {
                return Err(invalid(format!(
                    "login log for '{}' must have a failure reason exactly when it failed",
                    log.username
                )));
            }
            if let Some(user) = log.user {
                if !usernames.contains(user) {
                    return Err(invalid(format!("login log names unknown user '{}'", user)));
                }
                if user != log.username {
                    return Err(invalid(format!(
                        "login log for '{}' is attributed to user '{}'",
                        log.username, user
                    )));
                }
            }
        }

        Ok(())
    }
}
