use chrono::{DateTime, Duration, Utc};

use super::timestamp;
use crate::errors::FixtureError;
use crate::fixtures::passwords::PasswordHasher;
use crate::types::{User, UserRole, UserStatus};

#[derive(Debug, Clone)]
pub struct UserFixture {
    pub username: &'static str,
    pub email: &'static str,
    /// Development password, handed to the hasher and never stored.
    pub password: &'static str,
    pub display_name: &'static str,
    pub role: UserRole,
    pub bio: &'static str,
    pub location: &'static str,
    pub website: &'static str,
    pub twitter: &'static str,
    pub last_login_ip: &'static str,
}

pub(super) fn default_users() -> Vec<UserFixture> {
    vec![
        UserFixture {
            username: "admin",
            email: "admin@heimdall.com",
            password: "admin123",
            display_name: "System Administrator",
            role: UserRole::Owner,
            bio: "Administrator of the Heimdall blog",
            location: "Beijing",
            website: "https://heimdall.com",
            twitter: "",
            last_login_ip: "127.0.0.1",
        },
        UserFixture {
            username: "author",
            email: "author@heimdall.com",
            password: "author123",
            display_name: "Sample Author",
            role: UserRole::Author,
            bio: "A technical blogger who loves to write",
            location: "Shanghai",
            website: "https://author.blog",
            twitter: "author_blog",
            last_login_ip: "127.0.0.1",
        },
    ]
}

pub fn build_users(
    fixtures: &[UserFixture],
    hasher: &dyn PasswordHasher,
    now: DateTime<Utc>,
) -> Result<Vec<User>, FixtureError> {
    let at = timestamp(now, Duration::zero());
    fixtures
        .iter()
        .map(|fixture| {
            Ok(User {
                id: None,
                username: fixture.username.to_string(),
                email: fixture.email.to_string(),
                password_hash: hasher.hash(fixture.username, fixture.password)?,
                display_name: fixture.display_name.to_string(),
                role: fixture.role,
                profile_image: String::new(),
                cover_image: String::new(),
                bio: fixture.bio.to_string(),
                location: fixture.location.to_string(),
                website: fixture.website.to_string(),
                twitter: fixture.twitter.to_string(),
                facebook: String::new(),
                status: UserStatus::Active,
                login_fail_count: 0,
                locked_until: None,
                last_login_at: Some(at),
                last_login_ip: fixture.last_login_ip.to_string(),
                created_at: at,
                updated_at: at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::passwords::{PlaceholderHasher, PLACEHOLDER_PASSWORD_HASH};

    #[test]
    fn roster_has_an_owner_and_an_author() {
        let users = default_users();
        assert!(users.iter().any(|u| u.role == UserRole::Owner));
        assert!(users.iter().any(|u| u.role == UserRole::Author));
    }

    #[test]
    fn built_users_are_active_and_unlocked() {
        let users = build_users(&default_users(), &PlaceholderHasher, Utc::now()).unwrap();
        assert_eq!(users.len(), 2);
        for user in &users {
            assert_eq!(user.status, UserStatus::Active);
            assert_eq!(user.login_fail_count, 0);
            assert!(user.locked_until.is_none());
            assert_eq!(user.password_hash, PLACEHOLDER_PASSWORD_HASH);
        }
        assert_eq!(users[0].username, "admin");
        assert_eq!(users[1].twitter, "author_blog");
    }
}
