use chrono::{DateTime, Duration, Utc};

use super::timestamp;
use crate::errors::FixtureError;
use crate::fixtures::ids::{IdRegistry, RefKind};
use crate::types::{LoginFailReason, LoginLog};

#[derive(Debug, Clone)]
pub struct LoginLogFixture {
    /// Fixture user the attempt resolved to, if any.
    pub user: Option<&'static str>,
    pub username: &'static str,
    pub email: &'static str,
    pub ip_address: &'static str,
    pub user_agent: &'static str,
    pub success: bool,
    pub fail_reason: Option<LoginFailReason>,
    pub age: Duration,
}

pub(super) fn default_login_logs() -> Vec<LoginLogFixture> {
    vec![
        LoginLogFixture {
            user: Some("admin"),
            username: "admin",
            email: "admin@heimdall.com",
            ip_address: "127.0.0.1",
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
            success: true,
            fail_reason: None,
            age: Duration::zero(),
        },
        LoginLogFixture {
            user: Some("author"),
            username: "author",
            email: "author@heimdall.com",
            ip_address: "192.168.1.100",
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            success: true,
            fail_reason: None,
            age: Duration::hours(1),
        },
        LoginLogFixture {
            user: None,
            username: "hacker",
            email: "hacker@evil.com",
            ip_address: "192.168.1.200",
            user_agent: "curl/7.68.0",
            success: false,
            fail_reason: Some(LoginFailReason::InvalidCredentials),
            age: Duration::hours(2),
        },
    ]
}

pub fn build_login_logs(
    fixtures: &[LoginLogFixture],
    ids: &IdRegistry,
    now: DateTime<Utc>,
) -> Result<Vec<LoginLog>, FixtureError> {
    fixtures
        .iter()
        .map(|fixture| {
            Ok(LoginLog {
                id: None,
                user_id: ids.resolve_optional(RefKind::User, fixture.user)?,
                username: fixture.username.to_string(),
                email: fixture.email.to_string(),
                ip_address: fixture.ip_address.to_string(),
                user_agent: fixture.user_agent.to_string(),
                success: fixture.success,
                fail_reason: fixture.fail_reason,
                created_at: timestamp(now, fixture.age),
            })
        })
        .collect()
}
