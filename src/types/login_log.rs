use serde::{Deserialize, Deserializer, Serialize, Serializer};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LoginFailReason {
    InvalidCredentials,
    InvalidPassword,
    UserNotFound,
    UserLocked,
    UserInactive,
    UserSuspended,
    TooManyAttempts,
}

impl LoginFailReason {
    pub fn as_str(&self) -> &str {
        match self {
            LoginFailReason::InvalidCredentials => "invalid_credentials",
            LoginFailReason::InvalidPassword => "invalid_password",
            LoginFailReason::UserNotFound => "user_not_found",
            LoginFailReason::UserLocked => "user_locked",
            LoginFailReason::UserInactive => "user_inactive",
            LoginFailReason::UserSuspended => "user_suspended",
            LoginFailReason::TooManyAttempts => "too_many_attempts",
        }
    }
}

// Successful logins carry an empty `failReason` string rather than null.
fn serialize_fail_reason<S>(reason: &Option<LoginFailReason>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(reason.as_ref().map_or("", |r| r.as_str()))
}

fn deserialize_fail_reason<'de, D>(deserializer: D) -> Result<Option<LoginFailReason>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawReason {
        Reason(LoginFailReason),
        Text(String),
        Missing(()),
    }

    match RawReason::deserialize(deserializer)? {
        RawReason::Reason(reason) => Ok(Some(reason)),
        RawReason::Text(text) if text.is_empty() => Ok(None),
        RawReason::Text(text) => Err(serde::de::Error::custom(format!(
            "unknown login failure reason: {}",
            text
        ))),
        RawReason::Missing(()) => Ok(None),
    }
}

/// Append-only record of a login attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Null when the identity could not be resolved to a user.
    #[serde(default)]
    pub user_id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
    pub success: bool,
    #[serde(
        default,
        serialize_with = "serialize_fail_reason",
        deserialize_with = "deserialize_fail_reason"
    )]
    pub fail_reason: Option<LoginFailReason>,
    pub created_at: BsonDateTime,
}
