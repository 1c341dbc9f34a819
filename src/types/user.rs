use serde::{Deserialize, Serialize};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

/// Account role. Stored capitalised (`"Owner"`), lowercase is accepted on read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    #[serde(alias = "owner")]
    Owner,
    #[serde(alias = "admin")]
    Admin,
    #[serde(alias = "editor")]
    Editor,
    #[serde(alias = "author")]
    Author,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Owner => "Owner",
            UserRole::Admin => "Admin",
            UserRole::Editor => "Editor",
            UserRole::Author => "Author",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Locked,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Locked => "locked",
            UserStatus::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: UserRole,
    pub profile_image: String,
    pub cover_image: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub twitter: String,
    pub facebook: String,
    pub status: UserStatus,
    pub login_fail_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<BsonDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<BsonDateTime>,
    #[serde(rename = "lastLoginIP")]
    pub last_login_ip: String,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn role_is_stored_capitalised_and_read_case_insensitively() {
        let stored = bson::to_bson(&UserRole::Owner).unwrap();
        assert_eq!(stored, bson::Bson::String("Owner".into()));

        let parsed: UserRole = bson::from_bson(bson::Bson::String("author".into())).unwrap();
        assert_eq!(parsed, UserRole::Author);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<UserStatus, _> = bson::from_bson(bson::Bson::String("banned".into()));
        assert!(result.is_err());
    }

    #[test]
    fn field_names_are_camel_case() {
        let now = BsonDateTime::now();
        let user = User {
            id: None,
            username: "admin".into(),
            email: "admin@heimdall.com".into(),
            password_hash: "hash".into(),
            display_name: "Admin".into(),
            role: UserRole::Owner,
            profile_image: String::new(),
            cover_image: String::new(),
            bio: String::new(),
            location: String::new(),
            website: String::new(),
            twitter: String::new(),
            facebook: String::new(),
            status: UserStatus::Active,
            login_fail_count: 0,
            locked_until: None,
            last_login_at: Some(now),
            last_login_ip: "127.0.0.1".into(),
            created_at: now,
            updated_at: now,
        };

        let document = bson::to_document(&user).unwrap();
        assert!(document.contains_key("passwordHash"));
        assert!(document.contains_key("lastLoginIP"));
        assert!(document.contains_key("loginFailCount"));
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("lockedUntil"));
        assert_eq!(document.get_str("role").unwrap(), "Owner");
        assert_eq!(document.get_str("status").unwrap(), "active");
    }
}
