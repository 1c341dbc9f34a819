use serde::Serialize;
use std::fmt;

/// The six collections the blog store is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionName {
    Users,
    LoginLogs,
    Posts,
    Comments,
    Settings,
    Media,
}

impl CollectionName {
    pub const ALL: [CollectionName; 6] = [
        CollectionName::Users,
        CollectionName::LoginLogs,
        CollectionName::Posts,
        CollectionName::Comments,
        CollectionName::Settings,
        CollectionName::Media,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Users => "users",
            CollectionName::LoginLogs => "loginLogs",
            CollectionName::Posts => "posts",
            CollectionName::Comments => "comments",
            CollectionName::Settings => "settings",
            CollectionName::Media => "media",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
