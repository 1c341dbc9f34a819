pub mod user;
pub mod post;
pub mod comment;
pub mod setting;
pub mod login_log;
pub mod media;

pub use user::{User, UserRole, UserStatus};
pub use post::{Post, PostStatus, PostType, PostVisibility, Tag};
pub use comment::{Comment, CommentStatus};
pub use setting::{Setting, SettingGroup};
pub use login_log::{LoginFailReason, LoginLog};
pub use media::{Media, MediaKind};
