//! Development dataset for a fresh Heimdall database.
//!
//! Loading is destructive: every collection is emptied first. The only way to
//! get past that step is a [`ResetAuthorization`], which is refused in
//! production and must name the target database.

pub mod dataset;
pub mod ids;
pub mod loader;
pub mod passwords;
pub mod report;
pub mod reset;
mod validate;

pub use dataset::FixtureSet;
pub use ids::{IdRegistry, RefKind};
pub use loader::FixtureLoader;
pub use passwords::{BcryptHasher, PasswordHasher, PlaceholderHasher, PLACEHOLDER_PASSWORD_HASH};
pub use report::{LoadReport, ResetReport};
pub use reset::ResetAuthorization;
