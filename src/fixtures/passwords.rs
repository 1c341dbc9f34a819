use bcrypt::hash;

use crate::errors::FixtureError;

/// Opaque stand-in stored when real hashing is not requested. It is not a valid
/// bcrypt hash of anything and never verifies.
pub const PLACEHOLDER_PASSWORD_HASH: &str =
    "$2a$12$6iOXFHKJakKJGvf5JkZ4xOz8XzXqXuKGHwXh4tLKH5JKH5JKH5JKH5";

pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Produces the `passwordHash` stored for a fixture account.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, username: &str, password: &str) -> Result<String, FixtureError>;
}

/// Stores [`PLACEHOLDER_PASSWORD_HASH`] for every account.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderHasher;

impl PasswordHasher for PlaceholderHasher {
    fn hash(&self, _username: &str, _password: &str) -> Result<String, FixtureError> {
        Ok(PLACEHOLDER_PASSWORD_HASH.to_string())
    }
}

/// Hashes the development password with bcrypt, so fixture accounts can log in.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, username: &str, password: &str) -> Result<String, FixtureError> {
        hash(password, self.cost).map_err(|source| FixtureError::Hash {
            username: username.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::verify;

    #[test]
    fn placeholder_never_verifies() {
        let stored = PlaceholderHasher.hash("admin", "admin123").unwrap();
        assert_eq!(stored, PLACEHOLDER_PASSWORD_HASH);
        assert!(!verify("admin123", &stored).unwrap_or(false));
    }

    #[test]
    fn bcrypt_hash_verifies_against_the_password() {
        // minimum cost keeps the test fast
        let hasher = BcryptHasher::new(4);
        let stored = hasher.hash("author", "author123").unwrap();
        assert!(stored.starts_with("$2"));
        assert!(verify("author123", &stored).unwrap());
        assert!(!verify("wrong", &stored).unwrap());
    }

    #[test]
    fn invalid_cost_is_reported_per_user() {
        let err = BcryptHasher::new(99).hash("admin", "admin123").unwrap_err();
        assert!(err.to_string().starts_with("failed to hash password for 'admin'"));
    }

    #[test]
    fn default_cost_is_twelve() {
        assert_eq!(BcryptHasher::default().cost(), 12);
    }
}
