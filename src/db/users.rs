use bcrypt::{verify, BcryptError};
use mongodb::bson::doc;

use crate::db::MongoDb;
use crate::errors::StoreError;
use crate::types::{User, UserRole};

pub async fn find_by_username(db: &MongoDb, username: &str) -> Result<Option<User>, StoreError> {
    Ok(db.users().find_one(doc! { "username": username }).await?)
}

pub async fn find_by_email(db: &MongoDb, email: &str) -> Result<Option<User>, StoreError> {
    Ok(db.users().find_one(doc! { "email": email }).await?)
}

/// Check `password` against the stored bcrypt hash.
///
/// A hash that is not bcrypt-shaped (such as the fixture placeholder) never verifies.
pub async fn verify_password(
    db: &MongoDb,
    username: &str,
    password: &str,
) -> Result<Option<User>, StoreError> {
    let user = match find_by_username(db, username).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    if password_matches(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

fn password_matches(password: &str, hash: &str) -> Result<bool, StoreError> {
    match verify(password, hash) {
        Ok(matches) => Ok(matches),
        Err(BcryptError::InvalidHash(_)) => Ok(false),
        Err(e) => Err(StoreError::PasswordHash(e)),
    }
}

/// Check if any owner account exists
pub async fn owner_exists(db: &MongoDb) -> Result<bool, StoreError> {
    let count = db.users().count_documents(doc! { "role": UserRole::Owner.as_str() }).await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::PLACEHOLDER_PASSWORD_HASH;

    #[test]
    fn placeholder_hash_does_not_match() {
        assert!(!password_matches("admin123", PLACEHOLDER_PASSWORD_HASH).unwrap());
    }

    #[test]
    fn real_hash_matches_only_its_password() {
        let hash = bcrypt::hash("author123", 4).unwrap();
        assert!(password_matches("author123", &hash).unwrap());
        assert!(!password_matches("wrong", &hash).unwrap());
    }

    #[test]
    fn unknown_hash_scheme_is_an_error() {
        let hash = format!("$9z$12${}", "a".repeat(53));
        let err = password_matches("admin123", &hash).unwrap_err();
        assert!(matches!(err, StoreError::PasswordHash(BcryptError::InvalidPrefix(_))));
    }
}
