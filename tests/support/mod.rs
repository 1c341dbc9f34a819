//! Shared setup for tests that talk to a live MongoDB.
//!
//! Every test gets its own throwaway database. When `HEIMDALL_TEST_MONGODB_URI`
//! is unset the tests print a skip marker and return early.

use heimdall_db::config::{AppEnvironment, TargetConfig};
use heimdall_db::db::MongoDb;
use heimdall_db::fixtures::ResetAuthorization;
use mongodb::bson::oid::ObjectId;

pub const TEST_URI_VAR: &str = "HEIMDALL_TEST_MONGODB_URI";

pub struct TestDatabase {
    pub db: MongoDb,
}

impl TestDatabase {
    pub fn name(&self) -> &str {
        self.db.name()
    }

    pub fn authorization(&self) -> ResetAuthorization {
        ResetAuthorization::confirm(self.name(), self.name(), AppEnvironment::Test)
            .expect("test databases can always be reset")
    }

    pub async fn cleanup(self) {
        self.db
            .database
            .drop()
            .await
            .expect("test database should drop");
    }
}

/// Connect to a fresh, uniquely named database, or `None` when no server is configured.
pub async fn test_database() -> Option<TestDatabase> {
    let uri = match std::env::var(TEST_URI_VAR) {
        Ok(uri) if !uri.trim().is_empty() => uri,
        _ => {
            eprintln!("SKIP-MONGODB: set {TEST_URI_VAR} to run");
            return None;
        }
    };

    let name = format!("heimdall_test_{}", ObjectId::new().to_hex());
    let target = TargetConfig::new(uri, name);
    let db = MongoDb::connect(&target)
        .await
        .unwrap_or_else(|e| panic!("{TEST_URI_VAR} is set but MongoDB is unreachable: {e}"));
    Some(TestDatabase { db })
}
