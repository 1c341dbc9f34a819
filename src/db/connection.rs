use log::{info, warn};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::TargetConfig;
use crate::db::collections::CollectionName;
use crate::errors::StoreError;
use crate::types::{Comment, LoginLog, Media, Post, Setting, User};

const APP_NAME: &str = "heimdall-db";
const MAX_BACKOFF_MS: u64 = 5000;

pub struct MongoDb {
    pub client: Client,
    pub database: Database,
}

impl MongoDb {
    /// Opens a client for `target` and pings it once.
    pub async fn connect(target: &TargetConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&target.uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        let client = Client::with_options(options)?;
        let database = client.database(&target.database);
        let db = Self { client, database };
        db.ping().await?;
        Ok(db)
    }

    pub fn name(&self) -> &str {
        self.database.name()
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.database.collection(CollectionName::Users.as_str())
    }

    pub fn login_logs(&self) -> Collection<LoginLog> {
        self.database.collection(CollectionName::LoginLogs.as_str())
    }

    pub fn posts(&self) -> Collection<Post> {
        self.database.collection(CollectionName::Posts.as_str())
    }

    pub fn comments(&self) -> Collection<Comment> {
        self.database.collection(CollectionName::Comments.as_str())
    }

    pub fn settings(&self) -> Collection<Setting> {
        self.database.collection(CollectionName::Settings.as_str())
    }

    pub fn media(&self) -> Collection<Media> {
        self.database.collection(CollectionName::Media.as_str())
    }

    /// Untyped handle, for operations that do not care about document shape.
    pub fn raw(&self, name: CollectionName) -> Collection<mongodb::bson::Document> {
        self.database.collection(name.as_str())
    }
}

/// Connect with exponential backoff, giving up after `target.connect_retries` extra attempts.
pub async fn connect_with_retry(target: &TargetConfig) -> Result<MongoDb, StoreError> {
    let max_attempts = target.connect_retries.saturating_add(1);
    let mut attempt = 1;
    let mut backoff_ms = 500;

    loop {
        match MongoDb::connect(target).await {
            Ok(db) => {
                info!("connected to MongoDB database '{}'", db.name());
                return Ok(db);
            }
            Err(e) if attempt < max_attempts => {
                warn!("MongoDB connection failed: {}", e);
                info!(
                    "retrying MongoDB connection in {}ms (attempt {}/{})",
                    backoff_ms,
                    attempt + 1,
                    max_attempts
                );
                sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
