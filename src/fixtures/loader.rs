use chrono::{DateTime, Utc};
use log::{debug, info};
use mongodb::bson::{doc, Bson};
use mongodb::Collection;
use serde::Serialize;
use std::collections::HashMap;

use super::dataset::{
    build_comments, build_login_logs, build_posts, build_settings, build_users, comment_batches,
    FixtureSet,
};
use super::ids::{IdRegistry, RefKind};
use super::passwords::{PasswordHasher, PlaceholderHasher};
use super::report::{LoadReport, ResetReport};
use super::reset::ResetAuthorization;
use crate::db::{CollectionName, MongoDb};
use crate::errors::{FixtureError, StoreError};
use crate::logging::PhaseTimer;

fn phase_error(phase: &'static str) -> impl Fn(mongodb::error::Error) -> FixtureError {
    move |err| FixtureError::Phase {
        phase,
        source: StoreError::from(err),
    }
}

/// One bulk insert. Empty input is a no-op and reports no ids.
async fn insert_phase<T>(
    phase: &'static str,
    collection: Collection<T>,
    documents: Vec<T>,
) -> Result<HashMap<usize, Bson>, FixtureError>
where
    T: Serialize + Send + Sync,
{
    if documents.is_empty() {
        debug!("{} phase has nothing to insert", phase);
        return Ok(HashMap::new());
    }

    let result = collection
        .insert_many(documents)
        .await
        .map_err(phase_error(phase))?;
    Ok(result.inserted_ids)
}

/// Wipes a development database and fills it with a [`FixtureSet`].
///
/// Phases run in dependency order (users, settings, posts, comments, login
/// logs). Each phase is one bulk insert, and the ids it generates are recorded
/// so later phases can reference them. A failing phase aborts the load; the
/// phases before it stay applied.
pub struct FixtureLoader<'a> {
    db: &'a MongoDb,
    fixtures: FixtureSet,
    hasher: Box<dyn PasswordHasher>,
    now: DateTime<Utc>,
}

impl<'a> FixtureLoader<'a> {
    /// The Heimdall dataset, stored with the placeholder password hash.
    pub fn new(db: &'a MongoDb) -> Self {
        Self {
            db,
            fixtures: FixtureSet::heimdall(),
            hasher: Box::new(PlaceholderHasher),
            now: Utc::now(),
        }
    }

    pub fn with_fixtures(mut self, fixtures: FixtureSet) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn with_hasher(mut self, hasher: impl PasswordHasher + 'static) -> Self {
        self.hasher = Box::new(hasher);
        self
    }

    /// Reference time the fixture ages count back from.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn fixtures(&self) -> &FixtureSet {
        &self.fixtures
    }

    /// Delete every document in the six collections. Indexes are kept.
    pub async fn reset(&self, authorization: &ResetAuthorization) -> Result<ResetReport, FixtureError> {
        authorization.check_target(self.db.name())?;

        let timer = PhaseTimer::start(format!("reset of {}", self.db.name()));
        let mut report = ResetReport::default();
        for collection in CollectionName::ALL {
            let result = self
                .db
                .raw(collection)
                .delete_many(doc! {})
                .await
                .map_err(phase_error("reset"))?;
            debug!("removed {} documents from {}", result.deleted_count, collection);
            report.deleted.push((collection, result.deleted_count));
        }
        timer.finish();

        Ok(report)
    }

    pub async fn load(&self, authorization: &ResetAuthorization) -> Result<LoadReport, FixtureError> {
        self.fixtures.validate()?;
        authorization.check_target(self.db.name())?;

        let total = PhaseTimer::start(format!("fixture load into {}", self.db.name()));
        let mut report = LoadReport {
            reset: self.reset(authorization).await?,
            ..LoadReport::default()
        };
        let mut ids = IdRegistry::new();

        // users
        let timer = PhaseTimer::start("users phase");
        let users = build_users(&self.fixtures.users, self.hasher.as_ref(), self.now)?;
        let inserted = insert_phase("users", self.db.users(), users).await?;
        let names: Vec<&str> = self.fixtures.users.iter().map(|u| u.username).collect();
        ids.capture(RefKind::User, CollectionName::Users.as_str(), &names, &inserted)?;
        report.inserted.push((CollectionName::Users, inserted.len() as u64));
        timer.finish();

        // settings
        let timer = PhaseTimer::start("settings phase");
        let settings = build_settings(&self.fixtures.settings, self.now);
        let inserted = insert_phase("settings", self.db.settings(), settings).await?;
        report.inserted.push((CollectionName::Settings, inserted.len() as u64));
        timer.finish();

        // posts
        let timer = PhaseTimer::start("posts phase");
        let posts = build_posts(&self.fixtures.posts, &ids, self.now)?;
        let inserted = insert_phase("posts", self.db.posts(), posts).await?;
        let slugs: Vec<&str> = self.fixtures.posts.iter().map(|p| p.slug).collect();
        ids.capture(RefKind::Post, CollectionName::Posts.as_str(), &slugs, &inserted)?;
        report.inserted.push((CollectionName::Posts, inserted.len() as u64));
        timer.finish();

        // comments, one insert per reply depth
        let timer = PhaseTimer::start("comments phase");
        for batch in comment_batches(&self.fixtures.comments) {
            let comments = build_comments(&batch, &ids, self.now)?;
            let inserted = insert_phase("comments", self.db.comments(), comments).await?;
            let keys: Vec<&str> = batch.iter().map(|c| c.key).collect();
            ids.capture(RefKind::Comment, CollectionName::Comments.as_str(), &keys, &inserted)?;
            report.inserted.push((CollectionName::Comments, inserted.len() as u64));
        }
        timer.finish();

        // login logs
        let timer = PhaseTimer::start("login logs phase");
        let logs = build_login_logs(&self.fixtures.login_logs, &ids, self.now)?;
        let inserted = insert_phase("login logs", self.db.login_logs(), logs).await?;
        report.inserted.push((CollectionName::LoginLogs, inserted.len() as u64));
        timer.finish();

        report.counts = self.counts().await?;
        report.ids = ids;
        report.elapsed_ms = total.finish();

        info!(
            "loaded {} users, {} posts and {} comments into {}",
            report.count(CollectionName::Users),
            report.count(CollectionName::Posts),
            report.count(CollectionName::Comments),
            self.db.name()
        );
        Ok(report)
    }

    /// Document count of every collection.
    pub async fn counts(&self) -> Result<Vec<(CollectionName, u64)>, FixtureError> {
        let mut counts = Vec::with_capacity(CollectionName::ALL.len());
        for collection in CollectionName::ALL {
            let count = self
                .db
                .raw(collection)
                .count_documents(doc! {})
                .await
                .map_err(StoreError::from)?;
            counts.push((collection, count));
        }
        Ok(counts)
    }
}
