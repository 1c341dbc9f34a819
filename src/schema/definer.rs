use log::{info, warn};

use super::{catalog, validate_catalog, CollectionIndexes, IndexInventory};
use crate::db::{CollectionName, MongoDb};
use crate::errors::SchemaError;
use crate::logging::PhaseTimer;

/// Applies the index catalog to a database and reads back what the store ended up with.
///
/// Applying is convergent: an index that already exists with the same name and
/// definition is left alone by the server, so running twice yields the same
/// inventory. An index name that exists with a different definition fails
/// with [`StoreError::IndexConflict`](crate::errors::StoreError::IndexConflict).
pub struct SchemaDefiner<'a> {
    db: &'a MongoDb,
    catalog: Vec<CollectionIndexes>,
}

impl<'a> SchemaDefiner<'a> {
    pub fn new(db: &'a MongoDb) -> Self {
        Self::with_catalog(db, catalog())
    }

    pub fn with_catalog(db: &'a MongoDb, catalog: Vec<CollectionIndexes>) -> Self {
        Self { db, catalog }
    }

    pub fn catalog(&self) -> &[CollectionIndexes] {
        &self.catalog
    }

    pub async fn apply(&self) -> Result<IndexInventory, SchemaError> {
        validate_catalog(&self.catalog)?;

        for entry in &self.catalog {
            let timer = PhaseTimer::start(format!("indexes on {}", entry.collection));
            info!(
                "creating {} indexes on {}",
                entry.indexes.len(),
                entry.collection
            );

            let models: Vec<_> = entry.indexes.iter().map(|spec| spec.to_model()).collect();
            self.db
                .raw(entry.collection)
                .create_indexes(models)
                .await
                .map_err(|e| SchemaError::Apply {
                    collection: entry.collection.to_string(),
                    source: e.into(),
                })?;

            timer.finish();
        }

        self.verify().await
    }

    /// Read the live inventory for every catalogued collection.
    pub async fn verify(&self) -> Result<IndexInventory, SchemaError> {
        let collections: Vec<CollectionName> = self.catalog.iter().map(|c| c.collection).collect();
        let inventory = IndexInventory::read(self.db, &collections).await?;

        for (collection, name) in inventory.missing(&self.catalog) {
            warn!("index {} is declared but missing on {}", name, collection);
        }
        Ok(inventory)
    }
}
