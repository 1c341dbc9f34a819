use futures::stream::TryStreamExt;
use mongodb::bson::Document;
use serde::Serialize;
use std::fmt;

use super::CollectionIndexes;
use crate::db::{CollectionName, MongoDb};
use crate::errors::{is_namespace_not_found, StoreError};

/// An index as the store reports it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub name: String,
    pub keys: Document,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionInventory {
    pub collection: CollectionName,
    /// Sorted by name.
    pub indexes: Vec<IndexEntry>,
}

impl CollectionInventory {
    pub fn names(&self) -> Vec<&str> {
        self.indexes.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&IndexEntry> {
        self.indexes.iter().find(|i| i.name == name)
    }
}

/// Live index inventory, read back after the schema has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexInventory {
    pub collections: Vec<CollectionInventory>,
}

impl IndexInventory {
    pub async fn read(db: &MongoDb, collections: &[CollectionName]) -> Result<Self, StoreError> {
        let mut inventories = Vec::with_capacity(collections.len());
        for &collection in collections {
            inventories.push(read_collection(db, collection).await?);
        }
        Ok(Self { collections: inventories })
    }

    pub fn collection(&self, collection: CollectionName) -> Option<&CollectionInventory> {
        self.collections.iter().find(|c| c.collection == collection)
    }

    /// Declared indexes that the store does not report.
    pub fn missing(&self, catalog: &[CollectionIndexes]) -> Vec<(CollectionName, &'static str)> {
        let mut missing = Vec::new();
        for entry in catalog {
            let live = self.collection(entry.collection);
            for spec in &entry.indexes {
                if live.and_then(|c| c.get(spec.name)).is_none() {
                    missing.push((entry.collection, spec.name));
                }
            }
        }
        missing
    }
}

async fn read_collection(db: &MongoDb, collection: CollectionName) -> Result<CollectionInventory, StoreError> {
    let cursor = match db.raw(collection).list_indexes().await {
        Ok(cursor) => cursor,
        Err(e) if is_namespace_not_found(&e) => {
            return Ok(CollectionInventory { collection, indexes: Vec::new() })
        }
        Err(e) => return Err(e.into()),
    };

    let models: Vec<mongodb::IndexModel> = cursor.try_collect().await?;
    let mut indexes: Vec<IndexEntry> = models
        .into_iter()
        .map(|model| IndexEntry {
            name: model
                .options
                .and_then(|o| o.name)
                .unwrap_or_default(),
            keys: model.keys,
        })
        .collect();
    indexes.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(CollectionInventory { collection, indexes })
}

impl fmt::Display for IndexInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.collections {
            writeln!(f, "{}: {} indexes", entry.collection, entry.indexes.len())?;
            for index in &entry.indexes {
                writeln!(f, "  - {}: {}", index.name, index.keys)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IndexSpec;
    use mongodb::bson::doc;

    fn inventory() -> IndexInventory {
        IndexInventory {
            collections: vec![CollectionInventory {
                collection: CollectionName::Settings,
                indexes: vec![
                    IndexEntry { name: "_id_".into(), keys: doc! { "_id": 1 } },
                    IndexEntry { name: "idx_setting_key_unique".into(), keys: doc! { "key": 1 } },
                ],
            }],
        }
    }

    #[test]
    fn reports_declared_indexes_the_store_lacks() {
        let catalog = vec![CollectionIndexes {
            collection: CollectionName::Settings,
            indexes: vec![
                IndexSpec::named("idx_setting_key_unique").asc("key").unique(),
                IndexSpec::named("idx_setting_group").asc("group"),
            ],
        }];
        assert_eq!(
            inventory().missing(&catalog),
            vec![(CollectionName::Settings, "idx_setting_group")]
        );
    }

    #[test]
    fn unknown_collection_is_entirely_missing() {
        let catalog = vec![CollectionIndexes {
            collection: CollectionName::Media,
            indexes: vec![IndexSpec::named("idx_media_url").asc("url")],
        }];
        assert_eq!(inventory().missing(&catalog).len(), 1);
    }

    #[test]
    fn renders_one_line_per_index() {
        let rendered = inventory().to_string();
        assert!(rendered.starts_with("settings: 2 indexes\n"));
        assert!(rendered.contains("  - idx_setting_key_unique: "));
    }
}
