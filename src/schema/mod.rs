//! Declarative index catalog for the blog collections.
//!
//! Every index carries an explicit, stable name. Collaborators that hint
//! queries by index name depend on these names, so they must not change.

mod catalog;
mod definer;
mod inventory;

pub use catalog::catalog;
pub use definer::SchemaDefiner;
pub use inventory::{CollectionInventory, IndexEntry, IndexInventory};

use mongodb::bson::{doc, Bson, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::Serialize;
use std::collections::HashSet;

use crate::db::CollectionName;
use crate::errors::SchemaError;

/// Text indexes run without stemming or stop words.
pub const TEXT_INDEX_LANGUAGE: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKeyKind {
    Ascending,
    Descending,
    Text,
}

impl IndexKeyKind {
    fn to_bson(self) -> Bson {
        match self {
            IndexKeyKind::Ascending => Bson::Int32(1),
            IndexKeyKind::Descending => Bson::Int32(-1),
            IndexKeyKind::Text => Bson::String("text".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexField {
    pub field: &'static str,
    pub kind: IndexKeyKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    pub weights: Vec<(&'static str, i32)>,
    pub default_language: &'static str,
}

/// One index request: keys in order, plus its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub name: &'static str,
    pub keys: Vec<IndexField>,
    pub unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextOptions>,
}

impl IndexSpec {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            keys: Vec::new(),
            unique: false,
            text: None,
        }
    }

    pub fn asc(mut self, field: &'static str) -> Self {
        self.keys.push(IndexField { field, kind: IndexKeyKind::Ascending });
        self
    }

    pub fn desc(mut self, field: &'static str) -> Self {
        self.keys.push(IndexField { field, kind: IndexKeyKind::Descending });
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// A weighted text index over `weights`' fields, in the given order.
    pub fn text(name: &'static str, weights: &[(&'static str, i32)]) -> Self {
        let keys = weights
            .iter()
            .map(|&(field, _)| IndexField { field, kind: IndexKeyKind::Text })
            .collect();
        Self {
            name,
            keys,
            unique: false,
            text: Some(TextOptions {
                weights: weights.to_vec(),
                default_language: TEXT_INDEX_LANGUAGE,
            }),
        }
    }

    pub fn key_document(&self) -> Document {
        let mut keys = Document::new();
        for key in &self.keys {
            keys.insert(key.field, key.kind.to_bson());
        }
        keys
    }

    pub fn to_model(&self) -> IndexModel {
        let mut options = IndexOptions::default();
        options.name = Some(self.name.to_string());
        if self.unique {
            options.unique = Some(true);
        }
        if let Some(text) = &self.text {
            let mut weights = doc! {};
            for (field, weight) in &text.weights {
                weights.insert(*field, *weight);
            }
            options.weights = Some(weights);
            options.default_language = Some(text.default_language.to_string());
        }

        let mut model = IndexModel::default();
        model.keys = self.key_document();
        model.options = Some(options);
        model
    }
}

/// All indexes declared for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionIndexes {
    pub collection: CollectionName,
    pub indexes: Vec<IndexSpec>,
}

impl CollectionIndexes {
    pub fn find(&self, name: &str) -> Option<&IndexSpec> {
        self.indexes.iter().find(|spec| spec.name == name)
    }
}

/// Reject catalogs the store would accept but that break naming or text-index rules.
pub fn validate_catalog(catalog: &[CollectionIndexes]) -> Result<(), SchemaError> {
    let mut seen_collections = HashSet::new();
    for entry in catalog {
        let invalid = |message: String| SchemaError::InvalidCatalog {
            collection: entry.collection.to_string(),
            message,
        };

        if !seen_collections.insert(entry.collection) {
            return Err(invalid("collection declared twice".to_string()));
        }

        let mut names = HashSet::new();
        for spec in &entry.indexes {
            if spec.name.trim().is_empty() {
                return Err(invalid("index without an explicit name".to_string()));
            }
            if !names.insert(spec.name) {
                return Err(invalid(format!("duplicate index name '{}'", spec.name)));
            }
            if spec.keys.is_empty() {
                return Err(invalid(format!("index '{}' has no keys", spec.name)));
            }

            let mut fields = HashSet::new();
            for key in &spec.keys {
                if !fields.insert(key.field) {
                    return Err(invalid(format!(
                        "index '{}' repeats field '{}'",
                        spec.name, key.field
                    )));
                }
            }

            let has_text_key = spec.keys.iter().any(|k| k.kind == IndexKeyKind::Text);
            match (&spec.text, has_text_key) {
                (Some(text), true) => {
                    for (field, weight) in &text.weights {
                        if *weight < 1 {
                            return Err(invalid(format!(
                                "index '{}' gives '{}' a non-positive weight",
                                spec.name, field
                            )));
                        }
                        if !spec.keys.iter().any(|k| k.field == *field && k.kind == IndexKeyKind::Text) {
                            return Err(invalid(format!(
                                "index '{}' weights '{}' which is not a text key",
                                spec.name, field
                            )));
                        }
                    }
                }
                (None, false) => {}
                (Some(_), false) => {
                    return Err(invalid(format!(
                        "index '{}' has text options but no text keys",
                        spec.name
                    )))
                }
                (None, true) => {
                    return Err(invalid(format!(
                        "text index '{}' has no weights",
                        spec.name
                    )))
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(collection: CollectionName, spec: IndexSpec) -> Vec<CollectionIndexes> {
        vec![CollectionIndexes { collection, indexes: vec![spec] }]
    }

    #[test]
    fn builds_compound_key_document_in_order() {
        let spec = IndexSpec::named("idx_post_comments")
            .asc("postId")
            .asc("status")
            .desc("createdAt");
        assert_eq!(
            spec.key_document(),
            doc! { "postId": 1, "status": 1, "createdAt": -1 }
        );
    }

    #[test]
    fn unique_model_carries_name_and_flag() {
        let model = IndexSpec::named("idx_slug_unique").asc("slug").unique().to_model();
        let options = model.options.expect("options");
        assert_eq!(options.name.as_deref(), Some("idx_slug_unique"));
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.weights, None);
    }

    #[test]
    fn plain_model_leaves_unique_unset() {
        let model = IndexSpec::named("idx_view_count").desc("viewCount").to_model();
        let options = model.options.expect("options");
        assert_eq!(options.unique, None);
    }

    #[test]
    fn text_model_disables_language_and_sets_weights() {
        let model = IndexSpec::text("idx_search", &[("title", 10), ("markdown", 1)]).to_model();
        assert_eq!(model.keys, doc! { "title": "text", "markdown": "text" });

        let options = model.options.expect("options");
        assert_eq!(options.default_language.as_deref(), Some("none"));
        assert_eq!(options.weights, Some(doc! { "title": 10, "markdown": 1 }));
    }

    #[test]
    fn rejects_unnamed_index() {
        let catalog = single(CollectionName::Users, IndexSpec::named("").asc("username"));
        assert!(matches!(
            validate_catalog(&catalog),
            Err(SchemaError::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_names_within_a_collection() {
        let catalog = vec![CollectionIndexes {
            collection: CollectionName::Media,
            indexes: vec![
                IndexSpec::named("idx_media_type").asc("type"),
                IndexSpec::named("idx_media_type").asc("mimeType"),
            ],
        }];
        let err = validate_catalog(&catalog).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid index catalog for 'media': duplicate index name 'idx_media_type'"
        );
    }

    #[test]
    fn rejects_keyless_index() {
        let catalog = single(CollectionName::Settings, IndexSpec::named("idx_empty"));
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn rejects_text_options_without_text_keys() {
        let mut spec = IndexSpec::named("idx_title").asc("title");
        spec.text = Some(TextOptions {
            weights: vec![("title", 10)],
            default_language: TEXT_INDEX_LANGUAGE,
        });
        assert!(validate_catalog(&single(CollectionName::Posts, spec)).is_err());
    }

    #[test]
    fn rejects_zero_weight() {
        let spec = IndexSpec::text("idx_search", &[("title", 0)]);
        assert!(validate_catalog(&single(CollectionName::Posts, spec)).is_err());
    }
}
