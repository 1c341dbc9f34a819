use mongodb::bson::{oid::ObjectId, Bson};
use std::collections::HashMap;
use std::fmt;

use crate::errors::FixtureError;

/// What a fixture name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// Keyed by username.
    User,
    /// Keyed by slug.
    Post,
    /// Keyed by the fixture's own comment key.
    Comment,
}

impl RefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::User => "user",
            RefKind::Post => "post",
            RefKind::Comment => "comment",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers generated by the store, looked up by fixture name in later phases.
#[derive(Debug, Default, Clone)]
pub struct IdRegistry {
    ids: HashMap<(RefKind, String), ObjectId>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: RefKind, name: &str, id: ObjectId) {
        self.ids.insert((kind, name.to_string()), id);
    }

    pub fn get(&self, kind: RefKind, name: &str) -> Option<ObjectId> {
        self.ids.get(&(kind, name.to_string())).copied()
    }

    pub fn resolve(&self, kind: RefKind, name: &str) -> Result<ObjectId, FixtureError> {
        self.get(kind, name).ok_or_else(|| FixtureError::UnknownReference {
            kind: kind.as_str(),
            name: name.to_string(),
        })
    }

    pub fn resolve_optional(&self, kind: RefKind, name: Option<&str>) -> Result<Option<ObjectId>, FixtureError> {
        name.map(|n| self.resolve(kind, n)).transpose()
    }

    /// Record the ids of a bulk insert. `names[i]` is the name of the `i`-th inserted document.
    pub fn capture(
        &mut self,
        kind: RefKind,
        collection: &str,
        names: &[&str],
        inserted: &HashMap<usize, Bson>,
    ) -> Result<(), FixtureError> {
        for (index, name) in names.iter().enumerate() {
            let id = inserted
                .get(&index)
                .and_then(Bson::as_object_id)
                .ok_or_else(|| FixtureError::MissingInsertedId {
                    collection: collection.to_string(),
                    index,
                })?;
            self.record(kind, name, id);
        }
        Ok(())
    }

    pub fn ids_of(&self, kind: RefKind) -> Vec<ObjectId> {
        self.ids
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, id)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_recorded_names_per_kind() {
        let mut ids = IdRegistry::new();
        let admin = ObjectId::new();
        ids.record(RefKind::User, "admin", admin);

        assert_eq!(ids.resolve(RefKind::User, "admin").unwrap(), admin);
        assert!(ids.get(RefKind::Post, "admin").is_none());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let ids = IdRegistry::new();
        let err = ids.resolve(RefKind::Post, "missing-post").unwrap_err();
        assert_eq!(err.to_string(), "fixture references unknown post 'missing-post'");
    }

    #[test]
    fn optional_reference_passes_none_through() {
        let ids = IdRegistry::new();
        assert_eq!(ids.resolve_optional(RefKind::User, None).unwrap(), None);
    }

    #[test]
    fn captures_bulk_insert_ids_by_position() {
        let first = ObjectId::new();
        let second = ObjectId::new();
        let inserted = HashMap::from([(0, Bson::ObjectId(first)), (1, Bson::ObjectId(second))]);

        let mut ids = IdRegistry::new();
        ids.capture(RefKind::Post, "posts", &["welcome", "guide"], &inserted)
            .unwrap();

        assert_eq!(ids.get(RefKind::Post, "welcome"), Some(first));
        assert_eq!(ids.get(RefKind::Post, "guide"), Some(second));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn capture_fails_when_an_id_is_missing() {
        let inserted = HashMap::from([(0, Bson::ObjectId(ObjectId::new()))]);
        let mut ids = IdRegistry::new();
        let err = ids
            .capture(RefKind::User, "users", &["admin", "author"], &inserted)
            .unwrap_err();
        assert!(matches!(
            err,
            FixtureError::MissingInsertedId { index: 1, .. }
        ));
    }
}
